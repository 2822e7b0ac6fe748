//! The toolkit's per-frame input block.

use glam::Vec2;

use crate::keys::{KeyMap, MouseButton, NavKey, Qualifier, Scancode};

/// Mouse position reported while the cursor is hidden or off screen.
pub const MOUSE_ABSENT: Vec2 = Vec2::new(-1.0, -1.0);

/// Input state handed to the toolkit at the start of every frame.
#[derive(Debug, Clone)]
pub struct UiIo {
    /// Display size in pixels.
    pub display_size: Vec2,
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Mouse position in pixels, or [`MOUSE_ABSENT`].
    pub mouse_pos: Vec2,
    /// Left, right and middle button state.
    pub mouse_down: [bool; 3],
    /// Wheel movement this frame.
    pub mouse_wheel: f32,
    pub key_ctrl: bool,
    pub key_shift: bool,
    pub key_alt: bool,
    /// Navigation key bindings into `keys_down`.
    pub key_map: KeyMap,
    keys_down: Vec<bool>,
    input_characters: String,
}

impl UiIo {
    /// Creates an input block tracking `key_capacity` scancodes.
    pub fn new(key_capacity: usize) -> Self {
        Self {
            display_size: Vec2::ZERO,
            delta_time: 0.0,
            mouse_pos: MOUSE_ABSENT,
            mouse_down: [false; 3],
            mouse_wheel: 0.0,
            key_ctrl: false,
            key_shift: false,
            key_alt: false,
            key_map: KeyMap::default(),
            keys_down: vec![false; key_capacity],
            input_characters: String::new(),
        }
    }

    /// Number of scancodes tracked.
    pub fn key_capacity(&self) -> usize {
        self.keys_down.len()
    }

    /// Records a key press or release.
    ///
    /// Scancodes outside the tracked range are ignored.
    pub fn set_key_down(&mut self, scancode: Scancode, down: bool) {
        match self.keys_down.get_mut(scancode.index()) {
            Some(state) => *state = down,
            None => log::trace!("ignoring {scancode} outside the key table"),
        }
    }

    /// Returns whether `scancode` is held.
    pub fn is_key_down(&self, scancode: Scancode) -> bool {
        self.keys_down
            .get(scancode.index())
            .copied()
            .unwrap_or(false)
    }

    /// Returns whether the scancode bound to `key` is held.
    pub fn is_nav_key_down(&self, key: NavKey) -> bool {
        self.is_key_down(self.key_map.scancode(key))
    }

    /// Returns whether a modifier is held.
    pub fn qualifier(&self, qualifier: Qualifier) -> bool {
        match qualifier {
            Qualifier::Ctrl => self.key_ctrl,
            Qualifier::Shift => self.key_shift,
            Qualifier::Alt => self.key_alt,
        }
    }

    /// Returns whether a mouse button is held.
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_down[button as usize]
    }

    /// Queues UTF-8 text typed since the last frame.
    pub fn add_input_characters(&mut self, text: &str) {
        self.input_characters.push_str(text);
    }

    /// Returns the queued text without consuming it.
    pub fn input_characters(&self) -> &str {
        &self.input_characters
    }

    /// Consumes the queued text.
    pub fn take_input_characters(&mut self) -> String {
        std::mem::take(&mut self.input_characters)
    }
}

impl Default for UiIo {
    fn default() -> Self {
        Self::new(shimmer_core::Options::default().key_capacity)
    }
}
