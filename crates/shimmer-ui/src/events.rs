//! Engine-side events consumed by the UI host.

use glam::IVec2;
use shimmer_core::Signal;

use crate::keys::{MouseButton, Qualifier, Scancode};

/// The backbuffer was (re)created with a new resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMode {
    pub width: u32,
    pub height: u32,
}

/// A new frame is starting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeginFrame {
    /// Seconds since the previous frame, or `0.0` if unknown.
    pub time_step: f32,
}

/// Modifier state captured with a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Qualifiers {
    /// Returns whether `qualifier` is part of this set.
    pub fn contains(self, qualifier: Qualifier) -> bool {
        match qualifier {
            Qualifier::Ctrl => self.ctrl,
            Qualifier::Shift => self.shift,
            Qualifier::Alt => self.alt,
        }
    }
}

/// A key was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub scancode: Scancode,
    pub qualifiers: Qualifiers,
}

impl KeyEvent {
    /// A key event without modifiers.
    pub fn new(scancode: Scancode) -> Self {
        Self {
            scancode,
            qualifiers: Qualifiers::default(),
        }
    }
}

/// Text typed by the user, UTF-8 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
}

/// The engine notifications a UI host subscribes to.
#[derive(Debug, Default)]
pub struct EngineEvents {
    pub screen_mode: Signal<ScreenMode>,
    pub begin_frame: Signal<BeginFrame>,
    /// Scene rendering finished; overlays draw now.
    pub end_rendering: Signal<()>,
    pub key_down: Signal<KeyEvent>,
    pub key_up: Signal<KeyEvent>,
    pub text_input: Signal<TextInput>,
}

impl EngineEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of connected slots across all events.
    pub fn connection_count(&self) -> usize {
        self.screen_mode.len()
            + self.begin_frame.len()
            + self.end_rendering.len()
            + self.key_down.len()
            + self.key_up.len()
            + self.text_input.len()
    }
}

/// Polled input state of the engine.
pub trait InputState {
    /// Returns whether the OS cursor is shown.
    fn is_mouse_visible(&self) -> bool;

    /// Cursor position in window pixels.
    fn mouse_position(&self) -> IVec2;

    /// Returns whether a modifier key is held.
    fn qualifier_down(&self, qualifier: Qualifier) -> bool;

    /// Returns whether a mouse button is held.
    fn mouse_button_down(&self, button: MouseButton) -> bool;

    /// Wheel movement since the last frame, in notches.
    fn mouse_wheel(&self) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifiers_contains() {
        let qualifiers = Qualifiers {
            ctrl: true,
            ..Qualifiers::default()
        };
        assert!(qualifiers.contains(Qualifier::Ctrl));
        assert!(!qualifiers.contains(Qualifier::Alt));
    }

    #[test]
    fn test_engine_events_start_empty() {
        let mut events = EngineEvents::new();
        assert_eq!(events.connection_count(), 0);

        events.key_down.connect_fn(|_| {});
        events.end_rendering.connect_fn(|()| {});
        assert_eq!(events.connection_count(), 2);
    }
}
