//! Keyboard and mouse identifiers shared between the engine and the toolkit.

use std::fmt;

/// A physical key position as reported by the engine's input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scancode(pub u32);

impl Scancode {
    pub const A: Self = Self(4);
    pub const C: Self = Self(6);
    pub const V: Self = Self(25);
    pub const X: Self = Self(27);
    pub const Y: Self = Self(28);
    pub const Z: Self = Self(29);
    pub const RETURN: Self = Self(40);
    pub const ESCAPE: Self = Self(41);
    pub const BACKSPACE: Self = Self(42);
    pub const TAB: Self = Self(43);
    pub const HOME: Self = Self(74);
    pub const DELETE: Self = Self(76);
    pub const END: Self = Self(77);
    pub const RIGHT: Self = Self(79);
    pub const LEFT: Self = Self(80);
    pub const DOWN: Self = Self(81);
    pub const UP: Self = Self(82);

    /// Returns the scancode as an index into a key state table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Scancode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scancode {}", self.0)
    }
}

/// Keys the toolkit uses for navigation and text editing shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Home,
    End,
    Delete,
    Backspace,
    Enter,
    Escape,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

const NAV_KEY_COUNT: usize = 17;

impl NavKey {
    /// All navigation keys, in key map order.
    pub const ALL: [NavKey; NAV_KEY_COUNT] = [
        NavKey::Tab,
        NavKey::LeftArrow,
        NavKey::RightArrow,
        NavKey::UpArrow,
        NavKey::DownArrow,
        NavKey::Home,
        NavKey::End,
        NavKey::Delete,
        NavKey::Backspace,
        NavKey::Enter,
        NavKey::Escape,
        NavKey::A,
        NavKey::C,
        NavKey::V,
        NavKey::X,
        NavKey::Y,
        NavKey::Z,
    ];

    fn default_scancode(self) -> Scancode {
        match self {
            NavKey::Tab => Scancode::TAB,
            NavKey::LeftArrow => Scancode::LEFT,
            NavKey::RightArrow => Scancode::RIGHT,
            NavKey::UpArrow => Scancode::UP,
            NavKey::DownArrow => Scancode::DOWN,
            NavKey::Home => Scancode::HOME,
            NavKey::End => Scancode::END,
            NavKey::Delete => Scancode::DELETE,
            NavKey::Backspace => Scancode::BACKSPACE,
            NavKey::Enter => Scancode::RETURN,
            NavKey::Escape => Scancode::ESCAPE,
            NavKey::A => Scancode::A,
            NavKey::C => Scancode::C,
            NavKey::V => Scancode::V,
            NavKey::X => Scancode::X,
            NavKey::Y => Scancode::Y,
            NavKey::Z => Scancode::Z,
        }
    }
}

/// Maps toolkit navigation keys to engine scancodes.
///
/// The toolkit peeks into the key state table through these indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    scancodes: [Scancode; NAV_KEY_COUNT],
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            scancodes: NavKey::ALL.map(NavKey::default_scancode),
        }
    }
}

impl KeyMap {
    /// Returns the scancode bound to `key`.
    pub fn scancode(&self, key: NavKey) -> Scancode {
        self.scancodes[key as usize]
    }

    /// Rebinds `key` to `scancode`.
    pub fn set(&mut self, key: NavKey, scancode: Scancode) {
        self.scancodes[key as usize] = scancode;
    }

    /// Returns the navigation key bound to `scancode`, if any.
    pub fn nav_key(&self, scancode: Scancode) -> Option<NavKey> {
        self.iter()
            .find(|&(_, bound)| bound == scancode)
            .map(|(key, _)| key)
    }

    /// Iterates over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (NavKey, Scancode)> + '_ {
        NavKey::ALL.iter().map(|&key| (key, self.scancode(key)))
    }
}

/// Modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Ctrl,
    Shift,
    Alt,
}

/// Mouse buttons forwarded to the toolkit, in toolkit slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_map() {
        let map = KeyMap::default();
        assert_eq!(map.scancode(NavKey::Tab), Scancode(43));
        assert_eq!(map.scancode(NavKey::Enter), Scancode(40));
        assert_eq!(map.scancode(NavKey::Z), Scancode(29));
        assert_eq!(map.iter().count(), NavKey::ALL.len());
    }

    #[test]
    fn test_nav_key_lookup() {
        let map = KeyMap::default();
        assert_eq!(map.nav_key(Scancode::ESCAPE), Some(NavKey::Escape));
        assert_eq!(map.nav_key(Scancode(200)), None);
    }

    #[test]
    fn test_rebind() {
        let mut map = KeyMap::default();
        map.set(NavKey::Enter, Scancode(88));
        assert_eq!(map.scancode(NavKey::Enter), Scancode(88));
        assert_eq!(map.nav_key(Scancode::RETURN), None);
    }

    #[test]
    fn test_key_map_order_matches_enum() {
        for (index, key) in NavKey::ALL.iter().enumerate() {
            assert_eq!(*key as usize, index);
        }
    }
}
