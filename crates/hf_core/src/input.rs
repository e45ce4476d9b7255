//! Backend-independent input events handed to registered callbacks.
//!
//! The application layer translates raw windowing events into these types, so
//! callbacks never depend on the windowing crate directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    GraveAccent,
    Comma,
    Period,
    Slash,
    /// The extra key next to left shift on ISO layouts.
    IntlBackslash,
    CapsLock,
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,
    Menu,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadDecimal,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadEqual,
    /// A physical key this vocabulary has no name for.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    /// Auto-repeat while the key is held.
    Repeat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub logo: bool,
}

impl Modifiers {
    pub fn none(self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.logo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub action: ButtonAction,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollUnit {
    Lines,
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub x: f64,
    pub y: f64,
    pub unit: ScrollUnit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    /// Platform scancode of the physical key, when the backend exposes one.
    /// Tells apart keys that share `Key::Unknown`.
    pub scancode: Option<u32>,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// True for the initial press and for auto-repeats.
    pub fn is_down(&self) -> bool {
        matches!(self.action, KeyAction::Press | KeyAction::Repeat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEvent {
    pub ch: char,
}

/// Which capture flag of the GUI layer guards an event class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCategory {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseButton(MouseButtonEvent),
    Scroll(ScrollEvent),
    Key(KeyEvent),
    Char(CharEvent),
}

impl InputEvent {
    pub fn category(&self) -> InputCategory {
        match self {
            Self::MouseButton(_) | Self::Scroll(_) => InputCategory::Pointer,
            Self::Key(_) | Self::Char(_) => InputCategory::Keyboard,
        }
    }
}

/// Characters from committed text worth forwarding as `CharEvent`s.
/// Control characters (backspace, enter, escape...) arrive as key events.
pub fn text_to_char_events(text: &str) -> impl Iterator<Item = CharEvent> + '_ {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| CharEvent { ch })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_map_to_pointer_category() {
        let click = InputEvent::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            action: ButtonAction::Press,
            modifiers: Modifiers::default(),
        });
        let scroll = InputEvent::Scroll(ScrollEvent {
            x: 0.0,
            y: -1.0,
            unit: ScrollUnit::Lines,
        });
        assert_eq!(click.category(), InputCategory::Pointer);
        assert_eq!(scroll.category(), InputCategory::Pointer);
    }

    #[test]
    fn keyboard_events_map_to_keyboard_category() {
        let key = InputEvent::Key(KeyEvent {
            key: Key::Escape,
            scancode: None,
            action: KeyAction::Press,
            modifiers: Modifiers::default(),
        });
        let ch = InputEvent::Char(CharEvent { ch: 'x' });
        assert_eq!(key.category(), InputCategory::Keyboard);
        assert_eq!(ch.category(), InputCategory::Keyboard);
    }

    #[test]
    fn repeat_counts_as_down() {
        let mut event = KeyEvent {
            key: Key::A,
            scancode: Some(30),
            action: KeyAction::Repeat,
            modifiers: Modifiers::default(),
        };
        assert!(event.is_down());
        event.action = KeyAction::Release;
        assert!(!event.is_down());
    }

    #[test]
    fn default_modifiers_are_none() {
        assert!(Modifiers::default().none());
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(!shift.none());
    }

    #[test]
    fn text_to_char_events_skips_control_characters() {
        let chars: Vec<char> = text_to_char_events("a\u{8}é\r\n ")
            .map(|event| event.ch)
            .collect();
        assert_eq!(chars, vec!['a', 'é', ' ']);
    }
}
