//! Platform-agnostic input types.
//!
//! Provides a [`KeyCode`] enum that identifies physical keyboard keys
//! without depending on any windowing crate, plus the modifier set and
//! the key events the focus widget consumes.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Physical keyboard key identifier.
///
/// Matches common physical key positions (US QWERTY layout names).
/// Platform layers (e.g. winit) map their native key codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
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

    // Digits
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

    // Function keys
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

    // Modifier keys, bindable on their own
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,

    // Punctuation
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,
}

bitflags! {
    /// Keyboard modifiers held while a key event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 1 << 0;
        /// Either control key.
        const CONTROL = 1 << 1;
        /// Either alt key.
        const ALT = 1 << 2;
        /// Either super (meta) key.
        const SUPER = 1 << 3;
    }
}

/// A key together with the exact modifier set it must be pressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyBinding {
    /// Binding for a bare key press with no modifiers.
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    pub const fn with_modifiers(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Typed interaction event delivered to widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress { key: KeyCode, modifiers: Modifiers },
    KeyRelease { key: KeyCode, modifiers: Modifiers },
}

impl InputEvent {
    /// Key press without modifiers.
    pub fn key_press(key: KeyCode) -> Self {
        Self::KeyPress {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the binding this event would match, for key presses only.
    pub fn pressed_binding(&self) -> Option<KeyBinding> {
        match *self {
            Self::KeyPress { key, modifiers } => Some(KeyBinding { key, modifiers }),
            Self::KeyRelease { .. } => None,
        }
    }
}
