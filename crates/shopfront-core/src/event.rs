#![forbid(unsafe_code)]

//! Keyboard event types delivered by the host page.
//!
//! The host forwards `keydown` events from the document as [`KeyEvent`]
//! values. Only the keys the storefront reacts to get dedicated variants;
//! everything else arrives as [`KeyCode::Char`] or [`KeyCode::Other`].
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press`; held keys arrive as `Repeat`.
//! - `Modifiers` use bitflags so `cmd` and `ctrl` can be tested together.
//! - [`KeyEvent::from_dom`] accepts the DOM `KeyboardEvent.key` string.

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build an event from a DOM `KeyboardEvent.key` value.
    ///
    /// Single characters become [`KeyCode::Char`]; named keys the storefront
    /// handles map to their variant; anything else is kept verbatim in
    /// [`KeyCode::Other`].
    #[must_use]
    pub fn from_dom(key: &str, modifiers: Modifiers, repeat: bool) -> Self {
        let code = match key {
            "Escape" | "Esc" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            "Tab" => KeyCode::Tab,
            "ArrowUp" => KeyCode::Up,
            "ArrowDown" => KeyCode::Down,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Other(key.to_owned()),
                }
            }
        };
        let kind = if repeat {
            KeyEventKind::Repeat
        } else {
            KeyEventKind::Press
        };
        Self {
            code,
            modifiers,
            kind,
        }
    }

    /// Check if this is a specific character key (case-insensitive).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }

    /// Check if this is a press of the Escape key.
    #[must_use]
    pub fn is_escape_press(&self) -> bool {
        self.code == KeyCode::Escape && self.kind == KeyEventKind::Press
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Meta/Cmd modifier is held.
    #[must_use]
    pub const fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Any other named key, by its DOM name.
    Other(String),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed.
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
