#![forbid(unsafe_code)]

//! Global keyboard shortcuts for the search surface.
//!
//! | Key | Action |
//! |-----|--------|
//! | `cmd+k` / `ctrl+k` | [`ShortcutAction::FocusSearch`] |
//! | `Escape` | [`ShortcutAction::BlurSearch`] |
//!
//! Escape also dismisses the active overlay panel, but that listener belongs
//! to the overlay coordinator and is only installed while a panel is open.
//! The mapper here is stateless apart from its configuration.
//!
//! # Example
//!
//! ```
//! use shopfront_core::event::{KeyCode, KeyEvent, Modifiers};
//! use shopfront_core::keybinding::{ShortcutAction, ShortcutMapper};
//!
//! let mapper = ShortcutMapper::with_defaults();
//! let cmd_k = KeyEvent::new(KeyCode::Char('k')).with_modifiers(Modifiers::META);
//! assert_eq!(mapper.map(&cmd_k), ShortcutAction::FocusSearch);
//! ```

use crate::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};

/// Character that, combined with cmd or ctrl, focuses the search input.
pub const DEFAULT_SEARCH_KEY: char = 'k';

/// High-level result of mapping a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Move keyboard focus into the search input.
    FocusSearch,

    /// Remove keyboard focus from the search input.
    BlurSearch,

    /// Not a shortcut; forward to normal handling.
    PassThrough,
}

impl ShortcutAction {
    /// Whether the host should call `preventDefault` on the source event.
    #[must_use]
    pub const fn consumes_event(&self) -> bool {
        matches!(self, ShortcutAction::FocusSearch)
    }
}

/// Configuration for [`ShortcutMapper`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutConfig {
    /// Character that opens search together with the modifier.
    pub search_key: char,

    /// Accept ctrl as well as cmd for the search shortcut.
    /// Default: true.
    pub accept_ctrl: bool,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            search_key: DEFAULT_SEARCH_KEY,
            accept_ctrl: true,
        }
    }
}

/// Maps key events to [`ShortcutAction`]s.
#[derive(Debug, Clone, Default)]
pub struct ShortcutMapper {
    config: ShortcutConfig,
}

impl ShortcutMapper {
    /// Create a mapper with the given configuration.
    #[must_use]
    pub fn new(config: ShortcutConfig) -> Self {
        Self { config }
    }

    /// Create a mapper with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Map a key event to an action.
    ///
    /// Only presses are considered; repeat and release pass through.
    #[must_use]
    pub fn map(&self, event: &KeyEvent) -> ShortcutAction {
        if event.kind != KeyEventKind::Press {
            return ShortcutAction::PassThrough;
        }

        if event.code == KeyCode::Escape {
            return ShortcutAction::BlurSearch;
        }

        let modifier_held = event.meta() || (self.config.accept_ctrl && event.ctrl());
        if modifier_held
            && !event.modifiers.contains(Modifiers::ALT)
            && event.is_char(self.config.search_key)
        {
            return ShortcutAction::FocusSearch;
        }

        ShortcutAction::PassThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char, mods: Modifiers) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c)).with_modifiers(mods)
    }

    #[test]
    fn cmd_and_ctrl_k_focus_search() {
        let mapper = ShortcutMapper::with_defaults();
        assert_eq!(mapper.map(&key('k', Modifiers::META)), ShortcutAction::FocusSearch);
        assert_eq!(mapper.map(&key('k', Modifiers::CTRL)), ShortcutAction::FocusSearch);
        assert_eq!(mapper.map(&key('K', Modifiers::META)), ShortcutAction::FocusSearch);
    }

    #[test]
    fn plain_k_passes_through() {
        let mapper = ShortcutMapper::with_defaults();
        assert_eq!(mapper.map(&key('k', Modifiers::NONE)), ShortcutAction::PassThrough);
        assert_eq!(
            mapper.map(&key('k', Modifiers::META | Modifiers::ALT)),
            ShortcutAction::PassThrough
        );
    }

    #[test]
    fn ctrl_can_be_disabled() {
        let mapper = ShortcutMapper::new(ShortcutConfig {
            accept_ctrl: false,
            ..ShortcutConfig::default()
        });
        assert_eq!(mapper.map(&key('k', Modifiers::CTRL)), ShortcutAction::PassThrough);
        assert_eq!(mapper.map(&key('k', Modifiers::META)), ShortcutAction::FocusSearch);
    }

    #[test]
    fn escape_blurs() {
        let mapper = ShortcutMapper::with_defaults();
        let esc = KeyEvent::new(KeyCode::Escape);
        assert_eq!(mapper.map(&esc), ShortcutAction::BlurSearch);
        assert!(!ShortcutAction::BlurSearch.consumes_event());

        let held = esc.with_kind(KeyEventKind::Repeat);
        assert_eq!(mapper.map(&held), ShortcutAction::PassThrough);
    }
}
