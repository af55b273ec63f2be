#![forbid(unsafe_code)]

//! Overlay panel identifiers.

use std::fmt;

/// One of the side panels that can cover the page.
///
/// The "nothing open" state is `Option::<PanelId>::None`, so at most one
/// panel is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Predictive search panel.
    Search,
    /// Cart drawer.
    Cart,
    /// Mobile navigation menu.
    MobileMenu,
}

impl PanelId {
    /// Heading shown at the top of the panel.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            PanelId::Search => "SEARCH",
            PanelId::Cart => "CART",
            PanelId::MobileMenu => "MENU",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelId::Search => "search",
            PanelId::Cart => "cart",
            PanelId::MobileMenu => "mobile",
        };
        f.write_str(name)
    }
}
