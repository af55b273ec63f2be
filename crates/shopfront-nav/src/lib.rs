#![forbid(unsafe_code)]

//! Navigation: header and footer menus, and link classification.
//!
//! # Role in Shopfront
//! Menus fetched from the commerce API carry absolute URLs. This crate turns
//! them into [`NavLink`]s whose targets are either in-app paths or off-site
//! links, and substitutes the static template menus when the shop has none.
//!
//! # Invariants
//! - A link whose host contains a configured shop domain is internal and
//!   reduced to its path.
//! - Every other link, including unparseable ones, is external and unchanged.
//! - Menu items without a URL never produce a link.

pub mod error;
pub mod fallback;
pub mod link;
pub mod menu;

pub use error::MenuError;
pub use fallback::{
    FOOTER_FALLBACK_MENU_ID, HEADER_FALLBACK_MENU_ID, footer_fallback_menu, header_fallback_menu,
};
pub use link::{InternalDomains, LinkTarget, classify};
pub use menu::{Menu, MenuItem, MenuItemType, MenuKind, NavLink, resolve, resolve_or_fallback};
