#![forbid(unsafe_code)]

//! Shopfront public facade crate.
//!
//! This crate provides the surface a storefront host programs against. It
//! re-exports the common types of the internal crates, adds the
//! [`Storefront`] session and the [`CommerceApi`] boundary, and offers a
//! prelude for day-to-day use.

use thiserror::Error;

pub mod api;
pub mod header;
pub mod session;

// --- Core re-exports -------------------------------------------------------

pub use shopfront_core::config::StorefrontConfig;
pub use shopfront_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use shopfront_core::keybinding::{ShortcutAction, ShortcutMapper};
pub use shopfront_core::money::Money;
pub use shopfront_core::{ConfigError, LoggingError};

// --- Overlay re-exports ----------------------------------------------------

pub use shopfront_overlay::{
    KeyListenerRegistry, OverlayContext, OverlayCoordinator, OverlayError, PanelId,
};

// --- Cart re-exports -------------------------------------------------------

pub use shopfront_cart::{
    CartError, CartQueue, CartSnapshot, IntentId, PendingIntent, ProjectedCart, Reconciliation,
    VariantSelection, project,
};

// --- Navigation re-exports -------------------------------------------------

pub use shopfront_nav::{InternalDomains, LinkTarget, Menu, MenuError, NavLink, classify};

// --- Search re-exports -----------------------------------------------------

pub use shopfront_search::{
    Completion, PredictiveItems, PredictiveSearch, PredictiveSearchResult, SearchError,
    SearchResult, SearchTicket,
};

// --- Facade ----------------------------------------------------------------

pub use api::{CommerceApi, Layout, load_layout};
pub use header::{HeaderCta, LoginStatus};
pub use session::Storefront;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Shopfront hosts.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The commerce API could not answer.
    #[error("commerce API request failed: {0}")]
    Api(String),
}

/// Standard result type for Shopfront APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Install the `SHOPFRONT_LOG`-filtered subscriber.
pub fn init_logging(default_directive: &str) -> Result<()> {
    shopfront_core::logging::init(default_directive)?;
    Ok(())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CommerceApi, Error, HeaderCta, KeyCode, KeyEvent, LinkTarget, LoginStatus, Modifiers,
        PanelId, PendingIntent, Reconciliation, Result, ShortcutAction, Storefront,
        StorefrontConfig, VariantSelection,
    };

    pub use crate::{cart, core, nav, overlay, search};
}

pub use shopfront_cart as cart;
pub use shopfront_core as core;
pub use shopfront_nav as nav;
pub use shopfront_overlay as overlay;
pub use shopfront_search as search;
