#![forbid(unsafe_code)]

//! Core: key events, shortcuts, money, configuration, and logging.
//!
//! # Role in Shopfront
//! `shopfront-core` holds the vocabulary every other crate shares: the
//! keyboard events the host page forwards, the money type the Storefront API
//! speaks, and the [`StorefrontConfig`](config::StorefrontConfig) that names
//! the shop's domains.
//!
//! # How it fits in the system
//! `shopfront-overlay` consumes [`event::KeyEvent`] for Escape dismissal,
//! `shopfront-cart` prices lines with [`money::Money`], and `shopfront-nav`
//! classifies links using the configured domains.

pub mod config;
pub mod error;
pub mod event;
pub mod keybinding;
pub mod logging;
pub mod money;

pub use config::StorefrontConfig;
pub use error::{ConfigError, LoggingError, MoneyError};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use money::Money;
