#![forbid(unsafe_code)]

//! Overlay panels: search, cart, and mobile menu.
//!
//! # Role in Shopfront
//! Exactly one side panel may cover the page at a time. This crate owns that
//! state ([`OverlayCoordinator`]), the provider scope views reach it through
//! ([`OverlayContext`]), and the session key-listener list the Escape
//! dismissal hooks into ([`KeyListenerRegistry`]).

pub mod context;
pub mod coordinator;
pub mod listener;
pub mod panel;

pub use context::{OVERLAY_PROVIDER, OverlayContext, OverlayError};
pub use coordinator::{OverlayCoordinator, OverlaySubscription};
pub use listener::{KeyListenerRegistry, ListenerGuard};
pub use panel::PanelId;
