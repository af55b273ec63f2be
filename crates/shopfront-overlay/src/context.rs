#![forbid(unsafe_code)]

//! Provider scope for the overlay coordinator.
//!
//! Views receive an [`OverlayContext`] from their parent. A context built
//! with [`OverlayContext::provide`] hands out the coordinator; an empty one
//! (a view mounted outside the provider) reports
//! [`OverlayError::MissingProvider`] instead of a default coordinator.

use thiserror::Error;

use crate::coordinator::OverlayCoordinator;

/// Name reported when a view asks for the coordinator outside its provider.
pub const OVERLAY_PROVIDER: &str = "OverlayProvider";

/// Errors from the overlay crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The coordinator was requested outside an initialized provider scope.
    #[error("overlay coordinator used outside of {provider}; wrap the view in an {provider}")]
    MissingProvider { provider: &'static str },
}

/// Scope handed to views that may read or drive the overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayContext {
    coordinator: Option<OverlayCoordinator>,
}

impl OverlayContext {
    /// A context with no provider.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context that provides `coordinator` to everything below it.
    #[must_use]
    pub fn provide(coordinator: OverlayCoordinator) -> Self {
        Self {
            coordinator: Some(coordinator),
        }
    }

    /// Whether a provider is in scope.
    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.coordinator.is_some()
    }

    /// The coordinator in scope.
    pub fn coordinator(&self) -> Result<&OverlayCoordinator, OverlayError> {
        self.coordinator.as_ref().ok_or(OverlayError::MissingProvider {
            provider: OVERLAY_PROVIDER,
        })
    }
}
