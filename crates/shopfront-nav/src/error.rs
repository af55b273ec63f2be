#![forbid(unsafe_code)]

//! Errors raised while reading menus.

use thiserror::Error;

/// Failure to decode a menu payload.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("malformed menu payload: {0}")]
    Json(#[from] serde_json::Error),
}
