#![forbid(unsafe_code)]

//! Search failures.

use thiserror::Error;

/// A predictive or full-page search request that did not produce results.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(String),
    #[error("malformed search payload: {0}")]
    Json(#[from] serde_json::Error),
}
