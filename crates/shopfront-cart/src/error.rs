#![forbid(unsafe_code)]

use thiserror::Error;

use crate::snapshot::MerchandiseId;

/// Errors from the cart crate.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to parse cart JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("variant {0} is not available for sale")]
    VariantUnavailable(MerchandiseId),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}
