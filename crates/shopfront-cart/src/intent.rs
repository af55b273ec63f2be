#![forbid(unsafe_code)]

//! Cart mutation intents.
//!
//! A [`PendingIntent`] is created when the shopper acts (add to cart, change
//! a quantity, apply a code) and lives in the [`CartQueue`](crate::queue::CartQueue)
//! until the API answers. Intents carry everything the projection needs to
//! predict their effect; they never hold references into a snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use shopfront_core::money::Money;

use crate::error::CartError;
use crate::snapshot::{Attribute, LineId, MerchandiseId};

/// Submission-order identifier of an intent.
///
/// Ids are handed out by the queue and strictly increase, so ordering ids
/// orders submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntentId(pub u64);

impl IntentId {
    /// Line id used for a line that exists only in the projection.
    #[must_use]
    pub fn provisional_line_id(self) -> LineId {
        LineId(format!("optimistic-line-{}", self.0))
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cart mutation awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PendingIntent {
    /// Add `quantity` of a variant, merging into a line with the same
    /// merchandise and attributes.
    AddLine {
        merchandise_id: MerchandiseId,
        quantity: u32,
        #[serde(default)]
        attributes: Vec<Attribute>,
        /// Price shown on the product form, used to estimate the subtotal.
        #[serde(default)]
        unit_price: Option<Money>,
    },
    /// Set a line's quantity. Zero or below removes the line.
    UpdateLine { line_id: LineId, quantity: i64 },
    /// Remove lines.
    RemoveLines { line_ids: Vec<LineId> },
    /// Apply discount codes.
    ApplyDiscount { codes: Vec<String> },
    /// Clear every applied discount code.
    RemoveDiscounts,
    /// Apply a gift card code.
    ApplyGiftCard { code: String },
    /// Clear every applied gift card code.
    RemoveGiftCards,
}

impl PendingIntent {
    /// Add `quantity` of `merchandise_id` with no attributes or price hint.
    #[must_use]
    pub fn add_line(merchandise_id: MerchandiseId, quantity: u32) -> Self {
        Self::AddLine {
            merchandise_id,
            quantity,
            attributes: Vec::new(),
            unit_price: None,
        }
    }

    /// Set `line_id` to `quantity`.
    #[must_use]
    pub fn update_line(line_id: LineId, quantity: i64) -> Self {
        Self::UpdateLine { line_id, quantity }
    }

    /// Remove a single line.
    #[must_use]
    pub fn remove_line(line_id: LineId) -> Self {
        Self::RemoveLines {
            line_ids: vec![line_id],
        }
    }

    /// Add-to-cart from a product form selection.
    ///
    /// Fails when the selected variant cannot be bought or the quantity is 0.
    pub fn add_variant(variant: &VariantSelection, quantity: u32) -> Result<Self, CartError> {
        if !variant.available_for_sale {
            return Err(CartError::VariantUnavailable(variant.merchandise_id.clone()));
        }
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        Ok(Self::AddLine {
            merchandise_id: variant.merchandise_id.clone(),
            quantity,
            attributes: variant.attributes.clone(),
            unit_price: variant.price.clone(),
        })
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddLine { .. } => "add_line",
            Self::UpdateLine { .. } => "update_line",
            Self::RemoveLines { .. } => "remove_lines",
            Self::ApplyDiscount { .. } => "apply_discount",
            Self::RemoveDiscounts => "remove_discounts",
            Self::ApplyGiftCard { .. } => "apply_gift_card",
            Self::RemoveGiftCards => "remove_gift_cards",
        }
    }
}

/// An intent together with its submission id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedIntent {
    pub id: IntentId,
    pub intent: PendingIntent,
}

impl QueuedIntent {
    #[must_use]
    pub fn new(id: IntentId, intent: PendingIntent) -> Self {
        Self { id, intent }
    }
}

/// The variant currently selected in a product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    pub merchandise_id: MerchandiseId,
    pub available_for_sale: bool,
    pub price: Option<Money>,
    pub attributes: Vec<Attribute>,
}

impl VariantSelection {
    /// A purchasable variant with no price hint.
    #[must_use]
    pub fn available(merchandise_id: MerchandiseId) -> Self {
        Self {
            merchandise_id,
            available_for_sale: true,
            price: None,
            attributes: Vec::new(),
        }
    }

    /// Button label for the add-to-cart control.
    #[must_use]
    pub fn add_to_cart_label(&self) -> &'static str {
        if self.available_for_sale {
            "Add to cart"
        } else {
            "Sold out"
        }
    }
}
