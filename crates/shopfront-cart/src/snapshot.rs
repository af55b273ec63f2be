#![forbid(unsafe_code)]

//! Confirmed cart state as returned by the Storefront API.
//!
//! A [`CartSnapshot`] is an immutable copy of one fetch. The API nests lines
//! under `lines.nodes` and reports codes as objects; [`CartSnapshot::from_api_json`]
//! flattens that into the shape the projection works on.

use std::fmt;

use serde::{Deserialize, Serialize};
use shopfront_core::money::Money;

use crate::error::CartError;

/// Identifier of a cart line (`gid://shopify/CartLine/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub String);

impl LineId {
    /// Create a line id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a purchasable variant (`gid://shopify/ProductVariant/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchandiseId(pub String);

impl MerchandiseId {
    /// Create a merchandise id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MerchandiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Custom key/value attached to a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub line_id: LineId,
    pub merchandise_id: MerchandiseId,
    pub quantity: u32,
    /// Price per unit; `None` renders as a blank placeholder.
    #[serde(default)]
    pub unit_price: Option<Money>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl CartLine {
    /// Create a line with no price and no attributes.
    #[must_use]
    pub fn new(line_id: LineId, merchandise_id: MerchandiseId, quantity: u32) -> Self {
        Self {
            line_id,
            merchandise_id,
            quantity,
            unit_price: None,
            attributes: Vec::new(),
        }
    }

    /// Set the unit price.
    #[must_use]
    pub fn with_unit_price(mut self, price: Money) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Set the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Line total, if the unit price is known.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.as_ref().map(|p| p.times(self.quantity))
    }
}

/// Cart-level amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    #[serde(default)]
    pub subtotal_amount: Option<Money>,
    #[serde(default)]
    pub total_amount: Option<Money>,
}

/// Immutable copy of the cart as last confirmed by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub discount_codes: Vec<String>,
    #[serde(default)]
    pub gift_card_codes: Vec<String>,
    #[serde(default)]
    pub total_quantity: u32,
    #[serde(default)]
    pub cost: CartCost,
}

impl CartSnapshot {
    /// The empty cart used when no cart exists yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from lines, deriving `total_quantity`.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        let total_quantity = lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity));
        Self {
            lines,
            total_quantity,
            ..Self::default()
        }
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.line_id == id)
    }

    /// Parse the Storefront API `cart` object.
    pub fn from_api_json(json: &str) -> Result<Self, CartError> {
        let raw: RawCart = serde_json::from_str(json)?;
        Ok(raw.into())
    }
}

// --- API wire shape ---------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCart {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    checkout_url: Option<String>,
    #[serde(default)]
    total_quantity: u32,
    #[serde(default)]
    lines: RawConnection<RawLine>,
    #[serde(default)]
    discount_codes: Vec<RawDiscountCode>,
    #[serde(default)]
    applied_gift_cards: Vec<RawGiftCard>,
    #[serde(default)]
    cost: CartCost,
}

#[derive(Deserialize)]
struct RawConnection<T> {
    nodes: Vec<T>,
}

impl<T> Default for RawConnection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLine {
    id: LineId,
    quantity: u32,
    #[serde(default)]
    attributes: Vec<Attribute>,
    merchandise: RawMerchandise,
    #[serde(default)]
    cost: Option<RawLineCost>,
}

#[derive(Deserialize)]
struct RawMerchandise {
    id: MerchandiseId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineCost {
    #[serde(default)]
    amount_per_quantity: Option<Money>,
}

#[derive(Deserialize)]
struct RawDiscountCode {
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGiftCard {
    last_characters: String,
}

impl From<RawCart> for CartSnapshot {
    fn from(raw: RawCart) -> Self {
        let lines = raw
            .lines
            .nodes
            .into_iter()
            .map(|line| CartLine {
                line_id: line.id,
                merchandise_id: line.merchandise.id,
                quantity: line.quantity,
                unit_price: line.cost.and_then(|c| c.amount_per_quantity),
                attributes: line.attributes,
            })
            .collect();
        Self {
            id: raw.id,
            checkout_url: raw.checkout_url,
            lines,
            discount_codes: raw.discount_codes.into_iter().map(|d| d.code).collect(),
            gift_card_codes: raw
                .applied_gift_cards
                .into_iter()
                .map(|g| g.last_characters)
                .collect(),
            total_quantity: raw.total_quantity,
            cost: raw.cost,
        }
    }
}
