#![forbid(unsafe_code)]

//! Money amounts as sent by the Storefront API.
//!
//! The API encodes `MoneyV2` as `{"amount": "12.50", "currencyCode": "USD"}`
//! with a decimal string. [`Money`] stores the amount in integer minor units
//! (hundredths) so arithmetic on projected carts stays exact.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoneyError;

/// Number of fractional digits kept in minor units.
const MINOR_DIGITS: u32 = 2;
const MINOR_SCALE: i64 = 10_i64.pow(MINOR_DIGITS);

/// An amount of money in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in minor units (cents).
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create an amount from minor units.
    #[must_use]
    pub fn from_minor(amount: i64, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Parse a decimal amount string (`"12.5"`, `"12.50"`, `"-3"`).
    ///
    /// Digits beyond the second fractional place are truncated.
    pub fn parse(amount: &str, currency_code: impl Into<String>) -> Result<Self, MoneyError> {
        Ok(Self::from_minor(parse_minor(amount)?, currency_code))
    }

    /// Multiply by an item count.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::from_minor(
            self.amount.saturating_mul(i64::from(quantity)),
            self.currency_code.clone(),
        )
    }

    /// Add another amount of the same currency.
    ///
    /// Returns `None` on a currency mismatch.
    #[must_use]
    pub fn checked_add(&self, other: &Money) -> Option<Self> {
        (self.currency_code == other.currency_code).then(|| {
            Self::from_minor(
                self.amount.saturating_add(other.amount),
                self.currency_code.clone(),
            )
        })
    }

    /// The amount as the API's decimal string.
    #[must_use]
    pub fn amount_string(&self) -> String {
        format_minor(self.amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount_string(), self.currency_code)
    }
}

fn parse_minor(raw: &str) -> Result<i64, MoneyError> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(MoneyError::InvalidAmount(raw.to_owned()));
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidAmount(raw.to_owned()));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| MoneyError::InvalidAmount(raw.to_owned()))?
    };
    let mut cents = 0_i64;
    let mut scale = MINOR_SCALE / 10;
    for b in frac.bytes().take(MINOR_DIGITS as usize) {
        cents += i64::from(b - b'0') * scale;
        scale /= 10;
    }

    let minor = whole
        .checked_mul(MINOR_SCALE)
        .and_then(|w| w.checked_add(cents))
        .ok_or_else(|| MoneyError::InvalidAmount(raw.to_owned()))?;
    Ok(if negative { -minor } else { minor })
}

fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let scale = MINOR_SCALE as u64;
    format!("{sign}{}.{:02}", abs / scale, abs % scale)
}

fn serialize_amount<S: Serializer>(amount: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_minor(*amount))
}

fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_minor(&raw).map_err(serde::de::Error::custom)
}
