#![forbid(unsafe_code)]

//! Optimistic cart projection.
//!
//! [`project`] folds the pending intents, in submission order, over the last
//! confirmed snapshot and returns what the cart should look like once they
//! all succeed. It is a pure function: the same inputs always give the same
//! [`ProjectedCart`], and nothing is cached between calls.
//!
//! # Invariants
//!
//! 1. `project(s, [])` equals [`ProjectedCart::from_snapshot`]`(s)`.
//! 2. Quantities never go below zero; a line set to zero is removed.
//! 3. `total_quantity` is the sum of projected line quantities whenever any
//!    intent is pending.
//! 4. Codes are deduplicated case-sensitively and keep first-applied order.
//!
//! # Failure Modes
//!
//! - **Unknown line id** in an update or removal: the intent has no effect.
//! - **Missing or mixed-currency prices**: the estimated subtotal and total
//!   are `None` and render as blank placeholders.
//! - **Order-level discounts** are carried over as a fixed delta between the
//!   confirmed subtotal and total; the estimated total floors at zero.

use shopfront_core::money::Money;
use tracing::{debug_span, trace};

use crate::intent::{IntentId, PendingIntent, QueuedIntent};
use crate::snapshot::{Attribute, CartCost, CartLine, CartSnapshot, LineId, MerchandiseId};

/// A cart line as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedLine {
    pub line: CartLine,
    /// Touched by at least one pending intent.
    pub optimistic: bool,
}

/// The cart as it should be rendered right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectedCart {
    pub id: Option<String>,
    pub checkout_url: Option<String>,
    pub lines: Vec<ProjectedLine>,
    pub discount_codes: Vec<String>,
    pub gift_card_codes: Vec<String>,
    pub total_quantity: u32,
    pub cost: CartCost,
    /// True while any intent is unresolved.
    pub is_optimistic: bool,
}

impl ProjectedCart {
    /// Plain rendering of a confirmed snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            checkout_url: snapshot.checkout_url.clone(),
            lines: snapshot
                .lines
                .iter()
                .map(|line| ProjectedLine {
                    line: line.clone(),
                    optimistic: false,
                })
                .collect(),
            discount_codes: snapshot.discount_codes.clone(),
            gift_card_codes: snapshot.gift_card_codes.clone(),
            total_quantity: snapshot.total_quantity,
            cost: snapshot.cost.clone(),
            is_optimistic: false,
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a projected line.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&ProjectedLine> {
        self.lines.iter().find(|l| &l.line.line_id == id)
    }

    /// Quantity currently shown for a merchandise id across all its lines.
    #[must_use]
    pub fn quantity_of(&self, merchandise_id: &MerchandiseId) -> u32 {
        self.lines
            .iter()
            .filter(|l| &l.line.merchandise_id == merchandise_id)
            .fold(0u32, |acc, l| acc.saturating_add(l.line.quantity))
    }
}

/// Project `intents` over `snapshot`. An absent snapshot is the empty cart.
#[must_use]
pub fn project(snapshot: Option<&CartSnapshot>, intents: &[QueuedIntent]) -> ProjectedCart {
    let empty = CartSnapshot::empty();
    let snapshot = snapshot.unwrap_or(&empty);
    let mut cart = ProjectedCart::from_snapshot(snapshot);
    if intents.is_empty() {
        return cart;
    }

    let _span = debug_span!("cart.project", pending = intents.len()).entered();
    for queued in intents {
        trace!(intent = %queued.id, kind = queued.intent.kind(), "projecting intent");
        apply(&mut cart, queued.id, &queued.intent);
    }

    cart.total_quantity = cart
        .lines
        .iter()
        .fold(0u32, |acc, l| acc.saturating_add(l.line.quantity));
    cart.cost = estimate_cost(snapshot, &cart.lines);
    cart.is_optimistic = true;
    cart
}

fn apply(cart: &mut ProjectedCart, id: IntentId, intent: &PendingIntent) {
    match intent {
        PendingIntent::AddLine {
            merchandise_id,
            quantity,
            attributes,
            unit_price,
        } => add_line(cart, id, merchandise_id, *quantity, attributes, unit_price.as_ref()),
        PendingIntent::UpdateLine { line_id, quantity } => {
            let Some(pos) = cart.lines.iter().position(|l| &l.line.line_id == line_id) else {
                return;
            };
            let clamped = (*quantity).clamp(0, i64::from(u32::MAX)) as u32;
            if clamped == 0 {
                cart.lines.remove(pos);
            } else {
                let entry = &mut cart.lines[pos];
                entry.line.quantity = clamped;
                entry.optimistic = true;
            }
        }
        PendingIntent::RemoveLines { line_ids } => {
            cart.lines.retain(|l| !line_ids.contains(&l.line.line_id));
        }
        PendingIntent::ApplyDiscount { codes } => {
            for code in codes {
                push_unique(&mut cart.discount_codes, code);
            }
        }
        PendingIntent::RemoveDiscounts => cart.discount_codes.clear(),
        PendingIntent::ApplyGiftCard { code } => push_unique(&mut cart.gift_card_codes, code),
        PendingIntent::RemoveGiftCards => cart.gift_card_codes.clear(),
    }
}

fn add_line(
    cart: &mut ProjectedCart,
    id: IntentId,
    merchandise_id: &MerchandiseId,
    quantity: u32,
    attributes: &[Attribute],
    unit_price: Option<&Money>,
) {
    if quantity == 0 {
        return;
    }
    let existing = cart.lines.iter_mut().find(|l| {
        &l.line.merchandise_id == merchandise_id && l.line.attributes.as_slice() == attributes
    });
    match existing {
        Some(entry) => {
            entry.line.quantity = entry.line.quantity.saturating_add(quantity);
            if entry.line.unit_price.is_none() {
                entry.line.unit_price = unit_price.cloned();
            }
            entry.optimistic = true;
        }
        None => cart.lines.push(ProjectedLine {
            line: CartLine {
                line_id: id.provisional_line_id(),
                merchandise_id: merchandise_id.clone(),
                quantity,
                unit_price: unit_price.cloned(),
                attributes: attributes.to_vec(),
            },
            optimistic: true,
        }),
    }
}

fn push_unique(codes: &mut Vec<String>, code: &str) {
    if !code.is_empty() && !codes.iter().any(|c| c == code) {
        codes.push(code.to_owned());
    }
}

fn estimate_cost(snapshot: &CartSnapshot, lines: &[ProjectedLine]) -> CartCost {
    let confirmed_subtotal = snapshot.cost.subtotal_amount.as_ref();
    let subtotal = if lines.is_empty() {
        confirmed_subtotal.map(|s| Money::from_minor(0, s.currency_code.clone()))
    } else {
        sum_line_totals(lines)
    };

    let total = match (&subtotal, confirmed_subtotal, &snapshot.cost.total_amount) {
        (Some(new), Some(old), Some(total))
            if new.currency_code == old.currency_code
                && old.currency_code == total.currency_code =>
        {
            Some(Money::from_minor(
                total.amount.saturating_add(new.amount.saturating_sub(old.amount)).max(0),
                total.currency_code.clone(),
            ))
        }
        _ => None,
    };

    CartCost {
        subtotal_amount: subtotal,
        total_amount: total,
    }
}

fn sum_line_totals(lines: &[ProjectedLine]) -> Option<Money> {
    let (first, rest) = lines.split_first()?;
    rest.iter().try_fold(first.line.line_total()?, |acc, l| {
        acc.checked_add(&l.line.line_total()?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn usd(minor: i64) -> Money {
        Money::from_minor(minor, "USD")
    }

    fn line(id: &str, merch: &str, qty: u32) -> CartLine {
        CartLine::new(LineId::new(id), MerchandiseId::new(merch), qty)
    }

    fn queued(id: u64, intent: PendingIntent) -> QueuedIntent {
        QueuedIntent::new(IntentId(id), intent)
    }

    fn priced_snapshot() -> CartSnapshot {
        let mut snapshot = CartSnapshot::with_lines(vec![
            line("l1", "m1", 2).with_unit_price(usd(1000)),
            line("l2", "m2", 1).with_unit_price(usd(500)),
        ]);
        snapshot.cost = CartCost {
            subtotal_amount: Some(usd(2500)),
            total_amount: Some(usd(2200)),
        };
        snapshot
    }

    #[test]
    fn no_intents_is_identity() {
        let snapshot = priced_snapshot();
        assert_eq!(
            project(Some(&snapshot), &[]),
            ProjectedCart::from_snapshot(&snapshot)
        );
        assert!(!project(Some(&snapshot), &[]).is_optimistic);
    }

    #[test]
    fn absent_snapshot_is_empty_cart() {
        let cart = project(None, &[]);
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity, 0);
    }

    #[test]
    fn add_merges_same_merchandise() {
        let intents = [
            queued(1, PendingIntent::add_line(MerchandiseId::new("m9"), 2)),
            queued(2, PendingIntent::add_line(MerchandiseId::new("m9"), 3)),
        ];
        let cart = project(None, &intents);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].line.quantity, 5);
        assert_eq!(cart.lines[0].line.line_id, IntentId(1).provisional_line_id());
        assert!(cart.lines[0].optimistic);
        assert_eq!(cart.total_quantity, 5);
        assert!(cart.is_optimistic);
    }

    #[test]
    fn add_with_different_attributes_is_separate_line() {
        let engraved = PendingIntent::AddLine {
            merchandise_id: MerchandiseId::new("m1"),
            quantity: 1,
            attributes: vec![Attribute::new("engraving", "JD")],
            unit_price: None,
        };
        let cart = project(Some(&priced_snapshot()), &[queued(1, engraved)]);
        assert_eq!(cart.lines.len(), 3);
        assert_eq!(cart.quantity_of(&MerchandiseId::new("m1")), 3);
    }

    #[test]
    fn add_into_existing_confirmed_line() {
        let cart = project(
            Some(&priced_snapshot()),
            &[queued(1, PendingIntent::add_line(MerchandiseId::new("m1"), 1))],
        );
        let l1 = cart.line(&LineId::new("l1")).unwrap();
        assert_eq!(l1.line.quantity, 3);
        assert!(l1.optimistic);
        assert!(!cart.line(&LineId::new("l2")).unwrap().optimistic);
    }

    #[test]
    fn update_to_zero_removes_line() {
        let snapshot = priced_snapshot();
        let cart = project(
            Some(&snapshot),
            &[queued(1, PendingIntent::update_line(LineId::new("l1"), 0))],
        );
        assert!(cart.line(&LineId::new("l1")).is_none());
        assert_eq!(cart.total_quantity, snapshot.total_quantity - 2);
    }

    #[test]
    fn negative_update_clamps_to_removal() {
        let cart = project(
            Some(&priced_snapshot()),
            &[queued(1, PendingIntent::update_line(LineId::new("l2"), -4))],
        );
        assert!(cart.line(&LineId::new("l2")).is_none());
    }

    #[test]
    fn update_unknown_line_is_noop() {
        let snapshot = priced_snapshot();
        let cart = project(
            Some(&snapshot),
            &[queued(1, PendingIntent::update_line(LineId::new("ghost"), 9))],
        );
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total_quantity, 3);
    }

    #[test]
    fn remove_lines_filters() {
        let cart = project(
            Some(&priced_snapshot()),
            &[queued(
                1,
                PendingIntent::RemoveLines {
                    line_ids: vec![LineId::new("l1"), LineId::new("l2")],
                },
            )],
        );
        assert!(cart.is_empty());
        assert_eq!(cart.cost.subtotal_amount, Some(usd(0)));
        assert_eq!(cart.cost.total_amount, Some(usd(0)));
    }

    #[test]
    fn codes_dedup_case_sensitively() {
        let mut snapshot = priced_snapshot();
        snapshot.discount_codes = vec!["SAVE10".into()];
        let intents = [
            queued(
                1,
                PendingIntent::ApplyDiscount {
                    codes: vec!["SAVE10".into(), "save10".into(), "".into()],
                },
            ),
            queued(2, PendingIntent::ApplyGiftCard { code: "GC1".into() }),
            queued(3, PendingIntent::ApplyGiftCard { code: "GC1".into() }),
        ];
        let cart = project(Some(&snapshot), &intents);
        assert_eq!(cart.discount_codes, vec!["SAVE10", "save10"]);
        assert_eq!(cart.gift_card_codes, vec!["GC1"]);
    }

    #[test]
    fn removing_codes_clears_them() {
        let mut snapshot = priced_snapshot();
        snapshot.discount_codes = vec!["A".into()];
        snapshot.gift_card_codes = vec!["G".into()];
        let cart = project(
            Some(&snapshot),
            &[
                queued(1, PendingIntent::RemoveGiftCards),
                queued(2, PendingIntent::RemoveDiscounts),
            ],
        );
        assert!(cart.gift_card_codes.is_empty());
        assert!(cart.discount_codes.is_empty());
    }

    #[test]
    fn cost_is_reestimated() {
        let cart = project(
            Some(&priced_snapshot()),
            &[queued(1, PendingIntent::update_line(LineId::new("l2"), 3))],
        );
        assert_eq!(cart.cost.subtotal_amount, Some(usd(3500)));
        assert_eq!(cart.cost.total_amount, Some(usd(3200)));
    }

    #[test]
    fn huge_quantities_saturate() {
        let cart = project(
            Some(&priced_snapshot()),
            &[
                queued(1, PendingIntent::update_line(LineId::new("l1"), i64::MAX)),
                queued(2, PendingIntent::update_line(LineId::new("l2"), i64::MAX)),
                queued(3, PendingIntent::add_line(MerchandiseId::new("m1"), 5)),
            ],
        );
        assert_eq!(cart.line(&LineId::new("l1")).unwrap().line.quantity, u32::MAX);
        assert_eq!(cart.total_quantity, u32::MAX);
        assert_eq!(cart.quantity_of(&MerchandiseId::new("m1")), u32::MAX);
        assert_eq!(cart.cost.subtotal_amount, Some(usd(1500 * i64::from(u32::MAX))));
    }

    #[test]
    fn huge_amounts_saturate() {
        let mut snapshot =
            CartSnapshot::with_lines(vec![line("l1", "m1", 1).with_unit_price(usd(i64::MAX))]);
        snapshot.cost = CartCost {
            subtotal_amount: Some(usd(1)),
            total_amount: Some(usd(i64::MAX)),
        };
        let cart = project(
            Some(&snapshot),
            &[queued(1, PendingIntent::update_line(LineId::new("l1"), 2))],
        );
        assert_eq!(cart.cost.subtotal_amount, Some(usd(i64::MAX)));
        assert_eq!(cart.cost.total_amount, Some(usd(i64::MAX)));
    }

    #[test]
    fn unknown_price_blanks_cost() {
        let cart = project(
            Some(&priced_snapshot()),
            &[queued(1, PendingIntent::add_line(MerchandiseId::new("m3"), 1))],
        );
        assert_eq!(cart.cost, CartCost::default());
    }
}
