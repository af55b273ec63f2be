#![forbid(unsafe_code)]

//! Intent queue and reconciliation against confirmed snapshots.
//!
//! [`CartQueue`] owns the last confirmed [`CartSnapshot`] and the pending
//! intents in submission order. Transport outcomes only ever touch the
//! queue; the rendered cart is always re-derived with
//! [`project`](crate::projection::project).
//!
//! # Ordering model
//!
//! The API applies cart mutations in the order it receives them, so the
//! snapshot returned for intent `n` already reflects every intent before it.
//! Responses may still arrive out of order on the client:
//!
//! ```text
//!   submit #1 ─┐   submit #2 ─┐
//!              │              └─▶ confirm #2 (snapshot S2)  → confirmed = S2, drop #1..#2
//!              └─────────────────▶ confirm #1 (snapshot S1)  → stale, S1 discarded
//! ```
//!
//! # Invariants
//!
//! 1. Pending intents are kept in strictly increasing id order.
//! 2. The confirmed watermark never moves backwards; a confirmation at or
//!    below it cannot replace the confirmed snapshot.
//! 3. After `confirm(n, _)` no intent `<= n` is pending.
//! 4. After `fail(n)` the projection equals the projection of the same queue
//!    without `n`.
//! 5. A refresh ticket records the last id submitted before it; completing
//!    it settles every intent up to that id and leaves later ones pending.

use tracing::{debug, debug_span, warn};

use crate::intent::{IntentId, PendingIntent, QueuedIntent};
use crate::projection::{ProjectedCart, project};
use crate::snapshot::CartSnapshot;

/// Outcome of [`CartQueue::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The snapshot became the confirmed state; `dequeued` intents were
    /// settled by it.
    Applied { dequeued: usize },
    /// A newer confirmation already landed; the snapshot was discarded.
    Stale,
    /// The id was never handed out by this queue.
    Unknown,
}

/// Token for a plain cart fetch started with [`CartQueue::begin_refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    epoch: u64,
    through: u64,
}

/// Confirmed cart state plus the pending intents layered on it.
#[derive(Debug, Clone, Default)]
pub struct CartQueue {
    confirmed: Option<CartSnapshot>,
    confirmed_through: Option<IntentId>,
    /// Bumped every time `confirmed` is replaced.
    epoch: u64,
    next_id: u64,
    pending: Vec<QueuedIntent>,
}

impl CartQueue {
    /// A queue with no cart yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue starting from a fetched snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            confirmed: Some(snapshot),
            ..Self::default()
        }
    }

    /// Last confirmed snapshot, if any.
    #[must_use]
    pub fn confirmed(&self) -> Option<&CartSnapshot> {
        self.confirmed.as_ref()
    }

    /// Pending intents in submission order.
    #[must_use]
    pub fn pending(&self) -> &[QueuedIntent] {
        &self.pending
    }

    /// True when nothing is awaiting a response.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue an intent; returns the id its response must be reported under.
    pub fn submit(&mut self, intent: PendingIntent) -> IntentId {
        self.next_id += 1;
        let id = IntentId(self.next_id);
        debug!(intent = %id, kind = intent.kind(), pending = self.pending.len() + 1, "cart intent submitted");
        self.pending.push(QueuedIntent::new(id, intent));
        id
    }

    /// Report a successful mutation and the snapshot the API returned.
    pub fn confirm(&mut self, id: IntentId, snapshot: CartSnapshot) -> Reconciliation {
        let _span = debug_span!("cart.reconcile", intent = %id).entered();
        if id.0 == 0 || id.0 > self.next_id {
            warn!(intent = %id, "confirmation for unknown cart intent");
            return Reconciliation::Unknown;
        }
        if self.confirmed_through.is_some_and(|watermark| id <= watermark) {
            self.pending.retain(|q| q.id != id);
            debug!(intent = %id, "stale cart confirmation discarded");
            return Reconciliation::Stale;
        }

        let before = self.pending.len();
        self.pending.retain(|q| q.id > id);
        let dequeued = before - self.pending.len();
        self.confirmed = Some(snapshot);
        self.confirmed_through = Some(id);
        self.epoch += 1;
        debug!(intent = %id, dequeued, pending = self.pending.len(), "cart intent confirmed");
        Reconciliation::Applied { dequeued }
    }

    /// Report a failed mutation; its effect disappears from the projection.
    ///
    /// Returns whether the intent was still pending.
    pub fn fail(&mut self, id: IntentId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|q| q.id != id);
        let removed = self.pending.len() != before;
        if removed {
            warn!(intent = %id, pending = self.pending.len(), "cart intent failed; rolled back");
        }
        removed
    }

    /// Start a plain cart fetch.
    ///
    /// The fetch is sent after every intent submitted so far, so its
    /// snapshot already reflects them.
    #[must_use]
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            epoch: self.epoch,
            through: self.next_id,
        }
    }

    /// Finish a plain cart fetch.
    ///
    /// The snapshot is accepted only if no confirmation landed since the
    /// ticket was issued. An accepted snapshot settles every intent
    /// submitted before the ticket; later intents stay layered on top.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, snapshot: CartSnapshot) -> bool {
        if ticket.epoch != self.epoch {
            debug!(ticket_epoch = ticket.epoch, epoch = self.epoch, "stale cart refresh discarded");
            return false;
        }
        let before = self.pending.len();
        self.pending.retain(|q| q.id.0 > ticket.through);
        let dequeued = before - self.pending.len();
        if ticket.through > 0 {
            let through = IntentId(ticket.through);
            self.confirmed_through = Some(self.confirmed_through.map_or(through, |w| w.max(through)));
        }
        self.confirmed = Some(snapshot);
        self.epoch += 1;
        debug!(dequeued, pending = self.pending.len(), "cart refreshed");
        true
    }

    /// The cart to render now.
    #[must_use]
    pub fn projection(&self) -> ProjectedCart {
        project(self.confirmed.as_ref(), &self.pending)
    }
}
