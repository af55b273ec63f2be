#![forbid(unsafe_code)]

//! Optimistic cart: snapshots, intents, projection, and reconciliation.
//!
//! # Role in Shopfront
//! Cart mutations round-trip through the Storefront API, but the cart drawer
//! should react immediately. This crate keeps the last confirmed
//! [`CartSnapshot`] and a queue of [`PendingIntent`]s, and derives the cart to
//! render with the pure [`project`] function.
//!
//! # Example
//!
//! ```
//! use shopfront_cart::{CartQueue, MerchandiseId, PendingIntent};
//!
//! let mut queue = CartQueue::new();
//! let id = queue.submit(PendingIntent::add_line(MerchandiseId::new("gid://shopify/ProductVariant/1"), 2));
//! assert_eq!(queue.projection().total_quantity, 2);
//!
//! // The API rejected the mutation: the projection reverts on the next read.
//! queue.fail(id);
//! assert_eq!(queue.projection().total_quantity, 0);
//! ```

pub mod error;
pub mod intent;
pub mod projection;
pub mod queue;
pub mod snapshot;

pub use error::CartError;
pub use intent::{IntentId, PendingIntent, QueuedIntent, VariantSelection};
pub use projection::{ProjectedCart, ProjectedLine, project};
pub use queue::{CartQueue, Reconciliation, RefreshTicket};
pub use snapshot::{Attribute, CartCost, CartLine, CartSnapshot, LineId, MerchandiseId};
