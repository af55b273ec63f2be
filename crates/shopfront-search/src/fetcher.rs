#![forbid(unsafe_code)]

//! Latest-wins coordination for search-as-you-type.
//!
//! Every keystroke submits a new query under one shared request key. The
//! host performs the request and hands the response back with the
//! [`SearchTicket`] it was issued; only the ticket of the newest submission
//! can change what the panel shows.
//!
//! # Invariants
//!
//! - A response whose ticket is not the latest generation is discarded.
//! - While detached (search panel closed) every response is discarded.
//! - A failed request leaves the panel showing the empty result, never an
//!   error.
//! - A blank term shows the empty result without issuing a request.
//!
//! # Example
//!
//! ```
//! use shopfront_search::{Completion, PredictiveItems, PredictiveSearch};
//!
//! let search = PredictiveSearch::new(5);
//! let first = search.submit("sn").unwrap();
//! let second = search.submit("snow").unwrap();
//!
//! assert_eq!(search.complete(&first, Ok(PredictiveItems::default())), Completion::Superseded);
//! assert_eq!(search.complete(&second, Ok(PredictiveItems::default())), Completion::Applied);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use shopfront_core::config::StorefrontConfig;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::query::PredictiveQuery;
use crate::results::{PredictiveItems, PredictiveSearchResult};

/// Request key shared by every predictive search handle in a session.
pub const PREDICTIVE_SEARCH_KEY: &str = "search";

/// Where the panel's result currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested.
    Idle,
    /// A request for the current term is outstanding.
    Loading,
    /// The current term's response (or its failure) has arrived.
    Loaded,
}

/// What happened to a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response is now the displayed result.
    Applied,
    /// A newer submission exists; the response was dropped.
    Superseded,
    /// The panel was closed; the response was dropped.
    Detached,
}

/// Issued for each submitted query; return it with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: PredictiveQuery,
}

impl SearchTicket {
    /// The query to send.
    #[must_use]
    pub fn query(&self) -> &PredictiveQuery {
        &self.query
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct FetcherInner {
    limit: u32,
    generation: u64,
    attached: bool,
    term: String,
    state: FetchState,
    result: PredictiveSearchResult,
}

/// Shared handle to the predictive search state. Clones observe and drive
/// the same request key.
#[derive(Debug, Clone)]
pub struct PredictiveSearch {
    inner: Rc<RefCell<FetcherInner>>,
}

impl PredictiveSearch {
    /// Create an attached fetcher requesting up to `limit` hits per group.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FetcherInner {
                limit,
                generation: 0,
                attached: true,
                term: String::new(),
                state: FetchState::Idle,
                result: PredictiveSearchResult::empty(),
            })),
        }
    }

    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.predictive_limit)
    }

    /// Submit `term`, superseding any outstanding request.
    ///
    /// Returns `None` for a blank term: the result resets to empty and no
    /// request should be made. Submitting re-attaches a detached fetcher.
    pub fn submit(&self, term: &str) -> Option<SearchTicket> {
        let mut inner = self.inner.borrow_mut();
        inner.generation += 1;
        inner.attached = true;
        let query = PredictiveQuery::new(term, inner.limit);
        inner.term.clone_from(&query.q);
        if query.is_blank() {
            inner.state = FetchState::Idle;
            inner.result = PredictiveSearchResult::empty();
            debug!(generation = inner.generation, "blank predictive term; reset");
            return None;
        }
        inner.state = FetchState::Loading;
        debug!(
            key = PREDICTIVE_SEARCH_KEY,
            generation = inner.generation,
            term = %query.q,
            "predictive search submitted"
        );
        Some(SearchTicket {
            generation: inner.generation,
            query,
        })
    }

    /// Deliver the outcome of the request `ticket` was issued for.
    pub fn complete(
        &self,
        ticket: &SearchTicket,
        outcome: Result<PredictiveItems, SearchError>,
    ) -> Completion {
        let mut inner = self.inner.borrow_mut();
        if !inner.attached {
            debug!(generation = ticket.generation, "predictive response after detach dropped");
            return Completion::Detached;
        }
        if ticket.generation != inner.generation {
            debug!(
                generation = ticket.generation,
                latest = inner.generation,
                "superseded predictive response dropped"
            );
            return Completion::Superseded;
        }
        inner.result = match outcome {
            Ok(items) => PredictiveSearchResult::from_items(items),
            Err(err) => {
                warn!(term = %ticket.query.q, error = %err, "predictive search failed; showing no results");
                PredictiveSearchResult::empty()
            }
        };
        inner.state = FetchState::Loaded;
        Completion::Applied
    }

    /// Stop accepting responses and clear the panel state.
    pub fn detach(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.attached {
            return;
        }
        inner.attached = false;
        inner.generation += 1;
        inner.term.clear();
        inner.state = FetchState::Idle;
        inner.result = PredictiveSearchResult::empty();
        debug!(generation = inner.generation, "predictive search detached");
    }

    /// Accept responses again.
    pub fn attach(&self) {
        self.inner.borrow_mut().attached = true;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().attached
    }

    /// The term of the latest submission.
    #[must_use]
    pub fn term(&self) -> String {
        self.inner.borrow().term.clone()
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        self.inner.borrow().state
    }

    /// The result the panel should render.
    #[must_use]
    pub fn result(&self) -> PredictiveSearchResult {
        self.inner.borrow().result.clone()
    }
}
