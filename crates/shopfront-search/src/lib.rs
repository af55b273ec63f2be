#![forbid(unsafe_code)]

//! Search: predictive search-as-you-type and full-page results.
//!
//! # Role in Shopfront
//! The search panel shows grouped hits while the shopper types. This crate
//! models the query, the normalized results, and the latest-wins state the
//! panel renders from ([`PredictiveSearch`]). Requests themselves are made
//! by the host.

pub mod error;
pub mod fetcher;
pub mod query;
pub mod results;
pub mod tracking;

pub use error::SearchError;
pub use fetcher::{Completion, FetchState, PREDICTIVE_SEARCH_KEY, PredictiveSearch, SearchTicket};
pub use query::PredictiveQuery;
pub use results::{
    PredictiveItems, PredictiveSearchResult, QuerySuggestion, SearchImage, SearchItem,
    SearchItems, SearchResult,
};
pub use tracking::url_with_tracking_params;
