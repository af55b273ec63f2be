#![forbid(unsafe_code)]

//! Search request parameters.

use serde::{Deserialize, Serialize};
use shopfront_core::config::StorefrontConfig;
use url::form_urlencoded;

/// A predictive search request: `GET {action}?q=..&limit=..&predictive=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictiveQuery {
    pub q: String,
    pub limit: u32,
    pub predictive: bool,
}

impl PredictiveQuery {
    /// Predictive query for `term`, trimmed.
    #[must_use]
    pub fn new(term: &str, limit: u32) -> Self {
        Self {
            q: term.trim().to_owned(),
            limit,
            predictive: true,
        }
    }

    /// Query using the configured limit.
    #[must_use]
    pub fn from_config(term: &str, config: &StorefrontConfig) -> Self {
        Self::new(term, config.predictive_limit)
    }

    /// Whether there is nothing to search for.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.q.is_empty()
    }

    /// Form-encoded query string, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.q)
            .append_pair("limit", &self.limit.to_string())
            .append_pair("predictive", if self.predictive { "true" } else { "false" })
            .finish()
    }

    /// Full request target for `action`, e.g. `/search?q=hat&limit=5&predictive=true`.
    #[must_use]
    pub fn request_target(&self, action: &str) -> String {
        format!("{action}?{}", self.to_query_string())
    }
}
