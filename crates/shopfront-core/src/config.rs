#![forbid(unsafe_code)]

//! Storefront configuration.
//!
//! Captures the shop's domains (used to tell internal links from external
//! ones) and the predictive-search tuning as a single [`StorefrontConfig`]
//! that can be loaded from TOML and overridden from the environment.
//!
//! # Loading
//!
//! ```toml
//! # shopfront.toml
//! public_store_domain = "example.com"
//! primary_domain_url = "https://example.com"
//! predictive_limit = 8
//! ```
//!
//! ```rust,ignore
//! let config = StorefrontConfig::from_toml_file("shopfront.toml")?
//!     .with_env_overrides()?;
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Description |
//! |----------|------|-------------|
//! | `SHOPFRONT_PUBLIC_STORE_DOMAIN` | string | Public storefront domain |
//! | `SHOPFRONT_PRIMARY_DOMAIN_URL` | string | Primary domain URL |
//! | `SHOPFRONT_PREDICTIVE_LIMIT` | u32 | Items per predictive result type |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Domain every hosted shop is reachable under.
pub const DEFAULT_COMMERCE_PLATFORM_DOMAIN: &str = "myshopify.com";

/// Default number of predictive results per result type.
pub const DEFAULT_PREDICTIVE_LIMIT: u32 = 5;

/// Smallest accepted predictive limit.
pub const MIN_PREDICTIVE_LIMIT: u32 = 1;

/// Largest accepted predictive limit (the API caps it at 25).
pub const MAX_PREDICTIVE_LIMIT: u32 = 25;

/// Route that serves both full-page and predictive search.
pub const DEFAULT_SEARCH_ACTION: &str = "/search";

const ENV_PUBLIC_STORE_DOMAIN: &str = "SHOPFRONT_PUBLIC_STORE_DOMAIN";
const ENV_PRIMARY_DOMAIN_URL: &str = "SHOPFRONT_PRIMARY_DOMAIN_URL";
const ENV_PREDICTIVE_LIMIT: &str = "SHOPFRONT_PREDICTIVE_LIMIT";

/// Top-level storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Platform domain shared by all hosted shops.
    pub commerce_platform_domain: String,

    /// Domain the storefront is publicly served from.
    pub public_store_domain: String,

    /// The shop's configured primary domain, as a URL.
    pub primary_domain_url: String,

    /// Items requested per predictive result type.
    pub predictive_limit: u32,

    /// Search route path.
    pub search_action: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            commerce_platform_domain: DEFAULT_COMMERCE_PLATFORM_DOMAIN.to_owned(),
            public_store_domain: String::new(),
            primary_domain_url: String::new(),
            predictive_limit: DEFAULT_PREDICTIVE_LIMIT,
            search_action: DEFAULT_SEARCH_ACTION.to_owned(),
        }
    }
}

impl StorefrontConfig {
    /// Set the public store domain.
    #[must_use]
    pub fn with_public_store_domain(mut self, domain: impl Into<String>) -> Self {
        self.public_store_domain = domain.into();
        self
    }

    /// Set the primary domain URL.
    #[must_use]
    pub fn with_primary_domain_url(mut self, url: impl Into<String>) -> Self {
        self.primary_domain_url = url.into();
        self
    }

    /// Set the predictive limit.
    #[must_use]
    pub fn with_predictive_limit(mut self, limit: u32) -> Self {
        self.predictive_limit = limit;
        self
    }

    /// Load from a TOML string. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        Ok(config.validated())
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded storefront config");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `SHOPFRONT_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(domain) = lookup(ENV_PUBLIC_STORE_DOMAIN) {
            self.public_store_domain = domain;
        }
        if let Some(url) = lookup(ENV_PRIMARY_DOMAIN_URL) {
            self.primary_domain_url = url;
        }
        if let Some(raw) = lookup(ENV_PREDICTIVE_LIMIT) {
            self.predictive_limit = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_PREDICTIVE_LIMIT,
                value: raw.clone(),
            })?;
        }
        Ok(self.validated())
    }

    /// Clamp values to supported ranges.
    ///
    /// - `predictive_limit` clamped to 1..=25
    /// - an empty `search_action` falls back to `/search`
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.predictive_limit = self
            .predictive_limit
            .clamp(MIN_PREDICTIVE_LIMIT, MAX_PREDICTIVE_LIMIT);
        if self.search_action.trim().is_empty() {
            self.search_action = DEFAULT_SEARCH_ACTION.to_owned();
        }
        self
    }
}
