#![forbid(unsafe_code)]

//! Internal vs external link classification.
//!
//! Menu URLs come back from the API as absolute URLs on whatever domain the
//! merchant entered. A URL whose host contains one of the shop's own domains
//! is rendered as an in-app link to its path; anything else opens in a new
//! tab.
//!
//! # Example
//!
//! ```
//! use shopfront_nav::link::{InternalDomains, LinkTarget, classify};
//!
//! let domains = InternalDomains::new("myshopify.com", "", "https://example.myshopify.com");
//! assert_eq!(
//!     classify("https://example.myshopify.com/pages/about", &domains),
//!     LinkTarget::Internal { path: "/pages/about".into() },
//! );
//! assert!(classify("https://otherstore.com/x", &domains).is_external());
//! ```

use shopfront_core::config::StorefrontConfig;
use url::Url;

/// Where a link should take the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// Same-site navigation to `path`.
    Internal { path: String },
    /// Off-site link, rendered as a new-tab anchor with `url` unchanged.
    External { url: String },
}

impl LinkTarget {
    /// Whether the link leaves the storefront.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, LinkTarget::External { .. })
    }

    /// The `href` to render.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            LinkTarget::Internal { path } => path,
            LinkTarget::External { url } => url,
        }
    }
}

/// Host fragments that mark a link as belonging to this shop.
///
/// Empty fragments are dropped so they never match every host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternalDomains {
    fragments: Vec<String>,
}

impl InternalDomains {
    /// Build from the platform domain, public store domain, and primary
    /// domain URL.
    #[must_use]
    pub fn new(platform_domain: &str, public_store_domain: &str, primary_domain_url: &str) -> Self {
        let fragments = [
            normalize(platform_domain),
            normalize(public_store_domain),
            normalize(primary_domain_url),
        ]
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect();
        Self { fragments }
    }

    /// Build from the storefront configuration.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(
            &config.commerce_platform_domain,
            &config.public_store_domain,
            &config.primary_domain_url,
        )
    }

    /// Whether `host` belongs to the shop.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.fragments.iter().any(|f| host.contains(f.as_str()))
    }
}

/// Reduce a configured domain or URL to a lowercase host fragment.
fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if raw.contains("://")
        && let Ok(url) = Url::parse(raw)
        && let Some(host) = url.host_str()
    {
        return host.to_ascii_lowercase();
    }
    raw.trim_end_matches('/').to_ascii_lowercase()
}

/// Classify a menu link.
///
/// Relative paths are internal as-is. Absolute URLs are internal when their
/// host contains one of `domains`, and are then reduced to their path.
/// Anything that does not parse as a URL is treated as external.
#[must_use]
pub fn classify(link: &str, domains: &InternalDomains) -> LinkTarget {
    let link = link.trim();
    if link.starts_with('/') && !link.starts_with("//") {
        return LinkTarget::Internal {
            path: link.to_owned(),
        };
    }

    let parsed = if link.starts_with("//") {
        Url::parse(&format!("https:{link}"))
    } else {
        Url::parse(link)
    };

    match parsed {
        Ok(url) if url.host_str().is_some_and(|h| domains.matches_host(h)) => {
            LinkTarget::Internal {
                path: url.path().to_owned(),
            }
        }
        _ => LinkTarget::External {
            url: link.to_owned(),
        },
    }
}
