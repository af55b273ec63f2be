#![forbid(unsafe_code)]

//! Search result models.
//!
//! Both result kinds follow the same convention: `total` is the sum of the
//! item list lengths, and an empty result (no query in flight, blank term,
//! failed request) is a value rather than an absent one.
//!
//! API payloads are read through private wire structs and normalized into
//! [`SearchItem`]s whose `url` already carries the tracking parameters.

use serde::{Deserialize, Serialize};
use shopfront_core::money::Money;

use crate::error::SearchError;
use crate::tracking::url_with_tracking_params;

/// Image attached to a result item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// An article, collection, page, or product hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: String,
    pub title: String,
    /// Storefront path including tracking parameters.
    pub url: String,
    #[serde(default)]
    pub image: Option<SearchImage>,
    #[serde(default)]
    pub price: Option<Money>,
}

/// A suggested query completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySuggestion {
    pub text: String,
    pub styled_text: String,
    pub url: String,
}

/// Predictive hits grouped by resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictiveItems {
    pub articles: Vec<SearchItem>,
    pub collections: Vec<SearchItem>,
    pub pages: Vec<SearchItem>,
    pub products: Vec<SearchItem>,
    pub queries: Vec<QuerySuggestion>,
}

impl PredictiveItems {
    /// Number of hits across every group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
            + self.collections.len()
            + self.pages.len()
            + self.products.len()
            + self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize the API `predictiveSearch` object for `term`. `null` yields
    /// no items.
    pub fn from_api_json(json: &str, term: &str) -> Result<Self, SearchError> {
        let raw: Option<RawPredictive> = serde_json::from_str(json)?;
        Ok(raw.map(|raw| raw.normalize(term)).unwrap_or_default())
    }
}

/// Predictive search state shown in the search panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictiveSearchResult {
    pub items: PredictiveItems,
    pub total: usize,
}

impl PredictiveSearchResult {
    /// The empty sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap `items`, deriving `total`.
    #[must_use]
    pub fn from_items(items: PredictiveItems) -> Self {
        let total = items.len();
        Self { items, total }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Full-page search hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItems {
    pub articles: Vec<SearchItem>,
    pub pages: Vec<SearchItem>,
    pub products: Vec<SearchItem>,
}

impl SearchItems {
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len() + self.pages.len() + self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize the API `articles`/`pages`/`products` connections for `term`.
    pub fn from_api_json(json: &str, term: &str) -> Result<Self, SearchError> {
        let raw: RawRegular = serde_json::from_str(json)?;
        Ok(raw.normalize(term))
    }
}

/// Full-page search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub term: String,
    pub items: SearchItems,
    pub total: usize,
}

impl SearchResult {
    /// The empty sentinel for `term`.
    #[must_use]
    pub fn empty(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_items(term: impl Into<String>, items: SearchItems) -> Self {
        let total = items.len();
        Self {
            term: term.into(),
            items,
            total,
        }
    }
}

// ── Wire format ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawHandle {
    handle: String,
}

#[derive(Deserialize)]
struct RawVariant {
    #[serde(default)]
    image: Option<SearchImage>,
    #[serde(default)]
    price: Option<Money>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResource {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    tracking_parameters: Option<String>,
    #[serde(default)]
    image: Option<SearchImage>,
    #[serde(default)]
    blog: Option<RawHandle>,
    #[serde(default)]
    selected_or_first_available_variant: Option<RawVariant>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuery {
    text: String,
    #[serde(default)]
    styled_text: String,
    #[serde(default)]
    tracking_parameters: Option<String>,
}

#[derive(Deserialize)]
struct RawPredictive {
    #[serde(default)]
    articles: Vec<RawResource>,
    #[serde(default)]
    collections: Vec<RawResource>,
    #[serde(default)]
    pages: Vec<RawResource>,
    #[serde(default)]
    products: Vec<RawResource>,
    #[serde(default)]
    queries: Vec<RawQuery>,
}

#[derive(Deserialize)]
struct RawConnection {
    #[serde(default)]
    nodes: Vec<RawResource>,
}

#[derive(Deserialize)]
struct RawRegular {
    #[serde(default)]
    articles: Option<RawConnection>,
    #[serde(default)]
    pages: Option<RawConnection>,
    #[serde(default)]
    products: Option<RawConnection>,
}

#[derive(Clone, Copy)]
enum ResourceKind {
    Article,
    Collection,
    Page,
    Product,
}

impl RawResource {
    fn into_item(self, kind: ResourceKind, term: &str) -> SearchItem {
        let base = match kind {
            ResourceKind::Article => match &self.blog {
                Some(blog) => format!("/blogs/{}/{}", blog.handle, self.handle),
                None => format!("/blogs/{}", self.handle),
            },
            ResourceKind::Collection => format!("/collections/{}", self.handle),
            ResourceKind::Page => format!("/pages/{}", self.handle),
            ResourceKind::Product => format!("/products/{}", self.handle),
        };
        let url = url_with_tracking_params(&base, &[], term, self.tracking_parameters.as_deref());
        let (variant_image, price) = match self.selected_or_first_available_variant {
            Some(variant) => (variant.image, variant.price),
            None => (None, None),
        };
        SearchItem {
            id: self.id,
            title: self.title,
            url,
            image: self.image.or(variant_image),
            price,
        }
    }
}

fn normalize_all(raw: Vec<RawResource>, kind: ResourceKind, term: &str) -> Vec<SearchItem> {
    raw.into_iter().map(|r| r.into_item(kind, term)).collect()
}

impl RawPredictive {
    fn normalize(self, term: &str) -> PredictiveItems {
        PredictiveItems {
            articles: normalize_all(self.articles, ResourceKind::Article, term),
            collections: normalize_all(self.collections, ResourceKind::Collection, term),
            pages: normalize_all(self.pages, ResourceKind::Page, term),
            products: normalize_all(self.products, ResourceKind::Product, term),
            queries: self
                .queries
                .into_iter()
                .map(|q| QuerySuggestion {
                    url: url_with_tracking_params(
                        "/search",
                        &[],
                        &q.text,
                        q.tracking_parameters.as_deref(),
                    ),
                    text: q.text,
                    styled_text: q.styled_text,
                })
                .collect(),
        }
    }
}

impl RawRegular {
    fn normalize(self, term: &str) -> SearchItems {
        let nodes = |c: Option<RawConnection>| c.map(|c| c.nodes).unwrap_or_default();
        SearchItems {
            articles: normalize_all(nodes(self.articles), ResourceKind::Article, term),
            pages: normalize_all(nodes(self.pages), ResourceKind::Page, term),
            products: normalize_all(nodes(self.products), ResourceKind::Product, term),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PREDICTIVE_JSON: &str = r#"{
        "articles": [
            {"id": "gid://shopify/Article/1", "title": "Waxing 101", "handle": "waxing-101",
             "blog": {"handle": "journal"}, "trackingParameters": "_pos=1&_sid=a1"}
        ],
        "collections": [],
        "pages": [
            {"id": "gid://shopify/Page/2", "title": "Snow care", "handle": "snow-care"}
        ],
        "products": [
            {"id": "gid://shopify/Product/3", "title": "Snowboard", "handle": "snowboard",
             "trackingParameters": "_pos=1&_sid=p3",
             "selectedOrFirstAvailableVariant": {
                "image": {"url": "https://cdn.example.com/board.png", "altText": null},
                "price": {"amount": "629.95", "currencyCode": "CAD"}
             }}
        ],
        "queries": [
            {"text": "snowboard", "styledText": "<mark>snow</mark>board", "trackingParameters": "_sid=q"}
        ]
    }"#;

    #[test]
    fn predictive_payload_normalizes() {
        let items = PredictiveItems::from_api_json(PREDICTIVE_JSON, "snow").unwrap();
        let result = PredictiveSearchResult::from_items(items);
        assert_eq!(result.total, 4);

        let items = &result.items;
        assert_eq!(items.articles[0].url, "/blogs/journal/waxing-101?q=snow&_pos=1&_sid=a1");
        assert_eq!(items.pages[0].url, "/pages/snow-care?q=snow");
        assert_eq!(items.products[0].url, "/products/snowboard?q=snow&_pos=1&_sid=p3");
        assert_eq!(
            items.products[0].price,
            Some(Money::from_minor(62995, "CAD"))
        );
        assert_eq!(
            items.products[0].image.as_ref().map(|i| i.url.as_str()),
            Some("https://cdn.example.com/board.png")
        );
        assert_eq!(items.queries[0].url, "/search?q=snowboard&_sid=q");
    }

    #[test]
    fn null_predictive_payload_is_empty() {
        let items = PredictiveItems::from_api_json("null", "x").unwrap();
        assert!(items.is_empty());
        assert_eq!(PredictiveSearchResult::from_items(items), PredictiveSearchResult::empty());
    }

    #[test]
    fn regular_search_counts_nodes() {
        let json = r#"{
            "articles": {"nodes": []},
            "pages": null,
            "products": {"nodes": [
                {"id": "p1", "title": "Hat", "handle": "hat"},
                {"id": "p2", "title": "Cap", "handle": "cap"}
            ]}
        }"#;
        let result = SearchResult::from_items("hat", SearchItems::from_api_json(json, "hat").unwrap());
        assert_eq!(result.total, 2);
        assert_eq!(result.term, "hat");
        assert_eq!(result.items.products[1].url, "/products/cap?q=hat");
    }

    #[test]
    fn empty_sentinels() {
        let regular = SearchResult::empty("");
        assert_eq!(regular.total, 0);
        assert!(regular.items.is_empty());
        assert!(PredictiveSearchResult::empty().is_empty());
    }

    #[test]
    fn malformed_payload_is_error() {
        assert!(matches!(
            PredictiveItems::from_api_json(r#"{"products": 3}"#, "x"),
            Err(SearchError::Json(_))
        ));
    }
}
