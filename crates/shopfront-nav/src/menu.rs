#![forbid(unsafe_code)]

//! Menu tree model and resolution into renderable links.
//!
//! The API returns `menu(handle:)` as `{id, items: [{id, title, url, type,
//! resourceId, items}]}` or `null` when the merchant has no such menu.
//! [`resolve`] turns that tree into [`NavLink`]s with every URL classified;
//! [`resolve_or_fallback`] substitutes the static menus when the API gave
//! nothing usable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MenuError;
use crate::fallback::{footer_fallback_menu, header_fallback_menu};
use crate::link::{InternalDomains, LinkTarget, classify};

/// Resource kind a menu item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuItemType {
    Article,
    Blog,
    Catalog,
    Collection,
    Collections,
    Frontpage,
    Http,
    Page,
    Product,
    Search,
    ShopPolicy,
    #[serde(other)]
    Other,
}

/// One node of a menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub item_type: MenuItemType,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Parse the API `menu` field. `null` yields `Ok(None)`.
    pub fn from_api_json(json: &str) -> Result<Option<Self>, MenuError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Which menu slot is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Header,
    Footer,
}

impl MenuKind {
    /// The static menu used when the API has none.
    #[must_use]
    pub fn fallback(self) -> Menu {
        match self {
            MenuKind::Header => header_fallback_menu(),
            MenuKind::Footer => footer_fallback_menu(),
        }
    }
}

/// A resolved, renderable menu link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub id: String,
    pub title: String,
    pub target: LinkTarget,
    pub children: Vec<NavLink>,
}

impl NavLink {
    /// External links render with `target="_blank"`.
    #[must_use]
    pub fn opens_in_new_tab(&self) -> bool {
        self.target.is_external()
    }
}

/// Resolve every item of `menu`. Items without a URL are dropped along with
/// their children.
#[must_use]
pub fn resolve(menu: &Menu, domains: &InternalDomains) -> Vec<NavLink> {
    resolve_items(&menu.items, domains)
}

fn resolve_items(items: &[MenuItem], domains: &InternalDomains) -> Vec<NavLink> {
    items
        .iter()
        .filter_map(|item| {
            let url = item.url.as_deref().filter(|u| !u.trim().is_empty())?;
            Some(NavLink {
                id: item.id.clone(),
                title: item.title.clone(),
                target: classify(url, domains),
                children: resolve_items(&item.items, domains),
            })
        })
        .collect()
}

/// Resolve `menu`, or the static menu for `kind` when `menu` is absent or
/// resolves to nothing.
#[must_use]
pub fn resolve_or_fallback(
    menu: Option<&Menu>,
    kind: MenuKind,
    domains: &InternalDomains,
) -> Vec<NavLink> {
    if let Some(menu) = menu {
        let links = resolve(menu, domains);
        if !links.is_empty() {
            return links;
        }
    }
    debug!(?kind, "menu missing or empty; using fallback");
    resolve(&kind.fallback(), domains)
}
