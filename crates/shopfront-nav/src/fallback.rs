#![forbid(unsafe_code)]

//! Static menus used when the shop has no header or footer menu.
//!
//! Identifiers and URLs match the storefront template's built-in menus.

use crate::menu::{Menu, MenuItem, MenuItemType};

/// Id of the fallback header menu.
pub const HEADER_FALLBACK_MENU_ID: &str = "gid://shopify/Menu/199655587896";

/// Id of the fallback footer menu.
pub const FOOTER_FALLBACK_MENU_ID: &str = "gid://shopify/Menu/199655620664";

fn item(
    id: &str,
    title: &str,
    url: &str,
    item_type: MenuItemType,
    resource_id: Option<&str>,
) -> MenuItem {
    MenuItem {
        id: id.to_owned(),
        title: title.to_owned(),
        url: Some(url.to_owned()),
        item_type,
        resource_id: resource_id.map(str::to_owned),
        tags: Vec::new(),
        items: Vec::new(),
    }
}

/// Collections / Blog / Policies / About.
#[must_use]
pub fn header_fallback_menu() -> Menu {
    Menu {
        id: HEADER_FALLBACK_MENU_ID.to_owned(),
        items: vec![
            item(
                "gid://shopify/MenuItem/461609500728",
                "Collections",
                "/collections",
                MenuItemType::Http,
                None,
            ),
            item(
                "gid://shopify/MenuItem/461609533496",
                "Blog",
                "/blogs/journal",
                MenuItemType::Http,
                None,
            ),
            item(
                "gid://shopify/MenuItem/461609566264",
                "Policies",
                "/policies",
                MenuItemType::Http,
                None,
            ),
            item(
                "gid://shopify/MenuItem/461609599032",
                "About",
                "/pages/about",
                MenuItemType::Page,
                Some("gid://shopify/Page/92591030328"),
            ),
        ],
    }
}

/// The four shop policy links.
#[must_use]
pub fn footer_fallback_menu() -> Menu {
    Menu {
        id: FOOTER_FALLBACK_MENU_ID.to_owned(),
        items: vec![
            item(
                "gid://shopify/MenuItem/461633060920",
                "Privacy Policy",
                "/policies/privacy-policy",
                MenuItemType::ShopPolicy,
                Some("gid://shopify/ShopPolicy/23358046264"),
            ),
            item(
                "gid://shopify/MenuItem/461633093688",
                "Refund Policy",
                "/policies/refund-policy",
                MenuItemType::ShopPolicy,
                Some("gid://shopify/ShopPolicy/23358013496"),
            ),
            item(
                "gid://shopify/MenuItem/461633126456",
                "Shipping Policy",
                "/policies/shipping-policy",
                MenuItemType::ShopPolicy,
                Some("gid://shopify/ShopPolicy/23358111800"),
            ),
            item(
                "gid://shopify/MenuItem/461633159224",
                "Terms of Service",
                "/policies/terms-of-service",
                MenuItemType::ShopPolicy,
                Some("gid://shopify/ShopPolicy/23358079032"),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_fallback_is_verbatim() {
        let menu = header_fallback_menu();
        assert_eq!(menu.id, "gid://shopify/Menu/199655587896");
        let entries: Vec<_> = menu
            .items
            .iter()
            .map(|i| (i.id.as_str(), i.title.as_str(), i.url.as_deref().unwrap()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("gid://shopify/MenuItem/461609500728", "Collections", "/collections"),
                ("gid://shopify/MenuItem/461609533496", "Blog", "/blogs/journal"),
                ("gid://shopify/MenuItem/461609566264", "Policies", "/policies"),
                ("gid://shopify/MenuItem/461609599032", "About", "/pages/about"),
            ]
        );
    }

    #[test]
    fn footer_fallback_is_policies() {
        let menu = footer_fallback_menu();
        assert_eq!(menu.id, "gid://shopify/Menu/199655620664");
        assert!(menu.items.iter().all(|i| i.item_type == MenuItemType::ShopPolicy));
        assert!(
            menu.items
                .iter()
                .all(|i| i.url.as_deref().unwrap().starts_with("/policies/"))
        );
        assert_eq!(menu.items.len(), 4);
    }

    #[test]
    fn fallback_serializes_in_api_shape() {
        let json = serde_json::to_value(header_fallback_menu()).unwrap();
        assert_eq!(json["items"][3]["type"], "PAGE");
        assert_eq!(json["items"][3]["resourceId"], "gid://shopify/Page/92591030328");
    }
}
