#![forbid(unsafe_code)]

//! The commerce API boundary and page layout loading.
//!
//! # Failure Modes
//!
//! Layout loading never fails. A menu that errors, is missing, or resolves to
//! no links is replaced by the static template menu; a failed login check
//! shows `Sign in`. Each recovered failure is logged at `warn`.

use shopfront_cart::CartSnapshot;
use shopfront_nav::{InternalDomains, Menu, MenuKind, NavLink, resolve_or_fallback};
use tracing::warn;

use crate::Result;
use crate::header::LoginStatus;

/// Handle of the header menu.
pub const HEADER_MENU_HANDLE: &str = "main-menu";

/// Handle of the footer menu.
pub const FOOTER_MENU_HANDLE: &str = "footer";

/// Queries the storefront needs from the commerce platform.
///
/// Implementations perform the transport; this crate only interprets the
/// answers.
pub trait CommerceApi {
    /// The shopper's current cart, `None` if none exists yet.
    fn cart(&self) -> Result<Option<CartSnapshot>>;

    /// The menu with `handle`, `None` if the shop has no such menu.
    fn menu(&self, handle: &str) -> Result<Option<Menu>>;

    /// Whether a customer session is active.
    fn is_logged_in(&self) -> Result<bool>;
}

/// Menus and login state shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub header_menu: Vec<NavLink>,
    pub footer_menu: Vec<NavLink>,
    pub login: LoginStatus,
}

/// Load the page layout, substituting defaults for anything unavailable.
pub fn load_layout<A: CommerceApi + ?Sized>(api: &A, domains: &InternalDomains) -> Layout {
    let header = fetch_menu(api, HEADER_MENU_HANDLE);
    let footer = fetch_menu(api, FOOTER_MENU_HANDLE);
    let login = match api.is_logged_in() {
        Ok(logged_in) => LoginStatus::from_logged_in(logged_in),
        Err(err) => {
            warn!(error = %err, "login status unavailable; showing sign in");
            LoginStatus::SignIn
        }
    };
    Layout {
        header_menu: resolve_or_fallback(header.as_ref(), MenuKind::Header, domains),
        footer_menu: resolve_or_fallback(footer.as_ref(), MenuKind::Footer, domains),
        login,
    }
}

fn fetch_menu<A: CommerceApi + ?Sized>(api: &A, handle: &str) -> Option<Menu> {
    api.menu(handle).unwrap_or_else(|err| {
        warn!(handle, error = %err, "menu request failed; using fallback");
        None
    })
}
