#![forbid(unsafe_code)]

//! Header call-to-action state: account link and cart badge.

use shopfront_cart::ProjectedCart;

/// Whether the shopper has a customer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginStatus {
    /// Anonymous, or the login check failed.
    #[default]
    SignIn,
    Account,
}

impl LoginStatus {
    #[must_use]
    pub fn from_logged_in(logged_in: bool) -> Self {
        if logged_in {
            Self::Account
        } else {
            Self::SignIn
        }
    }

    /// Text of the account link.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Account => "Account",
        }
    }
}

/// What the header's right-hand side renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCta {
    pub login: LoginStatus,
    pub cart_count: u32,
}

impl HeaderCta {
    /// Badge count comes from the projected cart; no cart counts as 0.
    #[must_use]
    pub fn new(login: LoginStatus, cart: Option<&ProjectedCart>) -> Self {
        Self {
            login,
            cart_count: cart.map_or(0, |c| c.total_quantity),
        }
    }

    #[must_use]
    pub fn account_label(&self) -> &'static str {
        self.login.label()
    }

    /// `Cart 3`
    #[must_use]
    pub fn cart_badge(&self) -> String {
        format!("Cart {}", self.cart_count)
    }
}
