#![forbid(unsafe_code)]

//! A shopper's storefront session.
//!
//! [`Storefront`] owns the per-session state every view reads: the window
//! key-listener list, the overlay coordinator, the cart intent queue, and
//! predictive search. Nothing here is global; two sessions never share
//! state.
//!
//! # Invariants
//!
//! - Predictive search is attached exactly while the search panel is open.
//! - Adding to cart opens the cart panel.

use shopfront_cart::{
    CartQueue, CartSnapshot, IntentId, PendingIntent, ProjectedCart, Reconciliation, VariantSelection,
};
use shopfront_core::config::StorefrontConfig;
use shopfront_core::event::KeyEvent;
use shopfront_core::keybinding::{ShortcutAction, ShortcutMapper};
use shopfront_nav::InternalDomains;
use shopfront_overlay::{
    KeyListenerRegistry, OverlayContext, OverlayCoordinator, OverlaySubscription, PanelId,
};
use shopfront_search::{Completion, PredictiveItems, PredictiveSearch, SearchError, SearchTicket};
use tracing::{debug, warn};

use crate::Result;
use crate::api::CommerceApi;
use crate::header::{HeaderCta, LoginStatus};

/// Per-shopper storefront state.
pub struct Storefront {
    config: StorefrontConfig,
    domains: InternalDomains,
    keys: KeyListenerRegistry,
    overlay: OverlayCoordinator,
    shortcuts: ShortcutMapper,
    cart: CartQueue,
    search: PredictiveSearch,
    _search_panel_watch: OverlaySubscription,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("overlay", &self.overlay)
            .field("pending_intents", &self.cart.pending().len())
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Start a session. The configuration is validated first.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let config = config.validated();
        let keys = KeyListenerRegistry::new();
        let overlay = OverlayCoordinator::new(keys.clone());
        let search = PredictiveSearch::from_config(&config);
        search.detach();

        let watched = search.clone();
        let watch = overlay.subscribe(move |active| {
            if active == Some(PanelId::Search) {
                watched.attach();
            } else {
                watched.detach();
            }
        });

        Self {
            domains: InternalDomains::from_config(&config),
            config,
            keys,
            overlay,
            shortcuts: ShortcutMapper::with_defaults(),
            cart: CartQueue::new(),
            search,
            _search_panel_watch: watch,
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Domains treated as this shop when classifying links.
    #[must_use]
    pub fn domains(&self) -> &InternalDomains {
        &self.domains
    }

    #[must_use]
    pub fn keys(&self) -> &KeyListenerRegistry {
        &self.keys
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayCoordinator {
        &self.overlay
    }

    /// Provider scope for views that reach the overlay through context.
    #[must_use]
    pub fn overlay_context(&self) -> OverlayContext {
        OverlayContext::provide(self.overlay.clone())
    }

    /// Feed a window key event.
    ///
    /// Listeners run first (an open panel closes on Escape), then shortcuts:
    /// `cmd/ctrl+k` opens search. The returned action tells the host whether
    /// to move focus and suppress the browser default.
    pub fn dispatch_key(&self, event: &KeyEvent) -> ShortcutAction {
        self.keys.dispatch(event);
        let action = self.shortcuts.map(event);
        if action == ShortcutAction::FocusSearch {
            self.overlay.open(PanelId::Search);
        }
        action
    }

    // ── Cart ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn cart(&self) -> &CartQueue {
        &self.cart
    }

    /// The cart to render.
    #[must_use]
    pub fn projected_cart(&self) -> ProjectedCart {
        self.cart.projection()
    }

    /// Queue an arbitrary cart mutation.
    pub fn submit_cart_intent(&mut self, intent: PendingIntent) -> IntentId {
        self.cart.submit(intent)
    }

    /// Add `quantity` of the selected variant and open the cart panel.
    pub fn add_to_cart(&mut self, variant: &VariantSelection, quantity: u32) -> Result<IntentId> {
        let intent = PendingIntent::add_variant(variant, quantity)?;
        let id = self.cart.submit(intent);
        self.overlay.open(PanelId::Cart);
        Ok(id)
    }

    /// The API accepted intent `id` and returned `snapshot`.
    ///
    /// A [`Reconciliation::Stale`] outcome means a newer snapshot already
    /// landed and this one was dropped.
    pub fn confirm_cart_intent(&mut self, id: IntentId, snapshot: CartSnapshot) -> Reconciliation {
        self.cart.confirm(id, snapshot)
    }

    /// The API rejected intent `id`. Returns whether it was still pending.
    pub fn fail_cart_intent(&mut self, id: IntentId) -> bool {
        self.cart.fail(id)
    }

    /// Re-read the cart from the API. A failed read keeps the current state.
    pub fn refresh_cart<A: CommerceApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.cart.begin_refresh();
        match api.cart() {
            Ok(Some(snapshot)) => self.cart.complete_refresh(ticket, snapshot),
            Ok(None) => {
                debug!("no cart yet");
                false
            }
            Err(err) => {
                warn!(error = %err, "cart refresh failed; keeping current cart");
                false
            }
        }
    }

    // ── Search ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn search(&self) -> &PredictiveSearch {
        &self.search
    }

    /// Type into the predictive search box. Opens the search panel.
    pub fn search_input(&self, term: &str) -> Option<SearchTicket> {
        self.overlay.open(PanelId::Search);
        self.search.submit(term)
    }

    /// Path and query the host should fetch for `ticket`, rooted at the
    /// configured search action.
    #[must_use]
    pub fn predictive_request_target(&self, ticket: &SearchTicket) -> String {
        ticket.query().request_target(&self.config.search_action)
    }

    /// Deliver a predictive search response.
    pub fn search_response(
        &self,
        ticket: &SearchTicket,
        outcome: std::result::Result<PredictiveItems, SearchError>,
    ) -> Completion {
        self.search.complete(ticket, outcome)
    }

    // ── Header ──────────────────────────────────────────────────────────

    /// Heading text of the open panel, if any.
    #[must_use]
    pub fn active_heading(&self) -> Option<&'static str> {
        self.overlay.current().map(PanelId::heading)
    }

    /// Header call-to-action state for `login`.
    #[must_use]
    pub fn header_cta(&self, login: LoginStatus) -> HeaderCta {
        let cart = self.projected_cart();
        HeaderCta::new(login, Some(&cart))
    }
}
