#![forbid(unsafe_code)]

//! Overlay coordinator: which side panel, if any, is open.
//!
//! # Design
//!
//! [`OverlayCoordinator`] is a cloneable handle to shared state
//! (`Rc<RefCell<..>>`), passed explicitly to every view that needs it. A
//! fresh coordinator is built per session and per test.
//!
//! While a panel is active the coordinator holds a [`ListenerGuard`] on the
//! session's [`KeyListenerRegistry`] whose callback closes the panel on
//! Escape. The guard is replaced when another panel opens and dropped on
//! close, so at most one Escape listener is live and none survive the
//! coordinator.
//!
//! # Invariants
//!
//! 1. At most one panel is active.
//! 2. `open(p)` when `p` is already active and `close()` when nothing is
//!    active are no-ops: no version bump, no notification.
//! 3. An Escape listener is attached iff a panel is active.
//! 4. Subscribers are notified in registration order after each effective
//!    transition, with the borrow released.
//!
//! # Failure Modes
//!
//! - **Re-entrant transitions**: subscribers may call `open`/`close`; the
//!   state borrow is released before callbacks run.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::listener::{KeyListenerRegistry, ListenerGuard};
use crate::panel::PanelId;

type ObserverRc = Rc<dyn Fn(Option<PanelId>)>;
type ObserverWeak = Weak<dyn Fn(Option<PanelId>)>;

struct CoordinatorInner {
    active: Option<PanelId>,
    version: u64,
    escape_listener: Option<ListenerGuard>,
    observers: Vec<ObserverWeak>,
}

/// Shared handle to the session's overlay state.
///
/// Cloning creates a new handle to the **same** state.
#[derive(Clone)]
pub struct OverlayCoordinator {
    inner: Rc<RefCell<CoordinatorInner>>,
    keys: KeyListenerRegistry,
}

impl std::fmt::Debug for OverlayCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("OverlayCoordinator")
            .field("active", &inner.active)
            .field("version", &inner.version)
            .field("escape_listener", &inner.escape_listener.is_some())
            .finish()
    }
}

impl OverlayCoordinator {
    /// Create a coordinator with nothing open.
    ///
    /// Escape listeners are attached to `keys` while a panel is active.
    #[must_use]
    pub fn new(keys: KeyListenerRegistry) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CoordinatorInner {
                active: None,
                version: 0,
                escape_listener: None,
                observers: Vec::new(),
            })),
            keys,
        }
    }

    /// The active panel, or `None` when the page is uncovered.
    #[must_use]
    pub fn current(&self) -> Option<PanelId> {
        self.inner.borrow().active
    }

    /// Whether `panel` is the active one.
    #[must_use]
    pub fn is_open(&self, panel: PanelId) -> bool {
        self.current() == Some(panel)
    }

    /// Number of effective transitions so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Make `panel` the active panel, replacing any other.
    pub fn open(&self, panel: PanelId) {
        if self.is_open(panel) {
            return;
        }
        let listener = self.escape_listener_for(panel);
        let replaced = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.active.replace(panel);
            inner.version += 1;
            debug!(?previous, %panel, version = inner.version, "overlay opened");
            inner.escape_listener.replace(listener)
        };
        // Detach the previous panel's listener outside the borrow.
        drop(replaced);
        self.notify();
    }

    /// Close whichever panel is open.
    pub fn close(&self) {
        let detached = {
            let mut inner = self.inner.borrow_mut();
            let Some(panel) = inner.active.take() else {
                return;
            };
            inner.version += 1;
            debug!(%panel, version = inner.version, "overlay closed");
            inner.escape_listener.take()
        };
        drop(detached);
        self.notify();
    }

    /// Open `panel`, or close it if it is already the active one.
    pub fn toggle(&self, panel: PanelId) {
        if self.is_open(panel) {
            self.close();
        } else {
            self.open(panel);
        }
    }

    /// Observe panel changes. Dropping the returned guard unsubscribes.
    pub fn subscribe(&self, observer: impl Fn(Option<PanelId>) + 'static) -> OverlaySubscription {
        let strong: ObserverRc = Rc::new(observer);
        let mut inner = self.inner.borrow_mut();
        inner.observers.retain(|w| w.strong_count() > 0);
        inner.observers.push(Rc::downgrade(&strong));
        OverlaySubscription { _observer: strong }
    }

    fn escape_listener_for(&self, panel: PanelId) -> ListenerGuard {
        let weak = Rc::downgrade(&self.inner);
        let keys = self.keys.clone();
        self.keys.attach(move |event| {
            if !event.is_escape_press() {
                return;
            }
            let Some(inner) = weak.upgrade() else {
                return;
            };
            debug!(%panel, "escape pressed on open overlay");
            OverlayCoordinator {
                inner,
                keys: keys.clone(),
            }
            .close();
        })
    }

    fn notify(&self) {
        let (observers, active) = {
            let mut inner = self.inner.borrow_mut();
            inner.observers.retain(|w| w.strong_count() > 0);
            let live: Vec<ObserverRc> = inner.observers.iter().filter_map(Weak::upgrade).collect();
            (live, inner.active)
        };
        for observer in observers {
            observer(active);
        }
    }
}

/// RAII guard for an overlay observer.
pub struct OverlaySubscription {
    _observer: ObserverRc,
}

impl std::fmt::Debug for OverlaySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlaySubscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::event::{KeyCode, KeyEvent, KeyEventKind};
    use std::cell::Cell;

    fn setup() -> (KeyListenerRegistry, OverlayCoordinator) {
        let keys = KeyListenerRegistry::new();
        let overlay = OverlayCoordinator::new(keys.clone());
        (keys, overlay)
    }

    fn escape() -> KeyEvent {
        KeyEvent::new(KeyCode::Escape)
    }

    #[test]
    fn starts_closed() {
        let (keys, overlay) = setup();
        assert_eq!(overlay.current(), None);
        assert_eq!(keys.live_count(), 0);
    }

    #[test]
    fn open_replaces_and_close_clears() {
        let (_keys, overlay) = setup();
        overlay.open(PanelId::Search);
        overlay.open(PanelId::Cart);
        assert_eq!(overlay.current(), Some(PanelId::Cart));
        overlay.close();
        assert_eq!(overlay.current(), None);
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (_keys, overlay) = setup();
        overlay.open(PanelId::Cart);
        overlay.open(PanelId::Cart);
        assert_eq!(overlay.version(), 1);
        overlay.close();
        overlay.close();
        assert_eq!(overlay.version(), 2);
    }

    #[test]
    fn toggle_flips() {
        let (_keys, overlay) = setup();
        overlay.toggle(PanelId::MobileMenu);
        assert!(overlay.is_open(PanelId::MobileMenu));
        overlay.toggle(PanelId::MobileMenu);
        assert_eq!(overlay.current(), None);
    }

    #[test]
    fn escape_listener_tracks_active_panel() {
        let (keys, overlay) = setup();
        overlay.open(PanelId::Search);
        assert_eq!(keys.live_count(), 1);
        overlay.open(PanelId::Cart);
        assert_eq!(keys.live_count(), 1);
        overlay.close();
        assert_eq!(keys.live_count(), 0);
    }

    #[test]
    fn escape_closes_exactly_once() {
        let (keys, overlay) = setup();
        let closes = Rc::new(Cell::new(0));
        let c = Rc::clone(&closes);
        let _sub = overlay.subscribe(move |panel| {
            if panel.is_none() {
                c.set(c.get() + 1);
            }
        });

        overlay.open(PanelId::Search);
        keys.dispatch(&escape());
        assert_eq!(overlay.current(), None);
        assert_eq!(closes.get(), 1);

        // Nothing open: no effect.
        let version = overlay.version();
        keys.dispatch(&escape());
        assert_eq!(closes.get(), 1);
        assert_eq!(overlay.version(), version);
    }

    #[test]
    fn non_escape_and_repeat_keys_are_ignored() {
        let (keys, overlay) = setup();
        overlay.open(PanelId::Cart);
        keys.dispatch(&KeyEvent::new(KeyCode::Char('x')));
        keys.dispatch(&escape().with_kind(KeyEventKind::Repeat));
        assert_eq!(overlay.current(), Some(PanelId::Cart));
    }

    #[test]
    fn dropping_coordinator_detaches_listener() {
        let (keys, overlay) = setup();
        overlay.open(PanelId::Search);
        let clone = overlay.clone();
        drop(overlay);
        assert_eq!(keys.live_count(), 1);
        drop(clone);
        assert_eq!(keys.live_count(), 0);
    }

    #[test]
    fn observers_see_each_transition_in_order() {
        let (_keys, overlay) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let sub = overlay.subscribe(move |panel| s.borrow_mut().push(panel));

        overlay.open(PanelId::Search);
        overlay.open(PanelId::Search);
        overlay.open(PanelId::MobileMenu);
        overlay.close();
        drop(sub);
        overlay.open(PanelId::Cart);

        assert_eq!(
            *seen.borrow(),
            vec![Some(PanelId::Search), Some(PanelId::MobileMenu), None]
        );
    }

    #[test]
    fn observer_may_transition_reentrantly() {
        let (_keys, overlay) = setup();
        let handle = overlay.clone();
        let _sub = overlay.subscribe(move |panel| {
            if panel == Some(PanelId::MobileMenu) {
                handle.open(PanelId::Search);
            }
        });
        overlay.open(PanelId::MobileMenu);
        assert_eq!(overlay.current(), Some(PanelId::Search));
    }
}
