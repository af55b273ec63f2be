#![forbid(unsafe_code)]

//! Session-wide key listener registry.
//!
//! [`KeyListenerRegistry`] stands in for the document's `keydown` listener
//! list. Components attach callbacks with [`KeyListenerRegistry::attach`] and
//! keep the returned [`ListenerGuard`] for as long as they want to hear keys.
//! Dropping the guard detaches the callback; there is no separate remove call
//! to forget.
//!
//! # Invariants
//!
//! 1. Listeners are invoked in attach order.
//! 2. A listener whose guard was dropped is never invoked again, even if the
//!    drop happens while a dispatch is in progress.
//! 3. Dead entries are pruned lazily on attach and dispatch.
//!
//! # Failure Modes
//!
//! - **Guard leak**: storing a guard indefinitely keeps the listener alive.
//!   [`KeyListenerRegistry::live_count`] exposes the number of live
//!   listeners so tests can assert nothing leaked.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shopfront_core::event::KeyEvent;

type ListenerRc = Rc<dyn Fn(&KeyEvent)>;
type ListenerWeak = Weak<dyn Fn(&KeyEvent)>;

/// Shared list of key listeners.
///
/// Cloning creates a new handle to the same list.
#[derive(Clone, Default)]
pub struct KeyListenerRegistry {
    listeners: Rc<RefCell<Vec<ListenerWeak>>>,
}

impl std::fmt::Debug for KeyListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyListenerRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

impl KeyListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. It stays attached until the guard is dropped.
    pub fn attach(&self, listener: impl Fn(&KeyEvent) + 'static) -> ListenerGuard {
        let strong: ListenerRc = Rc::new(listener);
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|w| w.strong_count() > 0);
        listeners.push(Rc::downgrade(&strong));
        ListenerGuard { _listener: strong }
    }

    /// Deliver a key event to every live listener.
    ///
    /// Listeners may attach or detach other listeners (including
    /// themselves) while being called.
    pub fn dispatch(&self, event: &KeyEvent) {
        let live: Vec<ListenerRc> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        let weak: Vec<ListenerWeak> = live.iter().map(Rc::downgrade).collect();
        drop(live);

        // Upgrade one at a time so a listener detached by an earlier one in
        // this same dispatch is skipped.
        for listener in weak {
            if let Some(listener) = listener.upgrade() {
                listener(event);
            }
        }
    }

    /// Number of attached listeners whose guard is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

/// RAII handle for an attached listener.
///
/// Dropping the guard drops the only strong reference to the callback, so
/// the registry's weak entry stops upgrading immediately.
pub struct ListenerGuard {
    _listener: ListenerRc,
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::event::KeyCode;
    use std::cell::Cell;

    #[test]
    fn dispatch_reaches_live_listeners_in_order() {
        let registry = KeyListenerRegistry::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = registry.attach(move |_| l1.borrow_mut().push("a"));
        let l2 = Rc::clone(&log);
        let _b = registry.attach(move |_| l2.borrow_mut().push("b"));

        registry.dispatch(&KeyEvent::new(KeyCode::Escape));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn dropped_guard_detaches() {
        let registry = KeyListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let guard = registry.attach(move |_| h.set(h.get() + 1));

        registry.dispatch(&KeyEvent::new(KeyCode::Enter));
        drop(guard);
        registry.dispatch(&KeyEvent::new(KeyCode::Enter));

        assert_eq!(hits.get(), 1);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn listener_detached_mid_dispatch_is_skipped() {
        let registry = KeyListenerRegistry::new();
        let second_hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));

        let slot_for_first = Rc::clone(&slot);
        let _first = registry.attach(move |_| {
            slot_for_first.borrow_mut().take();
        });
        let h = Rc::clone(&second_hits);
        *slot.borrow_mut() = Some(registry.attach(move |_| h.set(h.get() + 1)));

        registry.dispatch(&KeyEvent::new(KeyCode::Escape));
        assert_eq!(second_hits.get(), 0);
        assert_eq!(registry.live_count(), 1);
    }
}
