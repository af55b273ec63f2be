//! Property-based invariant tests for the overlay coordinator.
//!
//! 1. `current()` is the last opened panel until a close, then `None`
//! 2. An Escape listener is live iff a panel is open
//! 3. Escape with a panel open closes it; with nothing open it changes nothing
//! 4. No listener outlives the coordinator

use proptest::prelude::*;
use shopfront_core::event::{KeyCode, KeyEvent};
use shopfront_overlay::{KeyListenerRegistry, OverlayCoordinator, PanelId};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Open(PanelId),
    Toggle(PanelId),
    Close,
    Escape,
}

fn panel_strategy() -> impl Strategy<Value = PanelId> {
    prop_oneof![
        Just(PanelId::Search),
        Just(PanelId::Cart),
        Just(PanelId::MobileMenu),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        panel_strategy().prop_map(Op::Open),
        panel_strategy().prop_map(Op::Toggle),
        Just(Op::Close),
        Just(Op::Escape),
    ]
}

/// Reference model: the expected active panel after `op`.
fn model_step(active: Option<PanelId>, op: &Op) -> Option<PanelId> {
    match op {
        Op::Open(p) => Some(*p),
        Op::Toggle(p) if active == Some(*p) => None,
        Op::Toggle(p) => Some(*p),
        Op::Close | Op::Escape => None,
    }
}

proptest! {
    #[test]
    fn matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let keys = KeyListenerRegistry::new();
        let overlay = OverlayCoordinator::new(keys.clone());
        let mut expected = None;

        for op in &ops {
            match op {
                Op::Open(p) => overlay.open(*p),
                Op::Toggle(p) => overlay.toggle(*p),
                Op::Close => overlay.close(),
                Op::Escape => keys.dispatch(&KeyEvent::new(KeyCode::Escape)),
            }
            expected = model_step(expected, op);

            prop_assert_eq!(overlay.current(), expected);
            prop_assert_eq!(keys.live_count(), usize::from(expected.is_some()));
        }

        drop(overlay);
        prop_assert_eq!(keys.live_count(), 0);
    }

    #[test]
    fn version_counts_only_effective_transitions(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let keys = KeyListenerRegistry::new();
        let overlay = OverlayCoordinator::new(keys.clone());
        let mut active = None;
        let mut transitions = 0u64;

        for op in &ops {
            match op {
                Op::Open(p) => overlay.open(*p),
                Op::Toggle(p) => overlay.toggle(*p),
                Op::Close => overlay.close(),
                Op::Escape => keys.dispatch(&KeyEvent::new(KeyCode::Escape)),
            }
            let next = model_step(active, op);
            if next != active {
                transitions += 1;
            }
            active = next;
        }

        prop_assert_eq!(overlay.version(), transitions);
    }
}
