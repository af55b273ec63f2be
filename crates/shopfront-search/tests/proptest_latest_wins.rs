//! Property-based tests for predictive search ordering.
//!
//! 1. Only the newest ticket, while attached, can change the result
//! 2. A dropped response leaves the result untouched
//! 3. `total` always equals the number of displayed hits

use proptest::prelude::*;
use shopfront_search::{
    Completion, PredictiveItems, PredictiveSearch, QuerySuggestion, SearchTicket,
};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    Respond { pick: usize, hits: usize },
    Detach,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[a-z ]{0,6}".prop_map(Op::Submit),
        4 => (0usize..16, 0usize..5).prop_map(|(pick, hits)| Op::Respond { pick, hits }),
        1 => Just(Op::Detach),
    ]
}

fn hits(n: usize) -> PredictiveItems {
    PredictiveItems {
        queries: (0..n)
            .map(|i| QuerySuggestion {
                text: format!("q{i}"),
                styled_text: format!("q{i}"),
                url: format!("/search?q=q{i}"),
            })
            .collect(),
        ..PredictiveItems::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_latest_attached_ticket_applies(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let search = PredictiveSearch::new(5);
        let mut tickets: Vec<SearchTicket> = Vec::new();
        let mut latest: Option<u64> = None;
        let mut attached = true;

        for op in ops {
            match op {
                Op::Submit(term) => {
                    attached = true;
                    match search.submit(&term) {
                        Some(ticket) => {
                            latest = Some(ticket.generation());
                            tickets.push(ticket);
                        }
                        None => latest = None,
                    }
                }
                Op::Respond { pick, hits: n } => {
                    if tickets.is_empty() {
                        continue;
                    }
                    let ticket = &tickets[pick % tickets.len()];
                    let before = search.result();
                    let outcome = search.complete(ticket, Ok(hits(n)));
                    let expected_apply = attached && latest == Some(ticket.generation());
                    prop_assert_eq!(outcome == Completion::Applied, expected_apply);
                    if expected_apply {
                        prop_assert_eq!(search.result().total, n);
                    } else {
                        prop_assert_eq!(search.result(), before);
                    }
                }
                Op::Detach => {
                    search.detach();
                    attached = false;
                    latest = None;
                }
            }
            let result = search.result();
            prop_assert_eq!(result.total, result.items.len());
        }
    }
}
