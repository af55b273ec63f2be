//! Rollbacks and stale confirmations must be visible in the logs.

use std::sync::{Arc, Mutex};

use shopfront_cart::{CartQueue, CartSnapshot, MerchandiseId, PendingIntent, Reconciliation};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct Captured {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("capture lock")
            .push((*event.metadata().level(), visitor.0));
    }
}

fn capture(run: impl FnOnce()) -> Vec<(Level, String)> {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, run);
    let events = captured.events.lock().expect("capture lock").clone();
    events
}

#[test]
fn failure_logs_a_warning() {
    let events = capture(|| {
        let mut queue = CartQueue::new();
        let id = queue.submit(PendingIntent::add_line(MerchandiseId::new("m1"), 1));
        queue.fail(id);
    });
    assert!(
        events
            .iter()
            .any(|(level, msg)| *level == Level::WARN && msg.contains("rolled back"))
    );
}

#[test]
fn stale_confirmation_logs_at_debug() {
    let events = capture(|| {
        let mut queue = CartQueue::new();
        let first = queue.submit(PendingIntent::add_line(MerchandiseId::new("m1"), 1));
        let second = queue.submit(PendingIntent::add_line(MerchandiseId::new("m1"), 1));
        queue.confirm(second, CartSnapshot::empty());
        assert_eq!(
            queue.confirm(first, CartSnapshot::empty()),
            Reconciliation::Stale
        );
    });
    assert!(
        events
            .iter()
            .any(|(level, msg)| *level == Level::DEBUG && msg.contains("stale cart confirmation"))
    );
}
