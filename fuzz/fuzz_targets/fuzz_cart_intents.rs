#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shopfront_cart::{CartLine, CartQueue, CartSnapshot, IntentId, LineId, MerchandiseId, PendingIntent};

#[derive(Arbitrary, Debug)]
enum Op {
    Add { merch: u8, quantity: u8 },
    Update { line: u8, quantity: i64 },
    Remove { line: u8 },
    GiftCard,
    ClearGiftCards,
    Confirm { intent: u8 },
    Fail { intent: u8 },
    Refresh { interleaved: Option<u8> },
}

#[derive(Arbitrary, Debug)]
struct Input {
    lines: Vec<(u8, u8)>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let lines = input
        .lines
        .iter()
        .take(16)
        .enumerate()
        .filter(|(_, (_, q))| *q > 0)
        .map(|(i, (m, q))| {
            CartLine::new(
                LineId::new(format!("line-{i}")),
                MerchandiseId::new(format!("merch-{}", m % 8)),
                u32::from(*q),
            )
        })
        .collect();
    let snapshot = CartSnapshot::with_lines(lines);
    let mut queue = CartQueue::with_snapshot(snapshot.clone());

    for op in input.ops.into_iter().take(64) {
        match op {
            Op::Add { merch, quantity } => {
                queue.submit(PendingIntent::add_line(
                    MerchandiseId::new(format!("merch-{}", merch % 8)),
                    u32::from(quantity),
                ));
            }
            Op::Update { line, quantity } => {
                queue.submit(PendingIntent::update_line(
                    LineId::new(format!("line-{}", line % 16)),
                    quantity,
                ));
            }
            Op::Remove { line } => {
                queue.submit(PendingIntent::remove_line(LineId::new(format!("line-{}", line % 16))));
            }
            Op::GiftCard => {
                queue.submit(PendingIntent::ApplyGiftCard { code: "FUZZ".into() });
            }
            Op::ClearGiftCards => {
                queue.submit(PendingIntent::RemoveGiftCards);
            }
            Op::Confirm { intent } => {
                queue.confirm(IntentId(u64::from(intent)), snapshot.clone());
            }
            Op::Fail { intent } => {
                queue.fail(IntentId(u64::from(intent)));
            }
            Op::Refresh { interleaved } => {
                let ticket = queue.begin_refresh();
                let later = interleaved.map(|merch| {
                    queue.submit(PendingIntent::add_line(
                        MerchandiseId::new(format!("merch-{}", merch % 8)),
                        1,
                    ))
                });
                assert!(queue.complete_refresh(ticket, snapshot.clone()));
                let pending: Vec<_> = queue.pending().iter().map(|q| q.id).collect();
                assert_eq!(pending, later.into_iter().collect::<Vec<_>>());
            }
        }

        let cart = queue.projection();
        let sum = cart.lines.iter().fold(0u64, |acc, l| acc + u64::from(l.line.quantity));
        assert!(cart.lines.iter().all(|l| l.line.quantity > 0));
        assert_eq!(u64::from(cart.total_quantity), sum.min(u64::from(u32::MAX)));
    }
});
