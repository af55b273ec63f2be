#![no_main]

use libfuzzer_sys::fuzz_target;
use shopfront_cart::CartSnapshot;
use shopfront_core::Money;
use shopfront_nav::Menu;
use shopfront_search::{PredictiveItems, PredictiveSearchResult};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Decoders must reject garbage with an error, never a panic.
    let _ = CartSnapshot::from_api_json(text);
    let _ = Menu::from_api_json(text);
    let _ = Money::parse(text, "USD");
    if let Ok(items) = PredictiveItems::from_api_json(text, "q") {
        let result = PredictiveSearchResult::from_items(items);
        assert_eq!(result.total, result.items.len());
    }
});
