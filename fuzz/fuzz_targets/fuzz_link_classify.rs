#![no_main]

use libfuzzer_sys::fuzz_target;
use shopfront_nav::{InternalDomains, LinkTarget, classify};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the configured domain, the rest is the link.
    let (domain, link) = text.split_once('\n').unwrap_or(("myshopify.com", text));
    let domains = InternalDomains::new("myshopify.com", domain, domain);

    match classify(link, &domains) {
        LinkTarget::External { url } => assert_eq!(url, link.trim()),
        LinkTarget::Internal { .. } => {}
    }
});
