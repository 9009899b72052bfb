//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Once;

use proptest::prelude::*;
use rust_rummy::core::{Card, Deck, Hand, RulesConfig, Signature};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, else `warn`.
pub fn init() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Hand with fresh card ids starting at `first_id`.
pub fn hand_at(first_id: u32, faces: &[Signature]) -> Hand {
    Hand::from_signatures(first_id, faces)
}

/// Hand with card ids starting at 0.
pub fn hand(faces: &[Signature]) -> Hand {
    hand_at(0, faces)
}

/// Up to `max` distinct physical cards from a standard deck, in random order.
pub fn arb_cards(max: usize) -> impl proptest::strategy::Strategy<Value = Vec<Card>> {
    let all = Deck::standard(&RulesConfig::default()).cards().to_vec();
    proptest::sample::subsequence(all, 0..=max).prop_shuffle()
}
