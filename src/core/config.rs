//! Rules configuration.
//!
//! All game constants the engine consults live in `RulesConfig`. The defaults
//! are the standard game: four colors, numbers 1-10, two copies of every
//! card, a 20-card hand limit.

use serde::{Deserialize, Serialize};

/// Game rules and evaluation limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Hand size limit. Actions are gated as the hand approaches it.
    pub max_hand_size: usize,

    /// Cards dealt to each seat at the start.
    pub initial_hand_size: usize,

    /// Physical copies of every (color, number) face in the deck.
    pub copies_per_card: usize,

    /// Highest card number (numbers run 1..=max_number).
    pub max_number: u8,

    /// Opponents must hold at least this many cards to be a Take target.
    pub min_take_target: usize,

    /// Above this many k-combinations, draw expectations are sampled.
    pub exact_combination_limit: u64,

    /// Sampling parameter divisor: the sampling ratio is `combinations / divisor`.
    pub sample_divisor: u64,

    /// Threads in the bounded evaluation pool.
    pub worker_threads: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 20,
            initial_hand_size: 5,
            copies_per_card: 2,
            max_number: 10,
            min_take_target: 3,
            exact_combination_limit: 2000,
            sample_divisor: 1000,
            worker_threads: 5,
        }
    }
}

impl RulesConfig {
    /// Total cards in a full deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        crate::core::Color::COUNT * self.max_number as usize * self.copies_per_card
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the exact-enumeration limit and sampling divisor.
    #[must_use]
    pub fn with_sampling(mut self, exact_limit: u64, divisor: u64) -> Self {
        self.exact_combination_limit = exact_limit;
        self.sample_divisor = divisor.max(1);
        self
    }

    /// Set the evaluation pool size.
    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.max(1);
        self
    }
}
