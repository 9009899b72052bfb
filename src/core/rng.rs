//! Deterministic random number generation with forking.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Create independent branches for concurrent evaluations
//! - **Context streams**: Independent sequences for different purposes
//!   (deck shuffling vs. take selection vs. strategy choices)
//!
//! Every source of randomness in the engine is a `GameRng` handed in by the
//! caller, so test suites can force determinism.
//!
//! ## Concurrent Usage
//!
//! ```
//! use rust_rummy::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork once per worker *before* dispatch: results then do not depend
//! // on which thread runs first.
//! let mut worker_a = rng.fork();
//! let mut worker_b = rng.fork();
//!
//! assert_ne!(worker_a.gen_range_usize(0..1000), worker_b.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given half-open range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given inclusive range.
    pub fn gen_range_inclusive(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Sample `amount` distinct indices uniformly from `0..length`.
    ///
    /// Panics if `amount > length`, like `rand::seq::index::sample`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, length, amount).into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut forked1 = rng1.fork();
        let mut forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
        assert_eq!(forked1.gen_range_usize(0..1000), forked2.gen_range_usize(0..1000));
    }

    #[test]
    fn test_successive_forks_differ() {
        let mut rng = GameRng::new(42);
        let a = rng.fork();
        let b = rng.fork();
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_context_streams() {
        let rng = GameRng::new(42);
        let mut deck1 = rng.for_context("deck");
        let mut deck2 = rng.for_context("deck");
        let mut take = rng.for_context("take");

        let seq1: Vec<_> = (0..10).map(|_| deck1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| deck2.gen_range_usize(0..1000)).collect();
        let seq3: Vec<_> = (0..10).map(|_| take.gen_range_usize(0..1000)).collect();

        assert_eq!(seq1, seq2);
        assert_ne!(seq1, seq3);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_gen_range_inclusive_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..200 {
            let v = rng.gen_range_inclusive(1..=3);
            assert!((1..=3).contains(&v));
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = GameRng::new(42);
        let mut sample = rng.sample_indices(100, 30);

        assert_eq!(sample.len(), 30);
        sample.sort_unstable();
        sample.dedup();
        assert_eq!(sample.len(), 30);
        assert!(sample.iter().all(|&i| i < 100));
    }
}
