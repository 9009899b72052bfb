//! Discard optimization.
//!
//! `find_best_discard` picks the plan of physically disjoint groups that
//! empties the most cards from a hand; `find_best_discard_count` returns only
//! its size and is what the expectation model scores with.

pub mod optimizer;
pub mod packing;

pub use optimizer::{find_best_discard, find_best_discard_count};
pub use packing::{PackingSolution, SetPacking};
