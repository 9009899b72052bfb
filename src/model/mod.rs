//! Forward-looking action evaluation.
//!
//! ## Models
//!
//! - `ProbabilityModel`: chance that an action leaves the hand holding a
//!   valid group (always exact)
//! - `ExpectationModel`: expected cards removed by the follow-up discard,
//!   net of cards gained (exact or sampled by combination count)
//!
//! Both assume perfect information: the deck contents and every opponent's
//! hand are visible in the `DecisionState`.
//!
//! ## Concurrency
//!
//! Candidates (draw 1/2/3, one take per opponent) are independent given the
//! snapshot and are evaluated in parallel on a bounded `EvaluationPool`.
//! Workers probe private copies of the hand; the snapshot itself is shared
//! read-only.

pub mod expectation;
pub mod pool;
pub mod probability;
mod probe;
pub mod values;

pub use expectation::ExpectationModel;
pub use pool::EvaluationPool;
pub use probability::ProbabilityModel;
pub use values::ActionValues;
