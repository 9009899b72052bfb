//! Decision policies for computer seats.
//!
//! A `Strategy` chooses up to two actions per turn from a `DecisionState`.
//! Four policies are provided:
//!
//! | Policy | Display name | Chooses by |
//! |---|---|---|
//! | `RandomStrategy` | DEFENSIVE | uniform over legal actions |
//! | `RuleBasedStrategy` | AGGRESSIVE | hand-size rules and worthwhile takes |
//! | `ProbabilityStrategy` | X-AGGRESSIVE | highest group-forming probability |
//! | `ExpectationStrategy` | X-DEFENSIVE | highest expected hand reduction |
//!
//! Every policy respects the gating in [`legality`]: the hand-size limits on
//! draws, no takes from opponents with too few cards, and the two-action
//! turn shape.

pub mod expectation;
pub mod legality;
pub mod probability;
pub mod random;
pub mod rule_based;

use std::sync::Arc;

use crate::core::{Action, ActionKind, DecisionState, GameRng, Result, RulesConfig};
use crate::model::EvaluationPool;

pub use expectation::ExpectationStrategy;
pub use probability::ProbabilityStrategy;
pub use random::RandomStrategy;
pub use rule_based::RuleBasedStrategy;

/// A turn decision policy.
///
/// ## Implementation Notes
///
/// - Both choices must return an action that passes
///   [`legality::check_action`] for the slot
/// - `choose_second_action` is never called after a Pass
/// - Policies may keep per-instance state across calls (the expectation
///   policy's pass counter), hence `&mut self`
pub trait Strategy: Send {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Choose the first action of a turn.
    fn choose_first_action(&mut self, state: &DecisionState) -> Result<Action>;

    /// Choose the second action, given the kind of the first.
    fn choose_second_action(&mut self, state: &DecisionState, first: ActionKind) -> Result<Action>;
}

/// Registered policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StrategyKind {
    Random,
    RuleBased,
    Probability,
    Expectation,
}

impl StrategyKind {
    /// All policies in registration order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::RuleBased,
        StrategyKind::Probability,
        StrategyKind::Expectation,
    ];

    /// Display name of the policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => RandomStrategy::NAME,
            StrategyKind::RuleBased => RuleBasedStrategy::NAME,
            StrategyKind::Probability => ProbabilityStrategy::NAME,
            StrategyKind::Expectation => ExpectationStrategy::NAME,
        }
    }

    /// Look up a policy by display name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Construct the policy.
    ///
    /// Same seed, same decisions. The pool is shared; only the model-based
    /// policies use it.
    #[must_use]
    pub fn build(self, rules: &RulesConfig, pool: Arc<EvaluationPool>, seed: u64) -> Box<dyn Strategy> {
        let rng = GameRng::new(seed).for_context(self.name());
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(rules.clone(), rng)),
            StrategyKind::RuleBased => Box::new(RuleBasedStrategy::new(rules.clone(), rng)),
            StrategyKind::Probability => Box::new(ProbabilityStrategy::new(rules.clone(), pool)),
            StrategyKind::Expectation => Box::new(ExpectationStrategy::new(rules.clone(), pool, rng)),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
