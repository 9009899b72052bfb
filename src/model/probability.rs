//! Probability of holding a valid group after an action.
//!
//! Every case is exact:
//! - draw k: the share of k-card combinations of the deck that leave the hand
//!   with a valid group
//! - take: the share of the target's cards that would do so
//! - pass: 0, since the hand is evaluated only when it holds no group

use std::sync::Arc;

use tracing::trace;

use crate::core::combinatorics::{binomial, Combinations};
use crate::core::{Action, DecisionState, DrawCount, EngineError, PlayerId, Result};
use crate::groups::exists_valid_group;

use super::pool::EvaluationPool;
use super::probe::{candidate_actions, ProbeHand};
use super::values::ActionValues;

/// Evaluates group-forming probabilities on the shared pool.
#[derive(Clone, Debug)]
pub struct ProbabilityModel {
    pool: Arc<EvaluationPool>,
}

impl ProbabilityModel {
    /// Create a model that evaluates on `pool`.
    #[must_use]
    pub fn new(pool: Arc<EvaluationPool>) -> Self {
        Self { pool }
    }

    /// Probability that drawing `count` cards yields a valid group.
    ///
    /// Zero when the deck holds fewer than `count` cards.
    #[must_use]
    pub fn draw_probability(state: &DecisionState, count: DrawCount) -> f64 {
        let k = count.get();
        let total = binomial(state.deck_size(), k);
        if total == 0 {
            return 0.0;
        }

        let mut probe = ProbeHand::new(&state.hand);
        let hits = Combinations::new(state.deck_size(), k)
            .filter(|combo| probe.with(combo.iter().map(|&i| state.deck[i]), exists_valid_group))
            .count();

        hits as f64 / total as f64
    }

    /// Probability that taking one card from `target` yields a valid group.
    pub fn take_probability(state: &DecisionState, target: PlayerId) -> Result<f64> {
        let opponent = state.opponent(target)?;
        if opponent.hand.is_empty() {
            return Err(EngineError::EmptyOpponentHand(target));
        }

        let mut probe = ProbeHand::new(&state.hand);
        let hits = opponent
            .hand
            .iter()
            .filter(|&&card| probe.with([card], exists_valid_group))
            .count();

        Ok(hits as f64 / opponent.hand_size() as f64)
    }

    /// Probability for every candidate action, evaluated concurrently.
    ///
    /// Entries: draw 1, draw 2, draw 3, one take per opponent, pass.
    pub fn calculate_probabilities(&self, state: &DecisionState) -> Result<ActionValues> {
        let actions = candidate_actions(state);
        let values = self.pool.evaluate(actions.clone(), |action| {
            let value = match action {
                Action::Draw(count) => Self::draw_probability(state, count),
                Action::Take(target) => Self::take_probability(state, target)?,
                Action::Pass => 0.0,
            };
            trace!(player = %state.player, %action, value, "probability");
            Ok(value)
        })?;

        let mut table: ActionValues = actions.into_iter().zip(values).collect();
        table.insert(Action::Pass, 0.0);
        Ok(table)
    }
}
