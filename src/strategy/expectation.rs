//! Highest expected hand reduction, with an anti-stall rule.
//!
//! With a small hand every draw or take usually has negative expectation and
//! Pass (fixed at 0) wins, so the policy would pass forever. After two
//! consecutive first-action passes, the next first action must be the best
//! non-pass action regardless of its sign; the counter then resets.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Action, ActionKind, DecisionState, GameRng, Result, RulesConfig};
use crate::model::{ActionValues, EvaluationPool, ExpectationModel};

use super::legality::{is_legal, only_pass};
use super::Strategy;

/// Passes tolerated in a row before a non-pass action is forced.
pub const MAX_CONSECUTIVE_PASSES: u32 = 2;

/// Chooses the legal action with the highest expected hand reduction.
#[derive(Clone, Debug)]
pub struct ExpectationStrategy {
    rules: RulesConfig,
    model: ExpectationModel,
    rng: GameRng,
    consecutive_passes: u32,
}

impl ExpectationStrategy {
    pub const NAME: &'static str = "X-DEFENSIVE";

    #[must_use]
    pub fn new(rules: RulesConfig, pool: Arc<EvaluationPool>, rng: GameRng) -> Self {
        let model = ExpectationModel::new(pool, &rules);
        Self {
            rules,
            model,
            rng,
            consecutive_passes: 0,
        }
    }

    /// First-action passes chosen in a row so far.
    #[must_use]
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    fn legal_values(&mut self, state: &DecisionState, first: Option<ActionKind>) -> Result<ActionValues> {
        let mut values = self.model.calculate_expectations(state, &mut self.rng)?;
        values.retain(|a| is_legal(state, *a, first, &self.rules));
        Ok(values)
    }
}

impl Strategy for ExpectationStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_first_action(&mut self, state: &DecisionState) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Action::Pass);
        }

        let mut values = self.legal_values(state, None)?;
        let (mut action, mut value) = values.best().unwrap_or((Action::Pass, 0.0));

        if action.is_pass() {
            if self.consecutive_passes >= MAX_CONSECUTIVE_PASSES {
                values.remove(&Action::Pass);
                if let Some((forced, forced_value)) = values.best() {
                    debug!(
                        strategy = Self::NAME,
                        player = %state.player,
                        passes = self.consecutive_passes,
                        "forcing a non-pass action"
                    );
                    action = forced;
                    value = forced_value;
                }
                self.consecutive_passes = 0;
            } else {
                self.consecutive_passes += 1;
            }
        } else {
            self.consecutive_passes = 0;
        }

        debug!(strategy = Self::NAME, player = %state.player, slot = "first", %action, value, "chose action");
        Ok(action)
    }

    fn choose_second_action(&mut self, state: &DecisionState, first: ActionKind) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Action::Pass);
        }
        let values = self.legal_values(state, Some(first))?;
        let (action, value) = values.best().unwrap_or((Action::Pass, 0.0));
        debug!(strategy = Self::NAME, player = %state.player, slot = "second", %action, value, "chose action");
        Ok(action)
    }
}
