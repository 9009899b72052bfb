//! Uniform choice among legal actions.

use tracing::debug;

use crate::core::{Action, ActionKind, DecisionState, GameRng, Result, RulesConfig};

use super::legality::{legal_first_actions, legal_second_actions};
use super::Strategy;

/// Picks uniformly among the legal actions for each slot.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rules: RulesConfig,
    rng: GameRng,
}

impl RandomStrategy {
    pub const NAME: &'static str = "DEFENSIVE";

    #[must_use]
    pub fn new(rules: RulesConfig, rng: GameRng) -> Self {
        Self { rules, rng }
    }

    fn pick(&mut self, state: &DecisionState, legal: &[Action]) -> Action {
        let action = self.rng.choose(legal).copied().unwrap_or(Action::Pass);
        debug!(strategy = Self::NAME, player = %state.player, %action, choices = legal.len(), "chose action");
        action
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_first_action(&mut self, state: &DecisionState) -> Result<Action> {
        let legal = legal_first_actions(state, &self.rules);
        Ok(self.pick(state, &legal))
    }

    fn choose_second_action(&mut self, state: &DecisionState, first: ActionKind) -> Result<Action> {
        let legal = legal_second_actions(state, first, &self.rules);
        Ok(self.pick(state, &legal))
    }
}
