//! Highest group-forming probability.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Action, ActionKind, DecisionState, Result, RulesConfig};
use crate::model::{ActionValues, EvaluationPool, ProbabilityModel};

use super::legality::{is_legal, only_pass};
use super::Strategy;

/// Chooses the legal action most likely to produce a valid group.
///
/// On the second action, passes unless some action has a positive chance.
#[derive(Clone, Debug)]
pub struct ProbabilityStrategy {
    rules: RulesConfig,
    model: ProbabilityModel,
}

impl ProbabilityStrategy {
    pub const NAME: &'static str = "X-AGGRESSIVE";

    #[must_use]
    pub fn new(rules: RulesConfig, pool: Arc<EvaluationPool>) -> Self {
        Self {
            rules,
            model: ProbabilityModel::new(pool),
        }
    }

    fn legal_values(&self, state: &DecisionState, first: Option<ActionKind>) -> Result<ActionValues> {
        let mut values = self.model.calculate_probabilities(state)?;
        values.retain(|a| is_legal(state, *a, first, &self.rules));
        Ok(values)
    }
}

impl Strategy for ProbabilityStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_first_action(&mut self, state: &DecisionState) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Action::Pass);
        }
        let values = self.legal_values(state, None)?;
        let (action, value) = values.best().unwrap_or((Action::Pass, 0.0));
        debug!(strategy = Self::NAME, player = %state.player, slot = "first", %action, value, "chose action");
        Ok(action)
    }

    fn choose_second_action(&mut self, state: &DecisionState, first: ActionKind) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Action::Pass);
        }
        let values = self.legal_values(state, Some(first))?;
        let action = match values.best() {
            Some((action, value)) if value > 0.0 => action,
            _ => Action::Pass,
        };
        debug!(strategy = Self::NAME, player = %state.player, slot = "second", %action, "chose action");
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color::{Blue, Green, Red, Yellow};
    use crate::core::{DrawCount, Hand, OpponentView, PlayerId, Signature};

    fn strategy() -> ProbabilityStrategy {
        ProbabilityStrategy::new(RulesConfig::default(), Arc::new(EvaluationPool::new(2).unwrap()))
    }

    fn state(hand: &[Signature], opponent: &[Signature], deck: &[Signature]) -> DecisionState {
        DecisionState::new(
            PlayerId::new(0),
            Hand::from_signatures(0, hand).cards().to_vec(),
            vec![OpponentView::new(PlayerId::new(1), Hand::from_signatures(100, opponent).cards().to_vec())],
            Hand::from_signatures(200, deck).cards().to_vec(),
        )
    }

    #[test]
    fn test_prefers_sure_take() {
        // Every opponent card completes the set on 5; the deck has one helper in four.
        let s = state(
            &[(Red, 5), (Blue, 5)],
            &[(Green, 5), (Yellow, 5), (Green, 5)],
            &[(Green, 5), (Red, 9), (Blue, 1), (Yellow, 7)],
        );
        assert_eq!(strategy().choose_first_action(&s).unwrap(), Action::Take(PlayerId::new(1)));
    }

    #[test]
    fn test_skips_small_opponent() {
        let s = state(
            &[(Red, 5), (Blue, 5)],
            &[(Green, 5), (Yellow, 5)],
            &[(Green, 5), (Red, 9), (Blue, 1), (Yellow, 7)],
        );
        let action = strategy().choose_first_action(&s).unwrap();
        assert_ne!(action, Action::Take(PlayerId::new(1)));
        assert_eq!(action.kind(), ActionKind::Draw);
    }

    #[test]
    fn test_second_passes_without_chance() {
        let s = state(&[(Red, 1), (Blue, 5)], &[(Green, 9), (Yellow, 3), (Green, 7)], &[(Red, 9)]);
        assert_eq!(strategy().choose_second_action(&s, ActionKind::Draw).unwrap(), Action::Pass);
    }

    #[test]
    fn test_gating_at_limit() {
        let faces: Vec<Signature> = (1..=10).flat_map(|n| [(Red, n), (Blue, n)]).collect();
        let mut s = state(&faces, &[(Green, 9), (Yellow, 3), (Green, 7)], &[(Green, 1), (Green, 2)]);
        assert_eq!(strategy().choose_first_action(&s).unwrap(), Action::Pass);

        s.hand.pop();
        for _ in 0..3 {
            let action = strategy().choose_first_action(&s).unwrap();
            assert!(!matches!(action, Action::Draw(DrawCount::Two) | Action::Draw(DrawCount::Three)));
        }
    }
}
