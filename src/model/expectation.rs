//! Expected hand-size reduction after an action.
//!
//! Each outcome that leaves the hand holding a valid group is scored by the
//! number of cards the best discard would remove; the net value subtracts
//! the cards gained by the action itself.
//!
//! ## Sampling
//!
//! Drawing 2 or 3 cards from a large deck has too many combinations to score
//! exhaustively. Above `exact_combination_limit` combinations `C`:
//!
//! ```text
//! ratio   = C / sample_divisor          (integer division)
//! samples = C / ratio
//! value   = ratio * sum(score(sample) / C) - k
//! ```
//!
//! Samples are distinct combinations drawn uniformly by rank.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::combinatorics::{binomial, unrank, Combinations};
use crate::core::{Action, Card, DecisionState, DrawCount, EngineError, GameRng, PlayerId, Result, RulesConfig};
use crate::discard::find_best_discard_count;
use crate::groups::exists_valid_group;

use super::pool::EvaluationPool;
use super::probe::{candidate_actions, ProbeHand};
use super::values::ActionValues;

/// Discard count of a probed hand, or zero if it holds no group.
fn score(cards: &[Card]) -> f64 {
    if exists_valid_group(cards) {
        find_best_discard_count(cards) as f64
    } else {
        0.0
    }
}

/// Evaluates expected hand-size reduction on the shared pool.
#[derive(Clone, Debug)]
pub struct ExpectationModel {
    pool: Arc<EvaluationPool>,
    exact_combination_limit: u64,
    sample_divisor: u64,
}

impl ExpectationModel {
    /// Create a model that evaluates on `pool` with the rules' sampling limits.
    #[must_use]
    pub fn new(pool: Arc<EvaluationPool>, rules: &RulesConfig) -> Self {
        Self {
            pool,
            exact_combination_limit: rules.exact_combination_limit,
            sample_divisor: rules.sample_divisor.max(1),
        }
    }

    /// Check whether drawing `count` cards from `deck_size` would be sampled.
    #[must_use]
    pub fn is_sampled(&self, deck_size: usize, count: DrawCount) -> bool {
        count != DrawCount::One && binomial(deck_size, count.get()) > self.exact_combination_limit
    }

    /// Expected net reduction from drawing `count` cards.
    ///
    /// `rng` is only consumed when the draw is sampled. When the deck holds
    /// fewer than `count` cards the value is `-count`.
    pub fn draw_expectation(&self, state: &DecisionState, count: DrawCount, rng: &mut GameRng) -> f64 {
        let k = count.get();
        let n = state.deck_size();
        let combinations = binomial(n, k);
        if combinations == 0 {
            return -(k as f64);
        }

        let mut probe = ProbeHand::new(&state.hand);
        let weight = 1.0 / combinations as f64;
        let mut accumulated = 0.0;
        let mut ratio = 1u64;

        if self.is_sampled(n, count) {
            ratio = (combinations / self.sample_divisor).max(1);
            let samples = combinations / ratio;
            debug!(draw = k, combinations, samples, ratio, "sampling draw expectation");

            let population = usize::try_from(combinations).unwrap_or(usize::MAX);
            let sample_count = usize::try_from(samples).unwrap_or(population).min(population);
            for rank in rng.sample_indices(population, sample_count) {
                let combo = unrank(rank as u64, n, k);
                accumulated += probe.with(combo.iter().map(|&i| state.deck[i]), score) * weight;
            }
        } else {
            for combo in Combinations::new(n, k) {
                accumulated += probe.with(combo.iter().map(|&i| state.deck[i]), score) * weight;
            }
        }

        accumulated * ratio as f64 - k as f64
    }

    /// Expected net reduction from taking one card from `target`.
    pub fn take_expectation(state: &DecisionState, target: PlayerId) -> Result<f64> {
        let opponent = state.opponent(target)?;
        if opponent.hand.is_empty() {
            return Err(EngineError::EmptyOpponentHand(target));
        }

        let mut probe = ProbeHand::new(&state.hand);
        let weight = 1.0 / opponent.hand_size() as f64;
        let expected: f64 = opponent
            .hand
            .iter()
            .map(|&card| probe.with([card], score) * weight)
            .sum();

        Ok(expected - 1.0)
    }

    /// Expectation for every candidate action, evaluated concurrently.
    ///
    /// Each candidate gets its own fork of `rng`, made before dispatch, so
    /// the result depends only on the seed. Entries: draw 1, draw 2, draw 3,
    /// one take per opponent, pass (fixed at 0).
    pub fn calculate_expectations(&self, state: &DecisionState, rng: &mut GameRng) -> Result<ActionValues> {
        let actions = candidate_actions(state);
        let tasks: Vec<(Action, GameRng)> = actions.iter().map(|&a| (a, rng.fork())).collect();

        let values = self.pool.evaluate(tasks, |(action, mut task_rng)| {
            let value = match action {
                Action::Draw(count) => self.draw_expectation(state, count, &mut task_rng),
                Action::Take(target) => Self::take_expectation(state, target)?,
                Action::Pass => 0.0,
            };
            trace!(player = %state.player, %action, value, "expectation");
            Ok(value)
        })?;

        let mut table: ActionValues = actions.into_iter().zip(values).collect();
        table.insert(Action::Pass, 0.0);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color::{Blue, Green, Red, Yellow};
    use crate::core::{Hand, OpponentView, Signature};

    fn model(rules: &RulesConfig) -> ExpectationModel {
        ExpectationModel::new(Arc::new(EvaluationPool::new(2).unwrap()), rules)
    }

    fn state(hand: &[Signature], deck: &[Signature], opponent: &[Signature]) -> DecisionState {
        DecisionState::new(
            PlayerId::new(0),
            Hand::from_signatures(0, hand).cards().to_vec(),
            vec![OpponentView::new(PlayerId::new(1), Hand::from_signatures(200, opponent).cards().to_vec())],
            Hand::from_signatures(100, deck).cards().to_vec(),
        )
    }

    #[test]
    fn test_draw_one_exact() {
        // One of four deck cards completes a 3-run: 3 * 1/4 - 1.
        let s = state(&[(Red, 1), (Red, 2)], &[(Red, 3), (Blue, 4), (Green, 5), (Yellow, 6)], &[]);
        let mut rng = GameRng::new(1);
        let value = model(&RulesConfig::default()).draw_expectation(&s, DrawCount::One, &mut rng);
        assert!((value - (0.75 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_draw_scores_best_discard() {
        // Drawing red 4 makes a 4-run.
        let s = state(&[(Red, 1), (Red, 2), (Red, 3)], &[(Red, 4)], &[]);
        let mut rng = GameRng::new(1);
        let value = model(&RulesConfig::default()).draw_expectation(&s, DrawCount::One, &mut rng);
        assert!((value - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_draw_from_short_deck() {
        let s = state(&[(Red, 1)], &[(Red, 2)], &[]);
        let mut rng = GameRng::new(1);
        let m = model(&RulesConfig::default());
        assert_eq!(m.draw_expectation(&s, DrawCount::Three, &mut rng), -3.0);
        assert_eq!(m.draw_expectation(&s, DrawCount::One, &mut rng), -1.0);
    }

    #[test]
    fn test_sampling_threshold() {
        let m = model(&RulesConfig::default());
        // 63 choose 2 = 1953, 64 choose 2 = 2016.
        assert!(!m.is_sampled(63, DrawCount::Two));
        assert!(m.is_sampled(64, DrawCount::Two));
        assert!(!m.is_sampled(80, DrawCount::One));
    }

    #[test]
    fn test_take_expectation() {
        // Opponent: red 3 completes the run (3 cards), blue 9 and green 9 do nothing.
        let s = state(&[(Red, 1), (Red, 2)], &[], &[(Red, 3), (Blue, 9), (Green, 9)]);
        let value = ExpectationModel::take_expectation(&s, PlayerId::new(1)).unwrap();
        assert!((value - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_expectations_is_seed_deterministic() {
        let rules = RulesConfig::default().with_sampling(10, 5);
        let m = model(&rules);
        let deck: Vec<Signature> = (1..=6).flat_map(|n| [(Blue, n), (Green, n)]).collect();
        let s = state(&[(Red, 1), (Red, 2), (Yellow, 3)], &deck, &[(Red, 3), (Blue, 9), (Green, 9)]);

        let a = m.calculate_expectations(&s, &mut GameRng::new(9)).unwrap();
        let b = m.calculate_expectations(&s, &mut GameRng::new(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(&Action::Pass), Some(0.0));
        assert_eq!(a.len(), 5);
    }
}
