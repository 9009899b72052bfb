//! Hand-size rules with opportunistic takes.
//!
//! ## Take rule
//!
//! An opponent is *worthy* if they can be taken from and hold at least one
//! card that would make our largest valid group strictly larger (or create
//! one where none exists). Among worthy opponents, the one with the most
//! cards is the target if they hold more cards than we do; a tie for most
//! cards is broken at random.
//!
//! ## Draw rule
//!
//! | Hand size | Draw |
//! |---|---|
//! | `< 8` | 3 |
//! | `< 16` | 1 to 3 at random |
//! | `< max` | 0 or 1 at random (0 is a pass) |
//! | otherwise | pass |
//!
//! The count is capped by the hand-size gating.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Action, ActionKind, Card, DecisionState, GameRng, OpponentView, PlayerId, Result, RulesConfig};
use crate::groups::largest_valid_group;

use super::legality::{allowed_draw_counts, can_take_from, only_pass};
use super::Strategy;

/// Below this hand size, always draw three.
const EAGER_DRAW_BELOW: usize = 8;

/// Below this hand size, draw one to three.
const STEADY_DRAW_BELOW: usize = 16;

/// Rule-driven policy.
#[derive(Clone, Debug)]
pub struct RuleBasedStrategy {
    rules: RulesConfig,
    rng: GameRng,
}

impl RuleBasedStrategy {
    pub const NAME: &'static str = "AGGRESSIVE";

    #[must_use]
    pub fn new(rules: RulesConfig, rng: GameRng) -> Self {
        Self { rules, rng }
    }

    /// Check whether any of the opponent's cards improves our largest group.
    fn is_worthy(hand: &[Card], current_best: usize, opponent: &OpponentView) -> bool {
        let mut probe = Vec::with_capacity(hand.len() + 1);
        probe.extend_from_slice(hand);
        opponent.hand.iter().any(|&card| {
            probe.push(card);
            let improved = largest_valid_group(&probe).is_some_and(|g| g.len() > current_best);
            probe.pop();
            improved
        })
    }

    /// Opponent to take from, if the take rule fires.
    fn take_target(&mut self, state: &DecisionState) -> Option<PlayerId> {
        let current_best = largest_valid_group(&state.hand).map_or(0, |g| g.len());
        let worthy: SmallVec<[&OpponentView; 2]> = state
            .opponents
            .iter()
            .filter(|o| can_take_from(o, &self.rules))
            .filter(|o| Self::is_worthy(&state.hand, current_best, o))
            .collect();

        let most = worthy.iter().map(|o| o.hand_size()).max()?;
        if most <= state.hand_size() {
            return None;
        }
        let leaders: SmallVec<[PlayerId; 2]> = worthy
            .iter()
            .filter(|o| o.hand_size() == most)
            .map(|o| o.player)
            .collect();

        if leaders.len() == 1 {
            leaders.first().copied()
        } else {
            self.rng.choose(&leaders).copied()
        }
    }

    /// Draw action from the hand-size rule, capped by gating.
    fn draw_by_hand_size(&mut self, state: &DecisionState) -> Action {
        let hand_size = state.hand_size();
        let wanted = if hand_size < EAGER_DRAW_BELOW {
            3
        } else if hand_size < STEADY_DRAW_BELOW {
            self.rng.gen_range_inclusive(1..=3)
        } else if hand_size < self.rules.max_hand_size {
            self.rng.gen_range_inclusive(0..=1)
        } else {
            0
        };

        let cap = allowed_draw_counts(hand_size, &self.rules)
            .last()
            .map_or(0, |n| n.get());
        Action::draw(wanted.min(cap)).unwrap_or(Action::Pass)
    }

    fn log(state: &DecisionState, slot: &str, action: Action) -> Action {
        debug!(strategy = Self::NAME, player = %state.player, slot, %action, "chose action");
        action
    }
}

impl Strategy for RuleBasedStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_first_action(&mut self, state: &DecisionState) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Self::log(state, "first", Action::Pass));
        }
        let action = match self.take_target(state) {
            Some(target) => Action::Take(target),
            None => self.draw_by_hand_size(state),
        };
        Ok(Self::log(state, "first", action))
    }

    fn choose_second_action(&mut self, state: &DecisionState, first: ActionKind) -> Result<Action> {
        if only_pass(state.hand_size(), &self.rules) {
            return Ok(Self::log(state, "second", Action::Pass));
        }
        let action = match first {
            ActionKind::Draw => self.take_target(state).map_or(Action::Pass, Action::Take),
            ActionKind::Take => self.draw_by_hand_size(state),
            ActionKind::Pass => Action::Pass,
        };
        Ok(Self::log(state, "second", action))
    }
}
