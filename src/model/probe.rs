//! Scratch hands for temporary add/remove probing.

use crate::core::{Action, Card, DecisionState, DrawCount};

/// A private copy of a hand that cards can be added to for one query and
/// removed from again.
pub(crate) struct ProbeHand {
    cards: Vec<Card>,
    base: usize,
}

impl ProbeHand {
    pub(crate) fn new(hand: &[Card]) -> Self {
        let mut cards = Vec::with_capacity(hand.len() + 3);
        cards.extend_from_slice(hand);
        Self {
            base: cards.len(),
            cards,
        }
    }

    /// Run `query` on the hand plus `extra`, then restore the hand.
    pub(crate) fn with<R>(&mut self, extra: impl IntoIterator<Item = Card>, query: impl FnOnce(&[Card]) -> R) -> R {
        self.cards.extend(extra);
        let result = query(&self.cards);
        self.cards.truncate(self.base);
        result
    }
}

/// Draw and take candidates in evaluation order: draw 1, 2, 3, then one take
/// per opponent in seat order.
pub(crate) fn candidate_actions(state: &DecisionState) -> Vec<Action> {
    DrawCount::ALL
        .into_iter()
        .map(Action::Draw)
        .chain(state.opponents.iter().map(|o| Action::Take(o.player)))
        .collect()
}
