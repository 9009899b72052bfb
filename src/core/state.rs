//! Decision snapshots.
//!
//! A `DecisionState` is everything a strategy or evaluation model sees when
//! choosing an action:
//! - the deciding player's hand
//! - every opponent's hand, in seat order
//! - the remaining deck contents
//!
//! The models assume **perfect information**: the AI sees the actual cards in
//! the deck and in opponents' hands, not merely their counts.
//!
//! Snapshots are owned copies. Evaluations only read them, so a single
//! snapshot can be shared by every worker in the evaluation pool.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::{EngineError, Result};
use super::player::PlayerId;

/// One opponent as seen from the deciding player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    /// Opponent seat.
    pub player: PlayerId,
    /// Opponent's cards.
    pub hand: Vec<Card>,
}

impl OpponentView {
    /// Create an opponent view.
    #[must_use]
    pub fn new(player: PlayerId, hand: Vec<Card>) -> Self {
        Self { player, hand }
    }

    /// Number of cards the opponent holds.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }
}

/// Read-only game snapshot for one decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionState {
    /// The deciding player.
    pub player: PlayerId,

    /// The deciding player's cards.
    pub hand: Vec<Card>,

    /// Opponents in seat order.
    pub opponents: Vec<OpponentView>,

    /// Remaining deck cards.
    pub deck: Vec<Card>,
}

impl DecisionState {
    /// Create a snapshot.
    #[must_use]
    pub fn new(player: PlayerId, hand: Vec<Card>, opponents: Vec<OpponentView>, deck: Vec<Card>) -> Self {
        Self {
            player,
            hand,
            opponents,
            deck,
        }
    }

    /// Cards in the deciding player's hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Cards remaining in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Look up an opponent by seat.
    pub fn opponent(&self, player: PlayerId) -> Result<&OpponentView> {
        self.opponents
            .iter()
            .find(|o| o.player == player)
            .ok_or(EngineError::UnknownOpponent(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{CardId, Color};

    fn card(id: u32, color: Color, number: u8) -> Card {
        Card::new(CardId(id), color, number)
    }

    #[test]
    fn test_sizes() {
        let state = DecisionState::new(
            PlayerId::new(0),
            vec![card(0, Color::Red, 1), card(1, Color::Red, 2)],
            vec![OpponentView::new(PlayerId::new(1), vec![card(2, Color::Blue, 3)])],
            vec![card(3, Color::Green, 4), card(4, Color::Green, 5), card(5, Color::Green, 6)],
        );

        assert_eq!(state.hand_size(), 2);
        assert_eq!(state.deck_size(), 3);
        assert_eq!(state.opponent(PlayerId::new(1)).unwrap().hand_size(), 1);
    }

    #[test]
    fn test_unknown_opponent() {
        let state = DecisionState::new(PlayerId::new(0), vec![], vec![], vec![]);
        let err = state.opponent(PlayerId::new(2)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownOpponent(p) if p == PlayerId::new(2)));
    }
}
