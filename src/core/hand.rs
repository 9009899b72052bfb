//! Hands: the multiset of cards owned by one player.
//!
//! A hand is mutated only through `add`/`remove`. Order carries no meaning
//! for the rules, but it is kept stable so that analysis results (which pick
//! "the first matching card" when duplicates exist) are reproducible.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Color, Signature};
use super::error::{EngineError, Result};
use super::rng::GameRng;

/// Cards held by a single player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand from existing cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Create a hand from faces, allocating card IDs `first_id..`.
    ///
    /// Useful for analysis and tests where the cards do not come from a deck.
    ///
    /// ```
    /// use rust_rummy::core::{Color, Hand};
    ///
    /// let hand = Hand::from_signatures(0, &[(Color::Red, 1), (Color::Red, 1)]);
    /// assert_eq!(hand.len(), 2);
    /// assert_ne!(hand.cards()[0], hand.cards()[1]);
    /// ```
    #[must_use]
    pub fn from_signatures(first_id: u32, faces: &[Signature]) -> Self {
        let cards = faces
            .iter()
            .zip(first_id..)
            .map(|(&(color, number), id)| Card::new(CardId(id), color, number))
            .collect();
        Self { cards }
    }

    /// The cards, in insertion order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over the cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Check whether a physical card is held.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Count cards showing a given face.
    #[must_use]
    pub fn count_face(&self, color: Color, number: u8) -> usize {
        self.cards
            .iter()
            .filter(|c| c.color == color && c.number == number)
            .count()
    }

    /// Add a card to the hand.
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove a physical card from the hand.
    pub fn remove(&mut self, id: CardId) -> Result<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(EngineError::CardNotInHand(id))?;
        Ok(self.cards.remove(index))
    }

    /// Remove the card at a position. Returns `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Shuffle the hand in place (done before an opponent takes a card).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::from_cards(cards)
    }
}
