//! The draw deck.
//!
//! Cards move from the deck to a hand (draw) and from a hand back to the deck
//! (discard); they are never duplicated or destroyed. The top of the deck is
//! the end of the underlying vector.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Color};
use super::config::RulesConfig;
use super::rng::GameRng;

/// Ordered sequence of remaining cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck from existing cards (last card is the top).
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build the full, unshuffled deck: every color and number,
    /// `copies_per_card` times. IDs are allocated from 0.
    ///
    /// ```
    /// use rust_rummy::core::{Deck, RulesConfig};
    ///
    /// let deck = Deck::standard(&RulesConfig::default());
    /// assert_eq!(deck.len(), 80);
    /// ```
    #[must_use]
    pub fn standard(rules: &RulesConfig) -> Self {
        let mut cards = Vec::with_capacity(rules.deck_size());
        let mut next_id = 0u32;

        for color in Color::ALL {
            for number in 1..=rules.max_number {
                for _ in 0..rules.copies_per_card {
                    cards.push(Card::new(CardId(next_id), color, number));
                    next_id += 1;
                }
            }
        }

        Self { cards }
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of remaining cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Return a card to the top of the deck.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }
}
