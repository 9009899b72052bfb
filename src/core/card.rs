//! Card identity: physical card IDs, colors, and faces.
//!
//! ## Physical vs Face Identity
//!
//! The full deck holds two copies of every (color, number) face. Two cards with
//! the same face are still different objects: each physical card carries its own
//! `CardId`, and `Card` equality compares the ID as well as the face.
//!
//! Group *validity* only looks at faces (`Signature`). Group *disjointness*
//! (a card may only be discarded once) looks at `CardId`.
//!
//! ```
//! use rust_rummy::core::{Card, CardId, Color};
//!
//! let a = Card::new(CardId(0), Color::Red, 5);
//! let b = Card::new(CardId(1), Color::Red, 5);
//!
//! assert_ne!(a, b);          // different physical cards
//! assert!(a.same_face(&b));  // same face
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a physical card.
///
/// IDs are allocated by whoever builds the card population (normally
/// `Deck::standard`). They are never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card color. The set of colors is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// Number of colors in the game.
    pub const COUNT: usize = 4;

    /// All colors in canonical order.
    pub const ALL: [Color; Color::COUNT] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Dense index (0-based) for array-backed lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Parse a lowercase color name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Color::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The face of a card: (color, number). Copies of a card share a signature.
pub type Signature = (Color, u8);

/// A physical card.
///
/// Cards are immutable values; moving a card between deck and hands moves
/// the value, never mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Physical identity.
    pub id: CardId,
    /// Card color.
    pub color: Color,
    /// Card number, 1-based.
    pub number: u8,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(id: CardId, color: Color, number: u8) -> Self {
        Self { id, color, number }
    }

    /// The card face.
    #[must_use]
    pub const fn signature(&self) -> Signature {
        (self.color, self.number)
    }

    /// True if both cards show the same face (physical identity ignored).
    #[must_use]
    pub fn same_face(&self, other: &Card) -> bool {
        self.color == other.color && self.number == other.number
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_matches_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_color_names_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_name(color.name()), Some(color));
        }
        assert_eq!(Color::from_name("purple"), None);
    }

    #[test]
    fn test_physical_identity() {
        let a = Card::new(CardId(1), Color::Red, 5);
        let b = Card::new(CardId(2), Color::Red, 5);

        assert_ne!(a, b);
        assert!(a.same_face(&b));
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_card_display() {
        let card = Card::new(CardId(7), Color::Yellow, 10);
        assert_eq!(card.to_string(), "yellow 10");
        assert_eq!(CardId(7).to_string(), "Card(7)");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId(3), Color::Green, 4);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
