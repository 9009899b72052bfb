//! Turn actions.
//!
//! A turn consists of up to two actions chosen from:
//! - `Draw(n)`: draw 1-3 cards from the deck
//! - `Take(player)`: take one random card from an opponent's hand
//! - `Pass`: end the turn
//!
//! Strategies produce actions; the turn engine executes them.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Number of cards drawn by a `Draw` action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DrawCount {
    One,
    Two,
    Three,
}

impl DrawCount {
    /// All draw counts in ascending order.
    pub const ALL: [DrawCount; 3] = [DrawCount::One, DrawCount::Two, DrawCount::Three];

    /// Number of cards drawn.
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            DrawCount::One => 1,
            DrawCount::Two => 2,
            DrawCount::Three => 3,
        }
    }

    /// Convert a raw count. Returns `None` outside 1..=3.
    #[must_use]
    pub const fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(DrawCount::One),
            2 => Some(DrawCount::Two),
            3 => Some(DrawCount::Three),
            _ => None,
        }
    }
}

/// The type of an action, without its argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Draw,
    Take,
    Pass,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Draw => f.write_str("draw"),
            ActionKind::Take => f.write_str("take"),
            ActionKind::Pass => f.write_str("pass"),
        }
    }
}

/// A complete turn action.
///
/// ```
/// use rust_rummy::core::{Action, ActionKind, DrawCount, PlayerId};
///
/// let draw = Action::Draw(DrawCount::Two);
/// let take = Action::Take(PlayerId::new(1));
///
/// assert_eq!(draw.kind(), ActionKind::Draw);
/// assert_eq!(take.to_string(), "take from Player 1");
/// assert!(Action::Pass.is_pass());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw cards from the top of the deck.
    Draw(DrawCount),
    /// Take one random card from the target opponent.
    Take(PlayerId),
    /// End the turn.
    Pass,
}

impl Action {
    /// Build a draw action from a raw count. A count of zero is a pass.
    ///
    /// Returns `None` for counts above 3.
    #[must_use]
    pub const fn draw(count: usize) -> Option<Self> {
        if count == 0 {
            return Some(Action::Pass);
        }
        match DrawCount::from_count(count) {
            Some(n) => Some(Action::Draw(n)),
            None => None,
        }
    }

    /// The action type.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Draw(_) => ActionKind::Draw,
            Action::Take(_) => ActionKind::Take,
            Action::Pass => ActionKind::Pass,
        }
    }

    /// Check if this is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }

    /// Target opponent for a take.
    #[must_use]
    pub const fn target(&self) -> Option<PlayerId> {
        match self {
            Action::Take(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Draw(n) => write!(f, "draw {}", n.get()),
            Action::Take(player) => write!(f, "take from {}", player),
            Action::Pass => f.write_str("pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_count_conversion() {
        for n in DrawCount::ALL {
            assert_eq!(DrawCount::from_count(n.get()), Some(n));
        }
        assert_eq!(DrawCount::from_count(0), None);
        assert_eq!(DrawCount::from_count(4), None);
    }

    #[test]
    fn test_draw_constructor() {
        assert_eq!(Action::draw(0), Some(Action::Pass));
        assert_eq!(Action::draw(2), Some(Action::Draw(DrawCount::Two)));
        assert_eq!(Action::draw(4), None);
    }

    #[test]
    fn test_action_kind_and_target() {
        let take = Action::Take(PlayerId::new(2));
        assert_eq!(take.kind(), ActionKind::Take);
        assert_eq!(take.target(), Some(PlayerId::new(2)));
        assert_eq!(Action::Pass.target(), None);
        assert_eq!(Action::Draw(DrawCount::One).kind(), ActionKind::Draw);
    }

    #[test]
    fn test_action_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |a: &Action| {
            let mut h = DefaultHasher::new();
            a.hash(&mut h);
            h.finish()
        };

        assert_eq!(hash(&Action::Take(PlayerId::new(1))), hash(&Action::Take(PlayerId::new(1))));
        assert_ne!(hash(&Action::Take(PlayerId::new(1))), hash(&Action::Take(PlayerId::new(2))));
    }

    #[test]
    fn test_action_serialization() {
        for action in [Action::Draw(DrawCount::Three), Action::Take(PlayerId::new(1)), Action::Pass] {
            let json = serde_json::to_string(&action).unwrap();
            let deserialized: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(action, deserialized);
        }
    }
}
