//! Engine error type.
//!
//! Normal play never produces errors. Every variant here is either a
//! precondition violation by the caller (a logic error in the turn engine or
//! UI layer) or a resource failure while setting up the worker pool.

use thiserror::Error;

use super::action::Action;
use super::card::CardId;
use super::player::PlayerId;

/// Errors surfaced by the decision engine and the headless table.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An opponent with no cards was queried for a Take evaluation.
    ///
    /// The game ends before this state is reachable, so hitting it means the
    /// caller built an inconsistent snapshot.
    #[error("opponent {0} has no cards to take")]
    EmptyOpponentHand(PlayerId),

    /// The referenced player is not an opponent in the current snapshot.
    #[error("{0} is not an opponent at this table")]
    UnknownOpponent(PlayerId),

    /// A card was expected in a hand but is not there.
    #[error("{0} is not in the hand")]
    CardNotInHand(CardId),

    /// An action violates the legality gating or turn shape.
    #[error("illegal action {action}: {reason}")]
    IllegalAction {
        action: Action,
        reason: &'static str,
    },

    /// An operation was called in the wrong turn phase.
    #[error("turn order violation: {0}")]
    TurnOrder(&'static str),

    /// A seat has no strategy attached but was asked to play automatically.
    #[error("{0} has no strategy attached")]
    MissingStrategy(PlayerId),

    /// Table configuration is invalid.
    #[error("invalid table setup: {0}")]
    InvalidSetup(String),

    /// The bounded evaluation pool could not be created.
    #[error("worker pool unavailable: {0}")]
    WorkerPool(String),
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        EngineError::WorkerPool(err.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::DrawCount;

    #[test]
    fn test_error_messages() {
        let err = EngineError::EmptyOpponentHand(PlayerId::new(2));
        assert_eq!(err.to_string(), "opponent Player 2 has no cards to take");

        let err = EngineError::IllegalAction {
            action: Action::Draw(DrawCount::Three),
            reason: "hand too large",
        };
        assert_eq!(err.to_string(), "illegal action draw 3: hand too large");
    }
}
