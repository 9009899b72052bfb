//! Core engine types: cards, hands, deck, players, actions, RNG, configuration.
//!
//! This module contains the fundamental building blocks shared by the group
//! analyzer, the discard optimizer, the evaluation models, and the strategies.

pub mod card;
pub mod hand;
pub mod deck;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;
pub mod combinatorics;

pub use card::{Card, CardId, Color, Signature};
pub use hand::Hand;
pub use deck::Deck;
pub use player::PlayerId;
pub use rng::GameRng;
pub use config::RulesConfig;
pub use action::{Action, ActionKind, DrawCount};
pub use state::{DecisionState, OpponentView};
pub use error::{EngineError, Result};
