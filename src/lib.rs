//! # rust-rummy
//!
//! Rule validation and decision engine for a set-collection card game.
//!
//! Players hold colored, numbered cards and try to empty their hands by
//! discarding valid groups: runs (one color, consecutive numbers) and sets
//! (one number, distinct colors), three cards or more. Each turn is up to
//! two actions: draw 1-3 cards, take a random card from an opponent, or pass.
//!
//! ## Design Principles
//!
//! 1. **Physical Identity**: Cards with the same color and number are still
//!    distinct objects. Discard plans never use one card twice.
//!
//! 2. **Perfect Information**: Evaluation models see the deck and every
//!    opponent's hand.
//!
//! 3. **Injected Randomness**: Every random choice draws from a seeded
//!    `GameRng`, so games and decisions replay exactly.
//!
//! ## Modules
//!
//! - `core`: Cards, hands, deck, players, actions, RNG, configuration, errors
//! - `groups`: Group validity, existence, largest group, enumeration
//! - `discard`: Best-discard selection and the exact packing solver
//! - `model`: Probability and expectation models on a bounded worker pool
//! - `strategy`: The `Strategy` trait, legality gating, four policies
//! - `game`: Headless table and turn state machine

pub mod core;
pub mod groups;
pub mod discard;
pub mod model;
pub mod strategy;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, Card, CardId, Color, DecisionState, Deck, DrawCount, EngineError, GameRng, Hand,
    OpponentView, PlayerId, Result, RulesConfig, Signature,
};

pub use crate::groups::{
    all_valid_groups, exists_valid_group, is_valid_group, largest_valid_group, DiscardPlan, Group, GroupKind,
};

pub use crate::discard::{find_best_discard, find_best_discard_count};

pub use crate::model::{ActionValues, EvaluationPool, ExpectationModel, ProbabilityModel};

pub use crate::strategy::{
    ExpectationStrategy, ProbabilityStrategy, RandomStrategy, RuleBasedStrategy, Strategy, StrategyKind,
};

pub use crate::game::{GameOutcome, Hints, Table, TableBuilder, TurnRecord};
