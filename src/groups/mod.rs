//! Valid groups: runs and sets.
//!
//! ## Shapes
//!
//! - **Run**: 3 or more cards of one color with consecutive distinct numbers
//! - **Set**: 3 or more cards of one number, each a distinct color
//!
//! The analyzer answers four questions about a hand: is a given selection a
//! group, does any group exist, what is the largest group, and what are all
//! groups. Groups are views over the hand's cards; discarding them is the
//! turn engine's job.

pub mod analyzer;
pub mod group;

pub use analyzer::{
    all_valid_groups, classify_group, exists_valid_group, is_valid_group, largest_valid_group,
    MAX_CARD_NUMBER, MIN_GROUP_SIZE,
};
pub use group::{DiscardPlan, Group, GroupKind};
