//! Headless turn engine.
//!
//! Holds the deck and the seats, runs the two-action turn state machine, and
//! executes draws, takes, and discards. A UI layer reads snapshots and turn
//! records from here; it never moves cards itself.

pub mod table;
pub mod turn;

pub use table::{GameOutcome, Hints, Seat, Table, TableBuilder, MAX_PLAYERS, MIN_PLAYERS};
pub use turn::{Turn, TurnPhase, TurnRecord};
