//! Turn state machine.
//!
//! ```text
//! NotStarted --first--> FirstActionChosen(kind) --second--> SecondActionChosen --> Done
//!      |
//!      +---- first = Pass ----------------------------------------------------> Done
//! ```
//!
//! The second action must differ in kind from the first: Take or Pass after
//! a Draw, Draw or Pass after a Take.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionKind, EngineError, PlayerId, Result};
use crate::groups::DiscardPlan;

/// Where a turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    NotStarted,
    FirstActionChosen(ActionKind),
    SecondActionChosen,
    Done,
}

/// One player's turn in progress.
#[derive(Clone, Debug)]
pub struct Turn {
    player: PlayerId,
    phase: TurnPhase,
    first: Option<Action>,
    second: Option<Action>,
    discarded: Vec<DiscardPlan>,
}

impl Turn {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            phase: TurnPhase::NotStarted,
            first: None,
            second: None,
            discarded: Vec::new(),
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Kind of the first action, once chosen.
    #[must_use]
    pub fn first_kind(&self) -> Option<ActionKind> {
        self.first.map(|a| a.kind())
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == TurnPhase::Done
    }

    /// Record the next action and advance the phase.
    pub fn record(&mut self, action: Action) -> Result<()> {
        match self.phase {
            TurnPhase::NotStarted => {
                self.first = Some(action);
                self.phase = if action.is_pass() {
                    TurnPhase::Done
                } else {
                    TurnPhase::FirstActionChosen(action.kind())
                };
                Ok(())
            }
            TurnPhase::FirstActionChosen(first) => {
                if !action.is_pass() && action.kind() == first {
                    return Err(EngineError::IllegalAction {
                        action,
                        reason: "second action must differ from the first",
                    });
                }
                self.second = Some(action);
                self.phase = TurnPhase::SecondActionChosen;
                Ok(())
            }
            TurnPhase::SecondActionChosen | TurnPhase::Done => {
                Err(EngineError::TurnOrder("both actions already taken"))
            }
        }
    }

    /// Add plans discarded during this turn.
    pub fn add_discards(&mut self, plans: impl IntoIterator<Item = DiscardPlan>) {
        self.discarded.extend(plans);
    }

    /// End the turn, whatever its phase.
    pub fn finish(mut self) -> TurnRecord {
        self.phase = TurnPhase::Done;
        TurnRecord {
            player: self.player,
            first: self.first.unwrap_or(Action::Pass),
            second: self.second,
            discarded: self.discarded,
        }
    }
}

/// What happened during a completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The player who moved.
    pub player: PlayerId,
    /// First action (Pass if the turn ended before one was chosen).
    pub first: Action,
    /// Second action, if the first was not Pass.
    pub second: Option<Action>,
    /// Plans discarded during the turn, in order.
    pub discarded: Vec<DiscardPlan>,
}

impl TurnRecord {
    /// Cards discarded during the turn.
    #[must_use]
    pub fn discarded_cards(&self) -> usize {
        self.discarded.iter().map(DiscardPlan::card_count).sum()
    }
}
