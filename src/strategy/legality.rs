//! Legality gating and turn shape.
//!
//! ## Hand-size gating
//!
//! With `MAX = max_hand_size`:
//!
//! | Hand size | Allowed |
//! |---|---|
//! | `>= MAX` | Pass only |
//! | `MAX - 1` | no Draw 2, no Draw 3 |
//! | `MAX - 2` | no Draw 3 |
//!
//! Equivalently, `Draw(k)` is allowed iff `hand + k <= MAX`.
//!
//! ## Take targets
//!
//! Never take from an opponent holding fewer than `min_take_target` cards.
//!
//! ## Turn shape
//!
//! After Draw the second action is Take or Pass; after Take it is Draw or
//! Pass; after Pass there is no second action.

use smallvec::SmallVec;

use crate::core::{Action, ActionKind, DecisionState, DrawCount, EngineError, OpponentView, Result, RulesConfig};

/// Check whether the hand is too large for anything but Pass.
#[must_use]
pub fn only_pass(hand_size: usize, rules: &RulesConfig) -> bool {
    hand_size >= rules.max_hand_size
}

/// Draw counts the hand-size gating allows, ascending.
#[must_use]
pub fn allowed_draw_counts(hand_size: usize, rules: &RulesConfig) -> SmallVec<[DrawCount; 3]> {
    DrawCount::ALL
        .into_iter()
        .filter(|n| hand_size + n.get() <= rules.max_hand_size)
        .collect()
}

/// Check whether an opponent holds enough cards to be taken from.
#[must_use]
pub fn can_take_from(opponent: &OpponentView, rules: &RulesConfig) -> bool {
    opponent.hand_size() >= rules.min_take_target
}

fn draws(state: &DecisionState, rules: &RulesConfig) -> impl Iterator<Item = Action> {
    allowed_draw_counts(state.hand_size(), rules).into_iter().map(Action::Draw)
}

fn takes<'a>(state: &'a DecisionState, rules: &'a RulesConfig) -> impl Iterator<Item = Action> + 'a {
    state
        .opponents
        .iter()
        .filter(move |o| can_take_from(o, rules))
        .map(|o| Action::Take(o.player))
}

/// Legal first actions: draws, takes in seat order, then Pass.
#[must_use]
pub fn legal_first_actions(state: &DecisionState, rules: &RulesConfig) -> Vec<Action> {
    if only_pass(state.hand_size(), rules) {
        return vec![Action::Pass];
    }
    let mut actions: Vec<Action> = draws(state, rules).chain(takes(state, rules)).collect();
    actions.push(Action::Pass);
    actions
}

/// Legal second actions given the kind of the first action.
///
/// Empty after a Pass, since the turn is already over.
#[must_use]
pub fn legal_second_actions(state: &DecisionState, first: ActionKind, rules: &RulesConfig) -> Vec<Action> {
    if first == ActionKind::Pass {
        return Vec::new();
    }
    if only_pass(state.hand_size(), rules) {
        return vec![Action::Pass];
    }
    let mut actions: Vec<Action> = match first {
        ActionKind::Draw => takes(state, rules).collect(),
        ActionKind::Take => draws(state, rules).collect(),
        ActionKind::Pass => Vec::new(),
    };
    actions.push(Action::Pass);
    actions
}

/// Validate an action for the given turn slot.
///
/// `first` is `None` for the first action and the first action's kind for the
/// second.
pub fn check_action(
    state: &DecisionState,
    action: Action,
    first: Option<ActionKind>,
    rules: &RulesConfig,
) -> Result<()> {
    check_with_take_minimum(state, action, first, rules, rules.min_take_target)
}

/// Validate an action chosen at the UI for a seat without a strategy.
///
/// Same as [`check_action`] except that a human may take from any opponent
/// still holding a card.
pub fn check_human_action(
    state: &DecisionState,
    action: Action,
    first: Option<ActionKind>,
    rules: &RulesConfig,
) -> Result<()> {
    check_with_take_minimum(state, action, first, rules, 1)
}

fn check_with_take_minimum(
    state: &DecisionState,
    action: Action,
    first: Option<ActionKind>,
    rules: &RulesConfig,
    take_minimum: usize,
) -> Result<()> {
    if let Some(ActionKind::Pass) = first {
        return Err(EngineError::TurnOrder("no second action after a pass"));
    }

    let illegal = |reason| Err(EngineError::IllegalAction { action, reason });

    match action {
        Action::Pass => Ok(()),
        _ if only_pass(state.hand_size(), rules) => illegal("hand is full"),
        Action::Draw(_) if first == Some(ActionKind::Draw) => illegal("cannot draw twice in one turn"),
        Action::Take(_) if first == Some(ActionKind::Take) => illegal("cannot take twice in one turn"),
        Action::Draw(n) => {
            if state.hand_size() + n.get() > rules.max_hand_size {
                illegal("draw would exceed the hand limit")
            } else {
                Ok(())
            }
        }
        Action::Take(target) => {
            let opponent = state.opponent(target)?;
            if opponent.hand_size() >= take_minimum.max(1) {
                Ok(())
            } else {
                illegal("target holds too few cards")
            }
        }
    }
}

/// Check legality without the reason.
#[must_use]
pub fn is_legal(state: &DecisionState, action: Action, first: Option<ActionKind>, rules: &RulesConfig) -> bool {
    check_action(state, action, first, rules).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardId, Color, PlayerId};

    fn cards(count: usize, first_id: u32) -> Vec<Card> {
        (0..count)
            .map(|i| Card::new(CardId(first_id + i as u32), Color::ALL[i % 4], (i % 10) as u8 + 1))
            .collect()
    }

    fn state(hand: usize, opponents: &[usize]) -> DecisionState {
        let opponents = opponents
            .iter()
            .enumerate()
            .map(|(i, &n)| OpponentView::new(PlayerId::new(i as u8 + 1), cards(n, 100 * (i as u32 + 1))))
            .collect();
        DecisionState::new(PlayerId::new(0), cards(hand, 0), opponents, cards(10, 1000))
    }

    #[test]
    fn test_draw_gating() {
        let rules = RulesConfig::default();
        assert_eq!(allowed_draw_counts(17, &rules).as_slice(), &DrawCount::ALL);
        assert_eq!(allowed_draw_counts(18, &rules).as_slice(), &[DrawCount::One, DrawCount::Two]);
        assert_eq!(allowed_draw_counts(19, &rules).as_slice(), &[DrawCount::One]);
        assert!(allowed_draw_counts(20, &rules).is_empty());
        assert!(only_pass(20, &rules));
        assert!(!only_pass(19, &rules));
    }

    #[test]
    fn test_full_hand_only_pass() {
        let rules = RulesConfig::default();
        let s = state(20, &[5, 5]);
        assert_eq!(legal_first_actions(&s, &rules), vec![Action::Pass]);
        assert_eq!(legal_second_actions(&s, ActionKind::Draw, &rules), vec![Action::Pass]);
    }

    #[test]
    fn test_small_opponents_excluded() {
        let rules = RulesConfig::default();
        let s = state(5, &[2, 3]);
        let actions = legal_first_actions(&s, &rules);
        assert!(!actions.contains(&Action::Take(PlayerId::new(1))));
        assert!(actions.contains(&Action::Take(PlayerId::new(2))));
        assert_eq!(actions.len(), 5);
    }

    #[test]
    fn test_turn_shape() {
        let rules = RulesConfig::default();
        let s = state(5, &[5]);

        let after_draw = legal_second_actions(&s, ActionKind::Draw, &rules);
        assert_eq!(after_draw, vec![Action::Take(PlayerId::new(1)), Action::Pass]);

        let after_take = legal_second_actions(&s, ActionKind::Take, &rules);
        assert_eq!(after_take.len(), 4);
        assert!(after_take.iter().all(|a| a.kind() != ActionKind::Take));

        assert!(legal_second_actions(&s, ActionKind::Pass, &rules).is_empty());
    }

    #[test]
    fn test_check_action_reasons() {
        let rules = RulesConfig::default();
        let s = state(19, &[2]);

        assert!(is_legal(&s, Action::Draw(DrawCount::One), None, &rules));
        assert!(matches!(
            check_action(&s, Action::Draw(DrawCount::Two), None, &rules),
            Err(EngineError::IllegalAction { .. })
        ));
        assert!(matches!(
            check_action(&s, Action::Take(PlayerId::new(1)), None, &rules),
            Err(EngineError::IllegalAction { .. })
        ));
        assert!(matches!(
            check_action(&s, Action::Draw(DrawCount::One), Some(ActionKind::Draw), &rules),
            Err(EngineError::IllegalAction { .. })
        ));
        assert!(matches!(
            check_action(&s, Action::Pass, Some(ActionKind::Pass), &rules),
            Err(EngineError::TurnOrder(_))
        ));
        assert!(matches!(
            check_action(&s, Action::Take(PlayerId::new(7)), None, &rules),
            Err(EngineError::UnknownOpponent(_))
        ));
    }

    #[test]
    fn test_human_take_needs_only_one_card() {
        let rules = RulesConfig::default();
        let s = state(5, &[1, 0]);

        assert!(!is_legal(&s, Action::Take(PlayerId::new(1)), None, &rules));
        assert!(check_human_action(&s, Action::Take(PlayerId::new(1)), None, &rules).is_ok());
        assert!(matches!(
            check_human_action(&s, Action::Take(PlayerId::new(2)), None, &rules),
            Err(EngineError::IllegalAction { .. })
        ));
        assert!(matches!(
            check_human_action(&s, Action::Take(PlayerId::new(1)), Some(ActionKind::Take), &rules),
            Err(EngineError::IllegalAction { .. })
        ));
    }
}
