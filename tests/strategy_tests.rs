//! Strategy tests: every policy stays inside the legal action space.

mod common;

use std::sync::Arc;

use rust_rummy::core::Color::{Blue, Green, Red, Yellow};
use rust_rummy::core::{
    Action, ActionKind, DecisionState, Deck, DrawCount, GameRng, Hand, OpponentView, PlayerId, RulesConfig,
    Signature,
};
use rust_rummy::model::EvaluationPool;
use rust_rummy::strategy::legality::is_legal;
use rust_rummy::strategy::{ExpectationStrategy, Strategy, StrategyKind};

fn pool() -> Arc<EvaluationPool> {
    Arc::new(EvaluationPool::new(2).unwrap())
}

/// Deal a random state: our hand, one opponent per entry of `opponents`,
/// and up to `deck_cap` cards left in the deck.
fn dealt_state(seed: u64, hand_size: usize, opponents: &[usize], deck_cap: usize) -> DecisionState {
    let mut rng = GameRng::new(seed);
    let mut deck = Deck::standard(&RulesConfig::default());
    deck.shuffle(&mut rng);

    let mut deal = |n: usize| -> Vec<_> { (0..n).filter_map(|_| deck.pop()).collect() };
    let hand = deal(hand_size);
    let views = opponents
        .iter()
        .enumerate()
        .map(|(i, &n)| OpponentView::new(PlayerId::new(i as u8 + 1), deal(n)))
        .collect();
    let rest = deal(deck_cap);
    DecisionState::new(PlayerId::new(0), hand, views, rest)
}

// ============================================================================
// Legality
// ============================================================================

#[test]
fn test_all_policies_choose_legal_actions() {
    common::init();
    let rules = RulesConfig::default();
    let pool = pool();

    for kind in StrategyKind::ALL {
        let mut strategy = kind.build(&rules, Arc::clone(&pool), 17);
        for seed in 0..12u64 {
            let hand_size = 2 + (seed as usize * 3) % 18;
            let s = dealt_state(seed, hand_size, &[2 + seed as usize % 5, 4], 24);

            let first = strategy.choose_first_action(&s).unwrap();
            assert!(is_legal(&s, first, None, &rules), "{kind}: first {first} at {hand_size}");

            if !first.is_pass() {
                let second = strategy.choose_second_action(&s, first.kind()).unwrap();
                assert!(
                    is_legal(&s, second, Some(first.kind()), &rules),
                    "{kind}: second {second} after {first}"
                );
            }
        }
    }
}

#[test]
fn test_full_hand_only_passes() {
    let rules = RulesConfig::default();
    let pool = pool();
    for kind in StrategyKind::ALL {
        let mut strategy = kind.build(&rules, Arc::clone(&pool), 3);
        let s = dealt_state(8, 20, &[6], 20);
        assert_eq!(strategy.choose_first_action(&s).unwrap(), Action::Pass, "{kind}");
        assert_eq!(strategy.choose_second_action(&s, ActionKind::Take).unwrap(), Action::Pass, "{kind}");
    }
}

#[test]
fn test_near_limit_draws_at_most_one() {
    let rules = RulesConfig::default();
    let pool = pool();
    for kind in StrategyKind::ALL {
        let mut strategy = kind.build(&rules, Arc::clone(&pool), 5);
        for seed in 0..6 {
            let s = dealt_state(seed, 19, &[1, 2], 20);
            let first = strategy.choose_first_action(&s).unwrap();
            assert!(
                matches!(first, Action::Pass | Action::Draw(DrawCount::One)),
                "{kind}: {first} with 19 cards and no takeable opponent"
            );
        }
    }
}

#[test]
fn test_no_take_from_short_opponents() {
    let rules = RulesConfig::default();
    let pool = pool();
    for kind in StrategyKind::ALL {
        let mut strategy = kind.build(&rules, Arc::clone(&pool), 9);
        for seed in 0..6 {
            let s = dealt_state(seed, 4, &[2, 1], 12);
            let first = strategy.choose_first_action(&s).unwrap();
            assert_ne!(first.kind(), ActionKind::Take, "{kind}");
        }
    }
}

// ============================================================================
// Anti-stall
// ============================================================================

fn faces_state(hand: &[Signature], opponent: &[Signature], deck: &[Signature]) -> DecisionState {
    DecisionState::new(
        PlayerId::new(0),
        Hand::from_signatures(0, hand).cards().to_vec(),
        vec![OpponentView::new(PlayerId::new(1), Hand::from_signatures(100, opponent).cards().to_vec())],
        Hand::from_signatures(200, deck).cards().to_vec(),
    )
}

#[test]
fn test_expectation_policy_breaks_pass_streak() {
    let rules = RulesConfig::default();
    let mut strategy = ExpectationStrategy::new(rules.clone(), pool(), GameRng::new(2));
    let s = faces_state(
        &[(Red, 1), (Blue, 5)],
        &[(Green, 8), (Yellow, 2), (Green, 6)],
        &[(Yellow, 9), (Green, 3), (Blue, 10)],
    );

    let choices: Vec<Action> = (0..6).map(|_| strategy.choose_first_action(&s).unwrap()).collect();
    assert_eq!(
        choices,
        vec![
            Action::Pass,
            Action::Pass,
            Action::Draw(DrawCount::One),
            Action::Pass,
            Action::Pass,
            Action::Draw(DrawCount::One),
        ]
    );
}

#[test]
fn test_strategy_names() {
    let rules = RulesConfig::default();
    let names: Vec<&str> = StrategyKind::ALL
        .iter()
        .map(|k| k.build(&rules, pool(), 0).name())
        .collect();
    assert_eq!(names, vec!["DEFENSIVE", "AGGRESSIVE", "X-AGGRESSIVE", "X-DEFENSIVE"]);
    assert_eq!(StrategyKind::from_name("x-defensive"), Some(StrategyKind::Expectation));
}
