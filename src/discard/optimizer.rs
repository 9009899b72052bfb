//! Best-discard selection.
//!
//! Candidates are every valid group in the hand. The selection path depends
//! on their shape:
//!
//! 1. no candidates: empty plan
//! 2. one candidate: that group
//! 3. every candidate has exactly 3 cards: subset search from the largest
//!    subset down, keeping the first subset whose face usage fits the hand
//! 4. otherwise: exact set packing over card faces
//!
//! Selections are made on faces, then materialized by assigning each
//! required face to a physical card not yet used by an earlier group.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::core::combinatorics::Combinations;
use crate::core::{Card, Signature};
use crate::groups::{all_valid_groups, DiscardPlan, Group, MIN_GROUP_SIZE};

use super::packing::SetPacking;

/// How many cards of each face the hand holds.
fn face_counts(cards: &[Card]) -> FxHashMap<Signature, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(card.signature()).or_insert(0) += 1;
    }
    counts
}

/// Check that the groups together use no face more often than the hand has it.
fn fits_hand(groups: &[&Group], counts: &FxHashMap<Signature, usize>) -> bool {
    let mut usage: FxHashMap<Signature, usize> = FxHashMap::default();
    for group in groups {
        for card in group.cards() {
            let used = usage.entry(card.signature()).or_insert(0);
            *used += 1;
            if *used > counts.get(&card.signature()).copied().unwrap_or(0) {
                return false;
            }
        }
    }
    true
}

/// Largest subset of 3-card candidates that fits the hand; first found wins.
fn subset_search(candidates: &[Group], counts: &FxHashMap<Signature, usize>) -> Vec<usize> {
    let n = candidates.len();
    for size in (1..=n).rev() {
        for combo in Combinations::new(n, size) {
            let subset: Vec<&Group> = combo.iter().map(|&i| &candidates[i]).collect();
            if fits_hand(&subset, counts) {
                return combo.to_vec();
            }
        }
    }
    Vec::new()
}

/// Exact packing over faces, each face capped at its count in hand.
fn packing_search(candidates: &[Group], counts: &FxHashMap<Signature, usize>) -> Vec<usize> {
    let mut faces: Vec<Signature> = counts.keys().copied().collect();
    faces.sort_unstable();
    let slot: FxHashMap<Signature, usize> = faces.iter().enumerate().map(|(i, &f)| (f, i)).collect();

    let mut problem = SetPacking::new(faces.iter().map(|f| counts[f]).collect());
    for group in candidates {
        problem.add_item(group.cards().iter().map(|c| slot[&c.signature()]));
    }
    problem.solve().selected
}

/// Choose candidate indices for the best discard.
fn select(cards: &[Card], candidates: &[Group]) -> Vec<usize> {
    match candidates.len() {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }

    let counts = face_counts(cards);
    let all_minimal = candidates.iter().all(|g| g.len() == MIN_GROUP_SIZE);
    trace!(
        candidates = candidates.len(),
        path = if all_minimal { "subset" } else { "packing" },
        "selecting discard"
    );

    if all_minimal {
        subset_search(candidates, &counts)
    } else {
        packing_search(candidates, &counts)
    }
}

/// Turn selected face groups into groups of distinct physical cards.
fn materialize(cards: &[Card], candidates: &[Group], selected: &[usize]) -> DiscardPlan {
    let mut used = FxHashSet::default();
    let groups = selected
        .iter()
        .map(|&i| {
            let group = &candidates[i];
            let physical = group
                .cards()
                .iter()
                .filter_map(|wanted| {
                    let card = cards
                        .iter()
                        .find(|c| c.same_face(wanted) && !used.contains(&c.id))?;
                    used.insert(card.id);
                    Some(*card)
                })
                .collect();
            Group::new(group.kind(), physical)
        })
        .collect();
    DiscardPlan::new(groups)
}

/// Find the plan that discards the most cards.
///
/// Groups in the plan never share a physical card. An empty hand, or a hand
/// with no valid group, yields an empty plan.
///
/// ```
/// use rust_rummy::core::{Color, Hand};
/// use rust_rummy::discard::find_best_discard;
///
/// let hand = Hand::from_signatures(0, &[
///     (Color::Red, 1), (Color::Red, 2), (Color::Red, 3),
///     (Color::Blue, 5), (Color::Green, 5), (Color::Yellow, 5),
/// ]);
/// let plan = find_best_discard(hand.cards());
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.card_count(), 6);
/// ```
#[must_use]
pub fn find_best_discard(cards: &[Card]) -> DiscardPlan {
    let candidates = all_valid_groups(cards);
    let selected = select(cards, &candidates);
    materialize(cards, &candidates, &selected)
}

/// Number of cards the best plan discards, without building the plan.
#[must_use]
pub fn find_best_discard_count(cards: &[Card]) -> usize {
    let candidates = all_valid_groups(cards);
    select(cards, &candidates)
        .iter()
        .map(|&i| candidates[i].len())
        .sum()
}
