//! Groups and discard plans.
//!
//! A `Group` is a view over cards still owned by a hand; it does not move
//! them. A `DiscardPlan` is an ordered list of groups that share no physical
//! card.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardId, Signature};

/// Shape of a valid group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Same color, consecutive distinct numbers.
    Run,
    /// Same number, distinct colors.
    Set,
}

/// A valid group of cards from one hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    kind: GroupKind,
    cards: Vec<Card>,
}

impl Group {
    pub(crate) fn new(kind: GroupKind, cards: Vec<Card>) -> Self {
        Self { kind, cards }
    }

    pub(crate) fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    /// Run or set.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The cards in the group.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for groups produced by the analyzer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether a physical card is part of the group.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Faces of the group's cards.
    #[must_use]
    pub fn signatures(&self) -> SmallVec<[Signature; 10]> {
        self.cards.iter().map(Card::signature).collect()
    }

    /// Consume the group, returning its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            GroupKind::Run => "run",
            GroupKind::Set => "set",
        };
        write!(f, "{} [", kind)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", card)?;
        }
        f.write_str("]")
    }
}

/// Ordered list of pairwise physically-disjoint groups to discard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPlan {
    groups: Vec<Group>,
}

impl DiscardPlan {
    pub(crate) fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// A plan that discards nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups in discard order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the plan discards nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total cards discarded by the plan.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Every card in the plan, group by group.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.groups.iter().flat_map(|g| g.cards().iter())
    }

    /// True if no physical card appears twice.
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.cards().all(|c| seen.insert(c.id))
    }

    /// Consume the plan, returning its groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }
}
