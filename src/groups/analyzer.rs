//! Group analysis: validity, existence, largest group, enumeration.
//!
//! ## Face Index
//!
//! All hand-level queries work on a compact index of the hand's faces:
//! - per color, a bitmask of the numbers present (bit `n` = number `n`)
//! - per number, a bitmask of the colors present (bit `c` = color index)
//!
//! A run of length 3 exists in a color iff its mask has three consecutive
//! bits; a set exists for a number iff its color mask has at least 3 bits.
//!
//! ## Resolving Faces to Cards
//!
//! Groups are found on faces and then resolved back to physical cards by
//! taking the first card in hand order with each face. With duplicate faces
//! in hand the pairing is stable but arbitrary.

use smallvec::SmallVec;

use crate::core::combinatorics::Combinations;
use crate::core::{Card, Color, Signature};

use super::group::{Group, GroupKind};

/// Numbers are stored as bit positions in a `u32`.
const NUMBER_SLOTS: usize = 32;

/// Minimum cards in a valid group.
pub const MIN_GROUP_SIZE: usize = 3;

/// Highest card number the face index can hold.
pub const MAX_CARD_NUMBER: u8 = (NUMBER_SLOTS - 1) as u8;

/// Bitmask index of the faces present in a collection of cards.
struct FaceIndex {
    numbers_by_color: [u32; Color::COUNT],
    colors_by_number: [u8; NUMBER_SLOTS],
}

impl FaceIndex {
    fn build(cards: &[Card]) -> Self {
        let mut index = Self {
            numbers_by_color: [0; Color::COUNT],
            colors_by_number: [0; NUMBER_SLOTS],
        };
        for card in cards {
            index.insert(card);
        }
        index
    }

    fn insert(&mut self, card: &Card) {
        debug_assert!((card.number as usize) < NUMBER_SLOTS, "card number out of range");
        self.numbers_by_color[card.color.index()] |= 1u32 << card.number;
        self.colors_by_number[card.number as usize] |= 1u8 << card.color.index();
    }

    /// Colors present for a number, in canonical color order.
    fn colors_for(&self, number: u8) -> SmallVec<[Color; Color::COUNT]> {
        let mask = self.colors_by_number[number as usize];
        Color::ALL
            .into_iter()
            .filter(|c| mask & (1u8 << c.index()) != 0)
            .collect()
    }
}

/// True if the mask contains three consecutive set bits.
#[inline]
fn has_three_consecutive(mask: u32) -> bool {
    mask & (mask >> 1) & (mask >> 2) != 0
}

/// Maximal stretches of consecutive numbers in a mask, as `(start, len)`,
/// in ascending order.
fn stretches(mask: u32) -> SmallVec<[(u8, u8); 8]> {
    let mut out = SmallVec::new();
    let mut n = 0u8;
    while (n as usize) < NUMBER_SLOTS {
        if mask & (1u32 << n) == 0 {
            n += 1;
            continue;
        }
        let start = n;
        while (n as usize) < NUMBER_SLOTS && mask & (1u32 << n) != 0 {
            n += 1;
        }
        out.push((start, n - start));
    }
    out
}

/// First card in hand order with the given face.
fn first_with_face(cards: &[Card], face: Signature) -> Option<Card> {
    cards.iter().copied().find(|c| c.signature() == face)
}

/// Resolve a list of distinct faces into a group of physical cards.
fn resolve(cards: &[Card], kind: GroupKind, faces: &[Signature]) -> Group {
    let resolved = faces
        .iter()
        .filter_map(|&face| first_with_face(cards, face))
        .collect();
    Group::new(kind, resolved)
}

/// Classify a candidate group.
///
/// Returns `Some(kind)` if the cards form a valid run or set, `None`
/// otherwise. Input order does not matter.
#[must_use]
pub fn classify_group(cards: &[Card]) -> Option<GroupKind> {
    if cards.len() < MIN_GROUP_SIZE {
        return None;
    }
    let first = cards[0];

    if cards.iter().all(|c| c.color == first.color) {
        let mut numbers: SmallVec<[u8; 16]> = cards.iter().map(|c| c.number).collect();
        numbers.sort_unstable();
        if numbers.windows(2).all(|w| w[1] == w[0] + 1) {
            return Some(GroupKind::Run);
        }
    }

    if cards.iter().all(|c| c.number == first.number) {
        let mut colors = 0u8;
        for card in cards {
            let bit = 1u8 << card.color.index();
            if colors & bit != 0 {
                return None;
            }
            colors |= bit;
        }
        return Some(GroupKind::Set);
    }

    None
}

/// Check whether the cards form a valid group. Order-independent.
///
/// ```
/// use rust_rummy::core::{Color, Hand};
/// use rust_rummy::groups::is_valid_group;
///
/// let run = Hand::from_signatures(0, &[(Color::Red, 3), (Color::Red, 1), (Color::Red, 2)]);
/// assert!(is_valid_group(run.cards()));
///
/// let gap = Hand::from_signatures(0, &[(Color::Red, 1), (Color::Red, 2), (Color::Red, 4)]);
/// assert!(!is_valid_group(gap.cards()));
/// ```
#[must_use]
pub fn is_valid_group(cards: &[Card]) -> bool {
    classify_group(cards).is_some()
}

/// Check whether any valid group can be formed from the cards.
///
/// Runs in a single pass and returns as soon as a witness appears.
#[must_use]
pub fn exists_valid_group(cards: &[Card]) -> bool {
    let mut numbers_by_color = [0u32; Color::COUNT];
    let mut colors_by_number = [0u8; NUMBER_SLOTS];

    for card in cards {
        let numbers = &mut numbers_by_color[card.color.index()];
        *numbers |= 1u32 << card.number;
        if has_three_consecutive(*numbers) {
            return true;
        }

        let colors = &mut colors_by_number[card.number as usize];
        *colors |= 1u8 << card.color.index();
        if colors.count_ones() as usize >= MIN_GROUP_SIZE {
            return true;
        }
    }

    false
}

/// Find the largest valid group.
///
/// The longest maximal run across all colors is found first; a set replaces
/// it only if it is strictly larger, so equal sizes favor the run. Among
/// equally long runs (or sets) the first found wins. The result is sorted by
/// (number, color).
#[must_use]
pub fn largest_valid_group(cards: &[Card]) -> Option<Group> {
    let index = FaceIndex::build(cards);

    let mut best_len = 0usize;
    let mut best: Option<(GroupKind, SmallVec<[Signature; 10]>)> = None;

    for color in Color::ALL {
        for (start, len) in stretches(index.numbers_by_color[color.index()]) {
            let len = len as usize;
            if len >= MIN_GROUP_SIZE && len > best_len {
                best_len = len;
                let faces = (start..start + len as u8).map(|n| (color, n)).collect();
                best = Some((GroupKind::Run, faces));
            }
        }
    }

    for number in 0..NUMBER_SLOTS as u8 {
        let colors = index.colors_for(number);
        if colors.len() >= MIN_GROUP_SIZE && colors.len() > best_len {
            best_len = colors.len();
            let faces = colors.into_iter().map(|c| (c, number)).collect();
            best = Some((GroupKind::Set, faces));
        }
    }

    best.map(|(kind, faces)| {
        let mut group = resolve(cards, kind, &faces);
        group.cards_mut().sort_by_key(|c| (c.number, c.color));
        group
    })
}

/// Enumerate every valid group, sorted by size descending.
///
/// - Runs: every window of length >= 3 inside each color's consecutive
///   stretch, including the maximal one (1-2-3-4 yields 1-2-3, 1-2-3-4, 2-3-4).
/// - Sets: every combination of 3 or more of the colors present for a number.
///
/// The sort is stable, so equal-sized groups keep discovery order: runs by
/// color then start number, then sets by number.
#[must_use]
pub fn all_valid_groups(cards: &[Card]) -> Vec<Group> {
    let index = FaceIndex::build(cards);
    let mut faces_list: Vec<(GroupKind, SmallVec<[Signature; 10]>)> = Vec::new();

    for color in Color::ALL {
        for (start, len) in stretches(index.numbers_by_color[color.index()]) {
            if (len as usize) < MIN_GROUP_SIZE {
                continue;
            }
            let end = start + len;
            for from in start..end {
                for to in from + MIN_GROUP_SIZE as u8..=end {
                    let faces = (from..to).map(|n| (color, n)).collect();
                    faces_list.push((GroupKind::Run, faces));
                }
            }
        }
    }

    for number in 0..NUMBER_SLOTS as u8 {
        let colors = index.colors_for(number);
        if colors.len() < MIN_GROUP_SIZE {
            continue;
        }
        for size in MIN_GROUP_SIZE..=colors.len() {
            for combo in Combinations::new(colors.len(), size) {
                let faces = combo.iter().map(|&i| (colors[i], number)).collect();
                faces_list.push((GroupKind::Set, faces));
            }
        }
    }

    let mut groups: Vec<Group> = faces_list
        .iter()
        .map(|(kind, faces)| resolve(cards, *kind, faces))
        .collect();
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}
