//! Ordered action-value tables.
//!
//! Models return one value per candidate action. Insertion order is kept
//! (draw 1, draw 2, draw 3, takes in seat order, pass) so that `best` breaks
//! ties the same way every time: the first maximum wins.

use serde::{Deserialize, Serialize};

use crate::core::Action;

/// Value per candidate action, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValues {
    entries: Vec<(Action, f64)>,
}

impl ActionValues {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of an action, replacing any previous value in place.
    pub fn insert(&mut self, action: Action, value: f64) {
        match self.entries.iter_mut().find(|(a, _)| *a == action) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((action, value)),
        }
    }

    /// Value of an action, if present.
    #[must_use]
    pub fn get(&self, action: &Action) -> Option<f64> {
        self.entries.iter().find(|(a, _)| a == action).map(|(_, v)| *v)
    }

    /// Remove an action, returning its value.
    pub fn remove(&mut self, action: &Action) -> Option<f64> {
        let pos = self.entries.iter().position(|(a, _)| a == action)?;
        Some(self.entries.remove(pos).1)
    }

    /// Keep only the actions matching the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(&Action) -> bool) {
        self.entries.retain(|(a, _)| keep(a));
    }

    /// Action with the highest value. Ties go to the earliest entry.
    #[must_use]
    pub fn best(&self) -> Option<(Action, f64)> {
        let mut best: Option<(Action, f64)> = None;
        for &(action, value) in &self.entries {
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((action, value)),
            }
        }
        best
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<(Action, f64)> for ActionValues {
    fn from_iter<I: IntoIterator<Item = (Action, f64)>>(iter: I) -> Self {
        let mut values = ActionValues::new();
        for (action, value) in iter {
            values.insert(action, value);
        }
        values
    }
}
