//! Exact maximum set packing with per-resource capacities.
//!
//! ## Problem
//!
//! Each item consumes a list of resources (for discards: card faces) and is
//! worth one point per resource it consumes. Resource `r` may be consumed at
//! most `capacity[r]` times across the selected items. Find a selection of
//! maximum total worth.
//!
//! ## Search
//!
//! Depth-first branch and bound:
//! - items are visited in descending weight order, trying *include* before
//!   *exclude*
//! - a branch is cut when `current + min(remaining item weight, free
//!   capacity)` cannot beat the incumbent
//! - only a strictly better selection replaces the incumbent, so among equal
//!   optima the one reached first wins
//!
//! The empty selection is always feasible, so solving never fails.

use smallvec::SmallVec;
use tracing::trace;

/// One packable item: the resources it consumes.
#[derive(Clone, Debug)]
struct PackingItem {
    resources: SmallVec<[usize; 10]>,
}

impl PackingItem {
    fn weight(&self) -> usize {
        self.resources.len()
    }
}

/// Result of a packing search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackingSolution {
    /// Selected item indices, ascending.
    pub selected: Vec<usize>,
    /// Total weight of the selection.
    pub weight: usize,
}

/// A set-packing instance.
#[derive(Clone, Debug)]
pub struct SetPacking {
    capacities: Vec<usize>,
    items: Vec<PackingItem>,
}

impl SetPacking {
    /// Create an instance with the given resource capacities.
    #[must_use]
    pub fn new(capacities: Vec<usize>) -> Self {
        Self {
            capacities,
            items: Vec::new(),
        }
    }

    /// Add an item and return its index.
    ///
    /// Resource indices must be below `capacities.len()`.
    pub fn add_item(&mut self, resources: impl IntoIterator<Item = usize>) -> usize {
        let resources: SmallVec<[usize; 10]> = resources.into_iter().collect();
        debug_assert!(resources.iter().all(|&r| r < self.capacities.len()));
        self.items.push(PackingItem { resources });
        self.items.len() - 1
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the instance has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a maximum-weight feasible selection.
    #[must_use]
    pub fn solve(&self) -> PackingSolution {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        // Stable: equal weights keep insertion order.
        order.sort_by(|&a, &b| self.items[b].weight().cmp(&self.items[a].weight()));

        // suffix[i] = total weight of order[i..]
        let mut suffix = vec![0usize; order.len() + 1];
        for i in (0..order.len()).rev() {
            suffix[i] = suffix[i + 1] + self.items[order[i]].weight();
        }

        let mut search = Search {
            problem: self,
            order: &order,
            suffix: &suffix,
            used: vec![0; self.capacities.len()],
            free: self.capacities.iter().sum(),
            chosen: Vec::new(),
            current: 0,
            best: PackingSolution::default(),
            nodes: 0,
        };
        search.visit(0);

        let mut best = search.best;
        best.selected.sort_unstable();
        trace!(
            items = self.items.len(),
            nodes = search.nodes,
            weight = best.weight,
            "set packing solved"
        );
        best
    }
}

struct Search<'a> {
    problem: &'a SetPacking,
    order: &'a [usize],
    suffix: &'a [usize],
    used: Vec<usize>,
    free: usize,
    chosen: Vec<usize>,
    current: usize,
    best: PackingSolution,
    nodes: u64,
}

impl Search<'_> {
    fn visit(&mut self, depth: usize) {
        self.nodes += 1;

        if self.current > self.best.weight {
            self.best = PackingSolution {
                selected: self.chosen.clone(),
                weight: self.current,
            };
        }

        if depth == self.order.len() {
            return;
        }
        let bound = self.current + self.suffix[depth].min(self.free);
        if bound <= self.best.weight {
            return;
        }

        let problem = self.problem;
        let index = self.order[depth];
        let item = &problem.items[index];

        if self.fits(item) {
            for &r in &item.resources {
                self.used[r] += 1;
            }
            self.free -= item.weight();
            self.current += item.weight();
            self.chosen.push(index);

            self.visit(depth + 1);

            self.chosen.pop();
            self.current -= item.weight();
            self.free += item.weight();
            for &r in &item.resources {
                self.used[r] -= 1;
            }
        }

        self.visit(depth + 1);
    }

    fn fits(&self, item: &PackingItem) -> bool {
        let mut extra: SmallVec<[(usize, usize); 10]> = SmallVec::new();
        for &r in &item.resources {
            match extra.iter_mut().find(|(res, _)| *res == r) {
                Some((_, n)) => *n += 1,
                None => extra.push((r, 1)),
            }
        }
        extra
            .iter()
            .all(|&(r, n)| self.used[r] + n <= self.problem.capacities[r])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_instance() {
        let problem = SetPacking::new(vec![1, 1]);
        let solution = problem.solve();
        assert!(solution.selected.is_empty());
        assert_eq!(solution.weight, 0);
    }

    #[test]
    fn test_prefers_larger_item_over_overlapping_smaller() {
        // Resources 0..4, one copy each: {0,1,2,3} beats {0,1,2} + nothing.
        let mut problem = SetPacking::new(vec![1; 4]);
        problem.add_item([0, 1, 2, 3]);
        problem.add_item([0, 1, 2]);
        problem.add_item([1, 2, 3]);

        let solution = problem.solve();
        assert_eq!(solution.selected, vec![0]);
        assert_eq!(solution.weight, 4);
    }

    #[test]
    fn test_two_small_beat_one_large() {
        // {0,1,2,3} overlaps both 3-sets; the two disjoint 3-sets are worth 6.
        let mut problem = SetPacking::new(vec![1; 6]);
        problem.add_item([0, 1, 2, 3]);
        problem.add_item([0, 1, 4]);
        problem.add_item([2, 3, 5]);

        let solution = problem.solve();
        assert_eq!(solution.selected, vec![1, 2]);
        assert_eq!(solution.weight, 6);
    }

    #[test]
    fn test_capacity_allows_reuse() {
        // Two copies of every resource: the same item can be packed twice.
        let mut problem = SetPacking::new(vec![2; 3]);
        problem.add_item([0, 1, 2]);
        problem.add_item([0, 1, 2]);

        let solution = problem.solve();
        assert_eq!(solution.selected, vec![0, 1]);
        assert_eq!(solution.weight, 6);
    }

    #[test]
    fn test_first_optimum_wins_on_ties() {
        let mut problem = SetPacking::new(vec![1; 4]);
        problem.add_item([0, 1, 2]);
        problem.add_item([1, 2, 3]);

        assert_eq!(problem.solve().selected, vec![0]);
    }

    #[test]
    fn test_brute_force_agreement() {
        // Overlapping windows over 8 resources, mixed capacities.
        let capacities = vec![1, 2, 1, 1, 2, 1, 1, 1];
        let mut problem = SetPacking::new(capacities.clone());
        let mut items: Vec<Vec<usize>> = Vec::new();
        for start in 0..6 {
            for len in 3..=(8 - start).min(5) {
                let item: Vec<usize> = (start..start + len).collect();
                problem.add_item(item.iter().copied());
                items.push(item);
            }
        }

        let mut best = 0;
        for mask in 0u32..(1 << items.len()) {
            let mut used = vec![0; capacities.len()];
            let mut weight = 0;
            for (i, item) in items.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    for &r in item {
                        used[r] += 1;
                    }
                    weight += item.len();
                }
            }
            if used.iter().zip(&capacities).all(|(u, c)| u <= c) {
                best = best.max(weight);
            }
        }

        assert_eq!(problem.solve().weight, best);
    }
}
