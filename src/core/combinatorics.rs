//! Combination enumeration, counting, and unranking.
//!
//! - `Combinations`: lexicographic k-subsets of `0..n` as index lists
//! - `binomial`: exact `n choose k`
//! - `unrank`: map a rank in `0..binomial(n, k)` to a k-subset, used to draw
//!   uniform samples of combinations without materializing all of them

use smallvec::SmallVec;

/// Index list for one combination. Inline for the common small cases.
pub type ComboIndices = SmallVec<[usize; 8]>;

/// Exact binomial coefficient `n choose k`. Zero when `k > n`.
///
/// ```
/// use rust_rummy::core::combinatorics::binomial;
///
/// assert_eq!(binomial(80, 3), 82_160);
/// assert_eq!(binomial(2, 3), 0);
/// ```
#[must_use]
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    u64::try_from(result).unwrap_or(u64::MAX)
}

/// Lexicographic iterator over k-subsets of `0..n`.
///
/// Yields nothing when `k > n`; yields one empty subset when `k == 0`.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: ComboIndices,
    first: bool,
    done: bool,
}

impl Combinations {
    /// Create the iterator.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            first: true,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = ComboIndices;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost position that can still advance.
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Map `rank` (in `0..binomial(n, k)`) to a distinct k-subset of `0..n`.
///
/// Uses the combinatorial number system; the mapping is a bijection, so
/// uniform ranks give uniform combinations. Indices are returned ascending.
#[must_use]
pub fn unrank(mut rank: u64, n: usize, k: usize) -> ComboIndices {
    let mut out = ComboIndices::with_capacity(k);
    let mut upper = n;

    for slot in (1..=k).rev() {
        // Largest c < upper with binomial(c, slot) <= rank.
        let mut c = upper;
        loop {
            c -= 1;
            if binomial(c, slot) <= rank {
                break;
            }
        }
        rank -= binomial(c, slot);
        out.push(c);
        upper = c;
    }

    out.reverse();
    out
}
