//! Module with the [`CharRange`] type: an immutable set of 16-bit code units.
//!
//! A `CharRange` is represented as a sorted list of toggle boundaries `b0 < b1 < …`: a code unit
//! `c` is a member of the set iff the number of boundaries `<= c` is odd. This lets any subset of
//! the 16-bit code-unit space be written as a disjoint ordered union of half-open ranges
//! `[b0,b1), [b2,b3), …`, with the last range implicitly open-ended (and the boundary list of odd
//! length) when `0xFFFF` is a member.

use crate::case_fold;
use crate::unicode_tables;

/// An immutable, sorted set of 16-bit code units.
///
/// Construct one with [`CharRange::single`], [`CharRange::range`], [`CharRange::any_of`] or
/// [`CharRange::category`], then combine sets with [`CharRange::union`], [`CharRange::intersect`],
/// [`CharRange::exclude`] or [`CharRange::complement`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CharRange {
    boundaries: Vec<u16>,
}

impl CharRange {
    /// The empty set.
    pub fn none() -> Self {
        CharRange {
            boundaries: Vec::new(),
        }
    }

    /// The set containing every 16-bit code unit.
    pub fn all() -> Self {
        CharRange {
            boundaries: vec![0],
        }
    }

    /// The set containing exactly `c`.
    pub fn single(c: u16) -> Self {
        Self::range(c, c)
    }

    /// The set containing every code unit in `[first, last]` inclusive.
    ///
    /// Returns [`CharRange::none`] if `first > last`.
    pub fn range(first: u16, last: u16) -> Self {
        if first > last {
            return Self::none();
        }
        let mut boundaries = vec![first];
        if last != u16::MAX {
            boundaries.push(last + 1);
        }
        CharRange { boundaries }
    }

    /// The set containing exactly the code units in `chars`.
    pub fn any_of(chars: impl IntoIterator<Item = u16>) -> Self {
        chars
            .into_iter()
            .map(Self::single)
            .fold(Self::none(), |acc, r| acc.union(&r))
    }

    /// The set containing every code unit except those in `chars`.
    pub fn not_any_of(chars: impl IntoIterator<Item = u16>) -> Self {
        Self::any_of(chars).complement()
    }

    /// A named Unicode category, as embedded static data (§3.1). Recognized names:
    /// `"L"`, `"Lu"`, `"Ll"`, `"Nd"`, `"P"`, `"S"`, `"Z"`, `"Identifier"`, `"IdentifierStart"`,
    /// `"IdentifierPart"`, `"Word"`, `"HorizontalWhitespace"`, `"VerticalWhitespace"`.
    ///
    /// Returns `None` for an unrecognized name.
    pub fn category(name: &str) -> Option<CharRange> {
        unicode_tables::category(name)
    }

    /// Builds a range directly from a boundary list. Used internally by the Unicode table
    /// builder; the caller must uphold strict monotonicity.
    pub(crate) fn from_boundaries(boundaries: Vec<u16>) -> Self {
        debug_assert!(boundaries.windows(2).all(|w| w[0] < w[1]));
        CharRange { boundaries }
    }

    /// The raw boundary list.
    pub(crate) fn boundaries(&self) -> &[u16] {
        &self.boundaries
    }

    /// True if `c` is a member of this set.
    pub fn contains(&self, c: u16) -> bool {
        contains(&self.boundaries, c)
    }

    /// True if this set contains no code units.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// The complement of this set: every code unit not in `self`.
    ///
    /// An O(n) rewrite: the set membership of every code unit flips, which is achieved by
    /// prepending a `0` boundary (if `self` doesn't already start at `0`) or stripping it (if it
    /// does).
    pub fn complement(&self) -> CharRange {
        let mut boundaries = self.boundaries.clone();
        if boundaries.first() == Some(&0) {
            boundaries.remove(0);
        } else {
            boundaries.insert(0, 0);
        }
        CharRange { boundaries }
    }

    /// The union of `self` and `other`.
    pub fn union(&self, other: &CharRange) -> CharRange {
        CharRange {
            boundaries: merge(&self.boundaries, &other.boundaries, |a, b| a || b),
        }
    }

    /// The intersection of `self` and `other`.
    pub fn intersect(&self, other: &CharRange) -> CharRange {
        CharRange {
            boundaries: merge(&self.boundaries, &other.boundaries, |a, b| a && b),
        }
    }

    /// The set difference `self \ other`.
    pub fn exclude(&self, other: &CharRange) -> CharRange {
        CharRange {
            boundaries: merge(&self.boundaries, &other.boundaries, |a, b| a && !b),
        }
    }

    /// Returns the disjoint, ascending, inclusive `(first, last)` ranges covered by this set.
    pub fn ranges(&self) -> Vec<(u16, u16)> {
        let mut out = Vec::with_capacity(self.boundaries.len() / 2 + 1);
        let mut iter = self.boundaries.iter();
        while let Some(&first) = iter.next() {
            let last = match iter.next() {
                Some(&b) => b - 1,
                None => u16::MAX,
            };
            out.push((first, last));
        }
        out
    }

    /// Rewrites this set to also contain the opposite-case companion of every code unit already
    /// in it (§3.2), using the embedded case-fold tables.
    pub fn expand_cases(&self) -> CharRange {
        case_fold::expand_cases(self)
    }
}

/// True if the number of `boundaries` not exceeding `c` is odd.
fn contains(boundaries: &[u16], c: u16) -> bool {
    boundaries.partition_point(|&b| b <= c) % 2 == 1
}

/// Sort-merges two boundary lists, emitting a boundary wherever `keep(in_a, in_b)` changes.
fn merge(a: &[u16], b: &[u16], keep: impl Fn(bool, bool) -> bool) -> Vec<u16> {
    let mut result = Vec::new();
    let mut ai = 0;
    let mut bi = 0;
    let mut in_a = false;
    let mut in_b = false;
    let mut current = keep(false, false);
    while ai < a.len() || bi < b.len() {
        let next = match (a.get(ai), b.get(bi)) {
            (Some(&x), Some(&y)) => x.min(y),
            (Some(&x), None) => x,
            (None, Some(&y)) => y,
            (None, None) => unreachable!(),
        };
        if ai < a.len() && a[ai] == next {
            in_a = !in_a;
            ai += 1;
        }
        if bi < b.len() && b[bi] == next {
            in_b = !in_b;
            bi += 1;
        }
        let new_state = keep(in_a, in_b);
        if new_state != current {
            result.push(next);
            current = new_state;
        }
    }
    result
}
