//! Embedded case-fold tables (§3.2).
//!
//! Two parallel sorted arrays give the single-code-unit case companion of a code unit; a second,
//! range-compressed table gives the same information as `(start, end, lowerDelta, upperDelta)`
//! quadruples, probed with an exponential-then-binary "finger" search the way a repeatedly
//! advancing scan over a sorted table would. Rust's standard library already carries the full
//! Unicode case-mapping data `char::to_uppercase`/`to_lowercase` draw on; the teacher crate has no
//! hand-rolled case-folding code of its own to generalize; this module builds its memoized tables
//! from stdlib's case iterators at first use rather than from `seshat-unicode`, which only exposes
//! boolean properties, not case mappings.

use std::sync::LazyLock;

/// A maximal run of code units sharing the same upper/lower delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CaseFoldRange {
    pub(crate) start: u16,
    pub(crate) end: u16,
    pub(crate) lower_delta: i32,
    pub(crate) upper_delta: i32,
}

fn simple_upper(c: char) -> Option<char> {
    let mut it = c.to_uppercase();
    let first = it.next()?;
    if it.next().is_some() {
        None
    } else {
        Some(first)
    }
}

fn simple_lower(c: char) -> Option<char> {
    let mut it = c.to_lowercase();
    let first = it.next()?;
    if it.next().is_some() {
        None
    } else {
        Some(first)
    }
}

fn deltas_for(cu: u16) -> (i32, i32) {
    if (0xD800..=0xDFFF).contains(&(cu as u32)) {
        return (0, 0);
    }
    let c = char::from_u32(cu as u32).unwrap();
    let lower_delta = simple_lower(c)
        .filter(|&lo| lo as u32 <= 0xFFFF)
        .map(|lo| lo as i32 - cu as i32)
        .unwrap_or(0);
    let upper_delta = simple_upper(c)
        .filter(|&up| up as u32 <= 0xFFFF)
        .map(|up| up as i32 - cu as i32)
        .unwrap_or(0);
    (lower_delta, upper_delta)
}

fn build_ranges() -> Vec<CaseFoldRange> {
    let mut ranges = Vec::new();
    let mut cu = 0u32;
    while cu <= 0xFFFF {
        let (lower_delta, upper_delta) = deltas_for(cu as u16);
        let start = cu;
        let mut end = cu;
        while end + 1 <= 0xFFFF && deltas_for((end + 1) as u16) == (lower_delta, upper_delta) {
            end += 1;
        }
        if lower_delta != 0 || upper_delta != 0 {
            ranges.push(CaseFoldRange {
                start: start as u16,
                end: end as u16,
                lower_delta,
                upper_delta,
            });
        }
        cu = end + 1;
    }
    ranges
}

fn build_companions(pick_delta: impl Fn(&CaseFoldRange) -> i32) -> (Vec<u16>, Vec<u16>) {
    let mut froms = Vec::new();
    let mut tos = Vec::new();
    for range in RANGES.iter() {
        let delta = pick_delta(range);
        if delta == 0 {
            continue;
        }
        for cu in range.start..=range.end {
            froms.push(cu);
            tos.push((cu as i32 + delta) as u16);
        }
    }
    (froms, tos)
}

static RANGES: LazyLock<Vec<CaseFoldRange>> = LazyLock::new(build_ranges);
/// Code units that have a lowercase companion, and that companion, both sorted by code unit.
static UPPERS: LazyLock<(Vec<u16>, Vec<u16>)> = LazyLock::new(|| build_companions(|r| r.lower_delta));
/// Code units that have an uppercase companion, and that companion, both sorted by code unit.
static LOWERS: LazyLock<(Vec<u16>, Vec<u16>)> = LazyLock::new(|| build_companions(|r| r.upper_delta));

/// A "finger" into the range table: repeated nearby lookups are cheaper than fresh binary
/// searches, since the search starts from the last found position and probes outward with
/// doubling strides before falling back to ordinary binary search.
#[derive(Debug, Default)]
pub(crate) struct Finger {
    pos: usize,
}

impl Finger {
    pub(crate) fn new() -> Self {
        Finger { pos: 0 }
    }

    /// Finds the range containing `c`, if any, and remembers its position for the next probe.
    pub(crate) fn locate(&mut self, c: u16) -> Option<CaseFoldRange> {
        let ranges = &*RANGES;
        if ranges.is_empty() {
            return None;
        }
        let mut lo = self.pos.min(ranges.len() - 1);
        let mut hi = lo;
        let mut stride = 1usize;
        if ranges[lo].end < c {
            while hi + 1 < ranges.len() && ranges[hi].end < c {
                lo = hi;
                hi = (hi + stride).min(ranges.len() - 1);
                stride *= 2;
            }
        } else {
            while lo > 0 && ranges[lo].start > c {
                hi = lo;
                lo = lo.saturating_sub(stride);
                stride *= 2;
            }
        }
        let slice = &ranges[lo..=hi.min(ranges.len() - 1)];
        let found = slice
            .binary_search_by(|r| {
                if c < r.start {
                    std::cmp::Ordering::Greater
                } else if c > r.end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()
            .map(|idx| slice[idx]);
        if let Some(range) = found {
            self.pos = ranges.iter().position(|r| *r == range).unwrap_or(self.pos);
        }
        found
    }
}

/// Returns `c`'s lowercase companion, if it has a single-code-unit one.
pub(crate) fn to_lower(c: u16) -> Option<u16> {
    lookup_companion(&UPPERS, c)
}

/// Returns `c`'s uppercase companion, if it has a single-code-unit one.
pub(crate) fn to_upper(c: u16) -> Option<u16> {
    lookup_companion(&LOWERS, c)
}

fn lookup_companion(table: &(Vec<u16>, Vec<u16>), c: u16) -> Option<u16> {
    let (froms, tos) = table;
    froms.binary_search(&c).ok().map(|idx| tos[idx])
}

/// Rewrites `range` to also contain the opposite-case companion of every code unit already in it,
/// using the range-delta table via a single forward-moving finger.
pub(crate) fn expand_cases(range: &crate::char_range::CharRange) -> crate::char_range::CharRange {
    let mut finger = Finger::new();
    let mut result = range.clone();
    for (first, last) in range.ranges() {
        let mut cu = first as u32;
        while cu <= last as u32 {
            if let Some(fold) = finger.locate(cu as u16) {
                let run_end = (last as u32).min(fold.end as u32);
                for c in cu as u16..=run_end as u16 {
                    if fold.lower_delta != 0 {
                        let companion = (c as i32 + fold.lower_delta) as u16;
                        result = result.union(&crate::char_range::CharRange::single(companion));
                    }
                    if fold.upper_delta != 0 {
                        let companion = (c as i32 + fold.upper_delta) as u16;
                        result = result.union(&crate::char_range::CharRange::single(companion));
                    }
                }
                cu = run_end as u32 + 1;
            } else {
                cu += 1;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_range::CharRange;

    #[test]
    fn ascii_upper_lower_companions() {
        assert_eq!(to_lower(b'A' as u16), Some(b'a' as u16));
        assert_eq!(to_upper(b'a' as u16), Some(b'A' as u16));
        assert_eq!(to_lower(b'1' as u16), None);
    }

    #[test]
    fn finger_locates_ascii_range() {
        let mut finger = Finger::new();
        let found = finger.locate(b'M' as u16).expect("A-Z should fold");
        assert!(found.start <= b'M' as u16 && b'M' as u16 <= found.end);
    }

    #[test]
    fn expand_cases_adds_both_companions() {
        let r = CharRange::single(b'a' as u16).expand_cases();
        assert!(r.contains(b'a' as u16));
        assert!(r.contains(b'A' as u16));
    }

    #[test]
    fn expand_cases_over_range() {
        let r = CharRange::range(b'a' as u16, b'c' as u16).expand_cases();
        for c in "abcABC".chars() {
            assert!(r.contains(c as u16), "missing {c}");
        }
        assert!(!r.contains(b'd' as u16));
    }
}
