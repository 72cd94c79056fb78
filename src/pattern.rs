//! The pattern combinator algebra (C2, §3.3): the public vocabulary for describing a regular
//! language over 16-bit code units, and its compilation into NFA fragments (§4.1).

use crate::char_range::CharRange;
use crate::internal::{Nfa, StateID};

/// A regular-language combinator over [`CharRange`]s.
///
/// Build one with the associated functions ([`Pattern::char`], [`Pattern::seq`], ...) or
/// [`Pattern::literal`], then hand it to [`crate::builder::DfaBuilder::add_pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches exactly one code unit in the given range.
    Char(CharRange),
    /// Matches each sub-pattern in order.
    Seq(Vec<Pattern>),
    /// Matches any one of the sub-patterns.
    Alt(Vec<Pattern>),
    /// Matches the sub-pattern zero or more times.
    Repeat(Box<Pattern>),
    /// Matches the sub-pattern one or more times.
    Repeat1(Box<Pattern>),
    /// Matches the sub-pattern zero or one times.
    Maybe(Box<Pattern>),
    /// Matches the sub-pattern zero or more times, built as `Maybe(Repeat1(p))` rather than as a
    /// primitive loop (see [`Pattern::add_to_nfa`] for why this means it never collapses the way
    /// [`Pattern::Repeat`] can).
    MaybeRepeat(Box<Pattern>),
    /// Matches the sub-pattern case-insensitively: every character class it contains is expanded,
    /// at construction time, to include the opposite-case companion of each of its code units.
    CaseI(Box<Pattern>),
    /// Matches only the empty string.
    Empty,
}

impl Pattern {
    /// Matches exactly one code unit in `range`.
    pub fn char(range: CharRange) -> Self {
        Pattern::Char(range)
    }

    /// Matches each of `patterns` in order.
    pub fn seq(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Seq(patterns.into_iter().collect())
    }

    /// Matches any one of `patterns`.
    pub fn alt(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Alt(patterns.into_iter().collect())
    }

    /// Matches `self` zero or more times.
    pub fn repeat(self) -> Self {
        Pattern::Repeat(Box::new(self))
    }

    /// Matches `self` one or more times.
    pub fn repeat1(self) -> Self {
        Pattern::Repeat1(Box::new(self))
    }

    /// Matches `self` zero or one times.
    pub fn maybe(self) -> Self {
        Pattern::Maybe(Box::new(self))
    }

    /// Matches `self` zero or more times, via `Maybe(Repeat1(self))`.
    pub fn maybe_repeat(self) -> Self {
        Pattern::MaybeRepeat(Box::new(self))
    }

    /// Matches `self` case-insensitively.
    pub fn case_insensitive(self) -> Self {
        Pattern::CaseI(Box::new(self))
    }

    /// Matches only the empty string.
    pub fn empty() -> Self {
        Pattern::Empty
    }

    /// Matches exactly the given literal string, one [`Pattern::Char`] per UTF-16 code unit.
    pub fn literal(s: &str) -> Self {
        Pattern::Seq(s.encode_utf16().map(|c| Pattern::Char(CharRange::single(c))).collect())
    }

    /// Rewrites every [`Pattern::Char`] reachable from `self` to also accept the opposite-case
    /// companion of each of its code units, and drops the [`Pattern::CaseI`] wrapper itself since
    /// its effect has now been folded into the character classes directly.
    fn expand_case_insensitive(&self) -> Pattern {
        match self {
            Pattern::Char(r) => Pattern::Char(r.expand_cases()),
            Pattern::Seq(ps) => Pattern::Seq(ps.iter().map(Pattern::expand_case_insensitive).collect()),
            Pattern::Alt(ps) => Pattern::Alt(ps.iter().map(Pattern::expand_case_insensitive).collect()),
            Pattern::Repeat(p) => Pattern::Repeat(Box::new(p.expand_case_insensitive())),
            Pattern::Repeat1(p) => Pattern::Repeat1(Box::new(p.expand_case_insensitive())),
            Pattern::Maybe(p) => Pattern::Maybe(Box::new(p.expand_case_insensitive())),
            Pattern::MaybeRepeat(p) => Pattern::MaybeRepeat(Box::new(p.expand_case_insensitive())),
            Pattern::CaseI(p) => p.expand_case_insensitive(),
            Pattern::Empty => Pattern::Empty,
        }
    }

    /// Builds the NFA fragment for this pattern: allocates whatever states it needs and wires
    /// them so that a successful match ends up at `target`, returning the fragment's entry state
    /// (§4.1).
    pub(crate) fn add_to_nfa<Tag>(&self, nfa: &mut Nfa<Tag>, target: StateID) -> StateID {
        match self {
            Pattern::Char(range) => {
                let start = nfa.new_state();
                for (first, last) in range.ranges() {
                    nfa.add_transition(start, first, last, target);
                }
                start
            }
            Pattern::Empty => {
                let start = nfa.new_state();
                nfa.add_epsilon(start, target);
                start
            }
            Pattern::Seq(patterns) => {
                // Wire right-to-left: the entry of pattern[i+1] becomes the target of pattern[i].
                let mut next = target;
                for p in patterns.iter().rev() {
                    next = p.add_to_nfa(nfa, next);
                }
                next
            }
            Pattern::Alt(patterns) => {
                let start = nfa.new_state();
                for p in patterns {
                    let branch = p.add_to_nfa(nfa, target);
                    nfa.add_epsilon(start, branch);
                }
                start
            }
            Pattern::Repeat(p) => {
                if matches!(p.as_ref(), Pattern::Empty) {
                    return target;
                }
                let loop_back = nfa.new_state();
                let body_start = p.add_to_nfa(nfa, loop_back);
                nfa.add_epsilon(loop_back, body_start);
                nfa.add_epsilon(loop_back, target);
                loop_back
            }
            Pattern::Repeat1(p) => {
                let loop_back = nfa.new_state();
                nfa.add_epsilon(loop_back, target);
                let body_start = p.add_to_nfa(nfa, loop_back);
                nfa.add_epsilon(loop_back, body_start);
                body_start
            }
            Pattern::Maybe(p) => {
                let start = nfa.new_state();
                let body_start = p.add_to_nfa(nfa, target);
                nfa.add_epsilon(start, body_start);
                nfa.add_epsilon(start, target);
                start
            }
            Pattern::MaybeRepeat(p) => {
                let start = nfa.new_state();
                let repeat1 = Pattern::Repeat1(p.clone());
                let repeat1_start = repeat1.add_to_nfa(nfa, target);
                nfa.add_epsilon(start, repeat1_start);
                nfa.add_epsilon(start, target);
                start
            }
            Pattern::CaseI(p) => {
                let expanded = p.expand_case_insensitive();
                expanded.add_to_nfa(nfa, target)
            }
        }
    }

    /// Returns the pattern that matches exactly the reverses of the strings `self` matches
    /// (§4.1), used to build reverse finders.
    pub(crate) fn reversed(&self) -> Pattern {
        match self {
            Pattern::Char(r) => Pattern::Char(r.clone()),
            Pattern::Empty => Pattern::Empty,
            Pattern::Seq(ps) => Pattern::Seq(ps.iter().rev().map(Pattern::reversed).collect()),
            Pattern::Alt(ps) => Pattern::Alt(ps.iter().map(Pattern::reversed).collect()),
            Pattern::Repeat(p) => Pattern::Repeat(Box::new(p.reversed())),
            Pattern::Repeat1(p) => Pattern::Repeat1(Box::new(p.reversed())),
            Pattern::Maybe(p) => Pattern::Maybe(Box::new(p.reversed())),
            Pattern::MaybeRepeat(p) => Pattern::MaybeRepeat(Box::new(p.reversed())),
            Pattern::CaseI(p) => Pattern::CaseI(Box::new(p.reversed())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn accepts(pattern: &Pattern, input: &str) -> bool {
        let mut nfa: Nfa<&'static str> = Nfa::new();
        let accept = nfa.new_state();
        nfa.set_accept(accept, "OK");
        let start = pattern.add_to_nfa(&mut nfa, accept);

        let mut current: HashSet<StateID> = nfa.epsilon_closure([start]).into_iter().collect();
        for c in input.encode_utf16() {
            let mut next = HashSet::new();
            for &s in &current {
                for t in nfa.transitions(s) {
                    if t.first_char <= c && c <= t.last_char {
                        next.insert(t.target);
                    }
                }
            }
            current = nfa.epsilon_closure(next).into_iter().collect();
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|&s| nfa.accept(s).is_some())
    }

    #[test]
    fn literal_matches_exactly_itself() {
        let p = Pattern::literal("if");
        assert!(accepts(&p, "if"));
        assert!(!accepts(&p, "iff"));
        assert!(!accepts(&p, "i"));
    }

    #[test]
    fn alt_matches_either_branch() {
        let p = Pattern::alt([Pattern::literal("if"), Pattern::literal("else")]);
        assert!(accepts(&p, "if"));
        assert!(accepts(&p, "else"));
        assert!(!accepts(&p, "elif"));
    }

    #[test]
    fn repeat_matches_zero_or_more() {
        let p = Pattern::char(CharRange::single(b'a' as u16)).repeat();
        assert!(accepts(&p, ""));
        assert!(accepts(&p, "a"));
        assert!(accepts(&p, "aaaa"));
        assert!(!accepts(&p, "aab"));
    }

    #[test]
    fn repeat1_requires_at_least_one() {
        let p = Pattern::char(CharRange::single(b'a' as u16)).repeat1();
        assert!(!accepts(&p, ""));
        assert!(accepts(&p, "a"));
        assert!(accepts(&p, "aaa"));
    }

    #[test]
    fn maybe_matches_zero_or_one() {
        let p = Pattern::literal("s").maybe();
        assert!(accepts(&p, ""));
        assert!(accepts(&p, "s"));
        assert!(!accepts(&p, "ss"));
    }

    #[test]
    fn maybe_repeat_matches_zero_or_more() {
        let p = Pattern::literal("ab").maybe_repeat();
        assert!(accepts(&p, ""));
        assert!(accepts(&p, "ab"));
        assert!(accepts(&p, "abab"));
        assert!(!accepts(&p, "aba"));
    }

    #[test]
    fn case_insensitive_matches_either_case() {
        let p = Pattern::literal("if").case_insensitive();
        assert!(accepts(&p, "if"));
        assert!(accepts(&p, "IF"));
        assert!(accepts(&p, "If"));
        assert!(!accepts(&p, "of"));
    }

    #[test]
    fn identifier_pattern_matches_typical_identifiers() {
        let start = CharRange::category("L").unwrap().union(&CharRange::single(b'_' as u16));
        let cont = start.union(&CharRange::category("Nd").unwrap());
        let p = Pattern::seq([Pattern::char(start), Pattern::char(cont).repeat()]);
        assert!(accepts(&p, "x"));
        assert!(accepts(&p, "_foo_1"));
        assert!(!accepts(&p, "1foo"));
    }

    #[test]
    fn reversed_literal_matches_reverse_string() {
        let p = Pattern::literal("abc").reversed();
        assert!(accepts(&p, "cba"));
        assert!(!accepts(&p, "abc"));
    }

    #[test]
    fn empty_matches_only_empty_string() {
        let p = Pattern::empty();
        assert!(accepts(&p, ""));
        assert!(!accepts(&p, "a"));
    }
}
