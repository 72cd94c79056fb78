//! The string searcher (C8b, §4.6): finds matches anywhere in the input, not just at a position the
//! caller already knows to try.
//!
//! Two DFAs drive this in two passes: an unanchored "scan anywhere" DFA (built with a `.*` self
//! loop ahead of every pattern, see [`crate::builder::DfaBuilder::build_string_searcher`]) finds
//! where the next match *ends*; a reverse finder, run backward from that end, recovers where it
//! *started* and which tag it carries. A position is recognized as "back at the scan start" when
//! its current state equals the scan DFA's own start state, which is exactly the point at which no
//! pattern match is in progress.

use crate::matcher::Match;
use crate::packed_dfa::PackedDfa;
use crate::span::Span;

/// An unanchored, iterator-driven search over `input` for matches of any pattern in one language.
pub struct StringSearcher<'d, 'i, Tag> {
    scan_dfa: &'d PackedDfa<Tag>,
    reverse_dfa: &'d PackedDfa<Tag>,
    language: usize,
    input: &'i [u16],
    pos: usize,
}

impl<'d, 'i, Tag> StringSearcher<'d, 'i, Tag> {
    /// Builds a searcher over `input`, using the `language`-th start state of both `scan_dfa` and
    /// `reverse_dfa` (the pair returned by
    /// [`crate::builder::DfaBuilder::build_string_searcher`]).
    pub fn new(scan_dfa: &'d PackedDfa<Tag>, reverse_dfa: &'d PackedDfa<Tag>, language: usize, input: &'i [u16]) -> Self {
        StringSearcher {
            scan_dfa,
            reverse_dfa,
            language,
            input,
            pos: 0,
        }
    }

    /// Scans forward from `self.pos`, returning the end position of the next match (the
    /// furthest-reached position before the automaton returns to its own start state with nothing
    /// pending, or the last position where it was ever in an accepting state before the input
    /// ran out).
    fn next_end(&self) -> Option<usize> {
        let scan_start = self.scan_dfa.start(self.language);
        let mut state = scan_start;
        let mut last_accept: Option<usize> = None;
        let mut i = self.pos;
        while i < self.input.len() {
            state = self.scan_dfa.next_state(state, self.input[i]);
            i += 1;
            if self.scan_dfa.accept(state).is_some() {
                last_accept = Some(i);
            }
            if state == scan_start && last_accept.is_some() {
                return last_accept;
            }
        }
        last_accept
    }

    /// Runs the reverse finder backward from `end`, returning the longest `(start, tag)` such
    /// that `input[start..end]` is a match. The reverse finder is built to never accept the empty
    /// string, so `start < end` always holds when this returns `Some`.
    fn find_start(&self, end: usize) -> Option<(usize, Tag)>
    where
        Tag: Clone,
    {
        let mut state = self.reverse_dfa.start(self.language);
        let mut best: Option<(usize, Tag)> = None;
        let mut i = end;
        while i > 0 {
            i -= 1;
            state = self.reverse_dfa.next_state(state, self.input[i]);
            if state == PackedDfa::<Tag>::DEAD {
                break;
            }
            if let Some(tag) = self.reverse_dfa.accept(state) {
                best = Some((i, tag.clone()));
            }
        }
        best
    }
}

impl<'d, 'i, Tag> Iterator for StringSearcher<'d, 'i, Tag>
where
    Tag: Clone,
{
    type Item = Match<Tag>;

    fn next(&mut self) -> Option<Match<Tag>> {
        while self.pos <= self.input.len() {
            let end = self.next_end()?;
            if let Some((start, tag)) = self.find_start(end) {
                self.pos = end;
                return Some(Match {
                    span: Span::from(start..end),
                    tag,
                });
            }
            // The scan DFA found an end but the reverse finder disagreed (only possible if the
            // two were built from different pattern sets); skip past it to make progress.
            self.pos = end;
        }
        None
    }
}
