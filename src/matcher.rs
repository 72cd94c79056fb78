//! The string matcher (C8a, §4.6): longest match starting at a caller-given position.

use crate::packed_dfa::PackedDfa;
use crate::span::Span;

/// One match: the span of code units it covers and the tag of the pattern that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<Tag> {
    /// The matched span, in code-unit offsets into the input that was searched.
    pub span: Span,
    /// The tag of the pattern that matched.
    pub tag: Tag,
}

/// Drives a [`PackedDfa`] anchored at a caller-chosen position, reporting the longest match (§4.6:
/// "longest match wins"; among equal-length matches, the tag recorded by ambiguity resolution at
/// build time is used).
///
/// Unlike [`crate::searcher::StringSearcher`], this never searches for where a match might start;
/// it only asks "does (and how far does) a match starting exactly here go".
pub struct StringMatcher<'d, Tag> {
    dfa: &'d PackedDfa<Tag>,
    language: usize,
}

impl<'d, Tag> StringMatcher<'d, Tag> {
    /// Builds a matcher over `dfa`, restricted to the `language`-th start state (i.e. the
    /// `language`-th entry of the `languages` slice passed to
    /// [`crate::builder::DfaBuilder::build`]).
    pub fn new(dfa: &'d PackedDfa<Tag>, language: usize) -> Self {
        StringMatcher { dfa, language }
    }

    /// Finds the longest match starting exactly at `pos` in `input`, if any.
    pub fn find_at(&self, input: &[u16], pos: usize) -> Option<Match<Tag>>
    where
        Tag: Clone,
    {
        let mut state = self.dfa.start(self.language);
        let mut best: Option<(usize, Tag)> = self
            .dfa
            .accept(state)
            .map(|tag| (pos, tag.clone()));
        let mut i = pos;
        while i < input.len() {
            let next = self.dfa.next_state(state, input[i]);
            if next == PackedDfa::<Tag>::DEAD {
                break;
            }
            state = next;
            i += 1;
            if let Some(tag) = self.dfa.accept(state) {
                best = Some((i, tag.clone()));
            }
        }
        best.map(|(end, tag)| Match {
            span: Span::from(pos..end),
            tag,
        })
    }
}
