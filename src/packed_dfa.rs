//! The packed DFA (C6, §3.6): a flat, serializable encoding of a minimized automaton, laid out for
//! O(log k) binary-search transition lookup on the matching hot path.
//!
//! Grounded in the flattening technique of a compile-time DFA encoder that turns a per-state
//! `BTreeMap`-shaped transition table into parallel `state_ranges`/`transitions` arrays indexed by
//! state: `ranges[state]` gives the half-open slice of `transitions` that belongs to `state`, each
//! entry a `(firstChar, lastChar, target)` triple sorted by `firstChar` so the lookup can binary
//! search. `u32::MAX` stands in for "no transition" (a dead target) rather than an `Option`, to
//! keep the array a flat `u32` lane with no per-element tag.

use crate::internal::RawDfa as InternalRawDfa;

const DEAD: u32 = u32::MAX;

/// One entry of the flattened transition table: `[first_char, last_char]` on some state leads to
/// `target`, or to nothing if `target == PackedDfa::DEAD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedTransition {
    first_char: u16,
    last_char: u16,
    target: u32,
}

impl PackedTransition {
    /// The first code unit, inclusive, this transition covers.
    #[cfg(feature = "dot_writer")]
    pub(crate) fn first_char(&self) -> u16 {
        self.first_char
    }

    /// The last code unit, inclusive, this transition covers.
    #[cfg(feature = "dot_writer")]
    pub(crate) fn last_char(&self) -> u16 {
        self.last_char
    }

    /// The state this transition leads to.
    #[cfg(feature = "dot_writer")]
    pub(crate) fn target(&self) -> u32 {
        self.target
    }
}

/// The boundaries, within the flat `transitions` array, of one state's outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct StateRange {
    start: u32,
    end: u32,
}

/// A minimized, multi-pattern DFA in its flat, matching-ready form (C6).
///
/// Built by [`crate::builder::DfaBuilder::build`]; consumed by [`crate::matcher::StringMatcher`]
/// and [`crate::searcher::StringSearcher`]. Generic over the caller's accept-tag type, which must
/// be `Clone + Eq + Hash` for ambiguity resolution during the build but carries no further bounds
/// here.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedDfa<Tag> {
    ranges: Vec<StateRange>,
    transitions: Vec<PackedTransition>,
    accepts: Vec<Option<Tag>>,
    starts: Vec<u32>,
}

impl<Tag> PackedDfa<Tag> {
    /// The sentinel target meaning "no transition here".
    pub const DEAD: u32 = DEAD;

    /// The start state for the `language_index`-th language passed to the build call that
    /// produced this DFA.
    pub fn start(&self, language_index: usize) -> u32 {
        self.starts[language_index]
    }

    /// The accept tag of `state`, if it is an accepting state.
    pub fn accept(&self, state: u32) -> Option<&Tag> {
        self.accepts[state as usize].as_ref()
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.ranges.len()
    }

    /// Follows the transition out of `state` on `c`, returning the next state, or
    /// [`PackedDfa::DEAD`] if `state` has no transition covering `c`.
    ///
    /// Binary searches `state`'s slice of `transitions`, which is kept sorted by `first_char` at
    /// build time (§4.4): O(log k) where k is that state's out-degree, not the alphabet size.
    pub fn next_state(&self, state: u32, c: u16) -> u32 {
        let range = &self.ranges[state as usize];
        let slice = &self.transitions[range.start as usize..range.end as usize];
        slice
            .binary_search_by(|t| {
                if c < t.first_char {
                    std::cmp::Ordering::Greater
                } else if c > t.last_char {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .map(|idx| slice[idx].target)
            .unwrap_or(DEAD)
    }

    /// The start state of every language passed to the build call that produced this DFA, in
    /// order. Used by [`crate::dot`] to mark each one when rendering.
    #[cfg(feature = "dot_writer")]
    pub(crate) fn starts(&self) -> &[u32] {
        &self.starts
    }

    /// The outgoing `[first_char, last_char] -> target` triples of `state`, in the sorted order
    /// [`PackedDfa::next_state`] binary searches. Used by [`crate::dot`] to render edges.
    #[cfg(feature = "dot_writer")]
    pub(crate) fn transitions_of(&self, state: u32) -> &[PackedTransition] {
        let range = &self.ranges[state as usize];
        &self.transitions[range.start as usize..range.end as usize]
    }

    /// Builds a [`PackedDfa`] from an internal, minimized [`InternalRawDfa`], sorting each state's
    /// transitions by `first_char` so [`PackedDfa::next_state`] can binary search them.
    pub(crate) fn from_raw(raw: InternalRawDfa<Tag>) -> Self {
        let mut ranges = Vec::with_capacity(raw.states.len());
        let mut transitions = Vec::new();
        let mut accepts = Vec::with_capacity(raw.states.len());
        for mut state in raw.states {
            state.transitions.sort_unstable_by_key(|t| t.first_char);
            let start = transitions.len() as u32;
            for t in &state.transitions {
                transitions.push(PackedTransition {
                    first_char: t.first_char,
                    last_char: t.last_char,
                    target: t.target.as_usize() as u32,
                });
            }
            let end = transitions.len() as u32;
            ranges.push(StateRange { start, end });
            accepts.push(state.accept);
        }
        let starts = raw.starts.iter().map(|s| s.as_usize() as u32).collect();
        PackedDfa {
            ranges,
            transitions,
            accepts,
            starts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::raw_dfa::{RawDfa, RawDfaState, RawTransition};
    use crate::internal::StateID;

    fn raw_two_state_dfa() -> InternalRawDfa<&'static str> {
        RawDfa {
            states: vec![
                RawDfaState {
                    transitions: vec![RawTransition {
                        first_char: b'a' as u16,
                        last_char: b'z' as u16,
                        target: StateID::new(1),
                    }],
                    accept: None,
                },
                RawDfaState {
                    transitions: vec![],
                    accept: Some("WORD"),
                },
            ],
            starts: vec![StateID::new(0)],
        }
    }

    #[test]
    fn next_state_follows_range_transition() {
        let packed = PackedDfa::from_raw(raw_two_state_dfa());
        let start = packed.start(0);
        assert_eq!(packed.next_state(start, b'm' as u16), 1);
        assert_eq!(packed.accept(1), Some(&"WORD"));
    }

    #[test]
    fn next_state_is_dead_outside_any_range() {
        let packed = PackedDfa::from_raw(raw_two_state_dfa());
        let start = packed.start(0);
        assert_eq!(packed.next_state(start, b'0' as u16), PackedDfa::<&'static str>::DEAD);
    }
}
