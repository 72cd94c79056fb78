//! Subset construction (C4, §4.2): turns an NFA into a [`RawDfa`] by tracking, for every reachable
//! DFA state, the set of NFA states it stands for.

use std::collections::{BTreeSet, VecDeque};

use log::trace;
use rustc_hash::FxHashMap;

use super::nfa::Nfa;
use super::raw_dfa::{RawDfa, RawDfaState, RawTransition};
use super::StateID;

fn intern<Tag>(
    subset: BTreeSet<StateID>,
    index: &mut FxHashMap<BTreeSet<StateID>, StateID>,
    states: &mut Vec<RawDfaState<Tag>>,
    pending: &mut VecDeque<BTreeSet<StateID>>,
) -> StateID {
    if let Some(&id) = index.get(&subset) {
        return id;
    }
    let id = StateID::new(states.len() as u32);
    states.push(RawDfaState {
        transitions: Vec::new(),
        accept: None,
    });
    index.insert(subset.clone(), id);
    pending.push_back(subset);
    id
}

/// Every distinct accept tag carried by the states in `subset`, in first-discovery order.
fn accept_tags<Tag: Clone + Eq>(nfa: &Nfa<Tag>, subset: &BTreeSet<StateID>) -> Vec<Tag> {
    let mut tags = Vec::new();
    for &q in subset {
        if let Some(tag) = nfa.accept(q) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

/// The event points (breakpoints) at which some transition out of `subset` starts or ends, sorted
/// and deduplicated. Consecutive pairs of breakpoints bound maximal intervals over which the set
/// of NFA transitions covering every code unit is constant.
fn breakpoints<Tag>(nfa: &Nfa<Tag>, subset: &BTreeSet<StateID>) -> Vec<u16> {
    let mut points = BTreeSet::new();
    for &q in subset {
        for t in nfa.transitions(q) {
            points.insert(t.first_char);
            if t.last_char < u16::MAX {
                points.insert(t.last_char + 1);
            }
        }
    }
    points.into_iter().collect()
}

/// Runs subset construction (§4.2), producing one DFA start state per entry of `starts` (in
/// order) and resolving multi-tag accept collisions with `resolve`.
///
/// `resolve` returns `None` to signal that the colliding tags (passed back to the caller as the
/// `Err` variant) could not be combined; this function has no opinion on what that should mean to
/// the caller, so it doesn't depend on this crate's [`crate::errors::Error`] type at all.
pub(crate) fn build<Tag>(
    nfa: &Nfa<Tag>,
    starts: &[StateID],
    resolve: &mut dyn FnMut(&[Tag]) -> Option<Tag>,
) -> Result<RawDfa<Tag>, Vec<Tag>>
where
    Tag: Clone + Eq + std::hash::Hash,
{
    let mut index: FxHashMap<BTreeSet<StateID>, StateID> = FxHashMap::default();
    let mut states: Vec<RawDfaState<Tag>> = Vec::new();
    let mut pending: VecDeque<BTreeSet<StateID>> = VecDeque::new();

    let mut dfa_starts = Vec::with_capacity(starts.len());
    for &start in starts {
        let closure = nfa.epsilon_closure([start]);
        dfa_starts.push(intern(closure, &mut index, &mut states, &mut pending));
    }

    trace!("Subset construction from {} start state(s)", dfa_starts.len());
    while let Some(subset) = pending.pop_front() {
        let id = index[&subset];
        trace!("Processing subset #{}: {:?}", id.as_usize(), subset);

        let tags = accept_tags(nfa, &subset);
        let accept = match tags.len() {
            0 => None,
            1 => Some(tags.into_iter().next().unwrap()),
            _ => Some(resolve(&tags).ok_or(tags)?),
        };
        states[id].accept = accept;

        let points = breakpoints(nfa, &subset);
        let mut transitions = Vec::new();
        for window in points.windows(2) {
            let (a, b) = (window[0], window[1] - 1);
            let mut targets = Vec::new();
            for &q in &subset {
                for t in nfa.transitions(q) {
                    if t.first_char <= a && b <= t.last_char {
                        targets.push(t.target);
                    }
                }
            }
            if targets.is_empty() {
                continue;
            }
            let closure = nfa.epsilon_closure(targets);
            let target = intern(closure, &mut index, &mut states, &mut pending);
            transitions.push(RawTransition {
                first_char: a,
                last_char: b,
                target,
            });
        }
        states[id].transitions = transitions;
    }

    trace!("Subset construction produced {} states", states.len());
    Ok(RawDfa {
        states,
        starts: dfa_starts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_none(tags: &[&'static str]) -> Option<&'static str> {
        unreachable!("no ambiguity expected in this test, got {:?}", tags)
    }

    #[test]
    fn single_literal_accepts_exactly_its_string() {
        let mut nfa: Nfa<&'static str> = Nfa::new();
        let s0 = nfa.new_state();
        let s1 = nfa.new_state();
        let s2 = nfa.new_state();
        nfa.add_transition(s0, b'i' as u16, b'i' as u16, s1);
        nfa.add_transition(s1, b'f' as u16, b'f' as u16, s2);
        nfa.set_accept(s2, "IF");

        let dfa = build(&nfa, &[s0], &mut resolve_none).unwrap();
        let start = dfa.starts[0];
        assert!(dfa.states[start].accept.is_none());
        let t = &dfa.states[start].transitions;
        assert_eq!(t.len(), 1);
        assert_eq!((t[0].first_char, t[0].last_char), (b'i' as u16, b'i' as u16));
        let s1 = t[0].target;
        let t1 = &dfa.states[s1].transitions;
        assert_eq!(t1.len(), 1);
        let s2 = t1[0].target;
        assert_eq!(dfa.states[s2].accept, Some("IF"));
    }

    #[test]
    fn overlapping_ranges_split_into_events() {
        let mut nfa: Nfa<&'static str> = Nfa::new();
        let s0 = nfa.new_state();
        let a = nfa.new_state();
        let b = nfa.new_state();
        nfa.add_transition(s0, b'a' as u16, b'm' as u16, a);
        nfa.add_transition(s0, b'g' as u16, b'z' as u16, b);
        nfa.set_accept(a, "A");
        nfa.set_accept(b, "B");

        let dfa = build(&nfa, &[s0], &mut resolve_none).unwrap();
        let start = dfa.starts[0];
        // Three events: a..f (only A), g..m (both, needs a resolver call), n..z (only B).
        assert_eq!(dfa.states[start].transitions.len(), 3);
    }

    #[test]
    fn ambiguous_accept_invokes_resolver() {
        let mut nfa: Nfa<&'static str> = Nfa::new();
        let s0 = nfa.new_state();
        let a = nfa.new_state();
        nfa.add_transition(s0, b'x' as u16, b'x' as u16, a);
        nfa.set_accept(a, "A");
        // Second pattern also accepts on the same NFA state via a shared accept target isn't
        // directly expressible without a second accept tag on one state, so ambiguity is
        // exercised by making the same state carry... instead route two edges to two distinct
        // accept states reached by the same input and confirm the resolver combines them.
        let b = nfa.new_state();
        nfa.add_transition(s0, b'x' as u16, b'x' as u16, b);
        nfa.set_accept(b, "B");

        let mut calls = 0;
        let dfa = build(&nfa, &[s0], &mut |tags: &[&'static str]| {
            calls += 1;
            assert_eq!(tags.len(), 2);
            Some("A")
        })
        .unwrap();
        assert_eq!(calls, 1);
        let start = dfa.starts[0];
        let target = dfa.states[start].transitions[0].target;
        assert_eq!(dfa.states[target].accept, Some("A"));
    }
}
