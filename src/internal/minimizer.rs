//! DFA minimization (C5, §4.3): Hopcroft-style partition refinement by hash signature.
//!
//! States start grouped only by their accept tag (or lack of one); the partition is then
//! refined, round by round, by splitting any group whose members disagree on which group their
//! transitions land in for some code unit, until a round leaves every group unsplit.

use std::collections::BTreeSet;

use log::trace;
use rustc_hash::FxHashMap;

use super::raw_dfa::{RawDfa, RawDfaState, RawTransition};
use super::StateID;

/// A signature that two states sharing it are (so far) indistinguishable: their accept tag's
/// group, and for every transition they carry, the range plus the group its target belongs to.
/// States with an identical signature after a round of refinement stay merged; the first round
/// where two members of a group disagree is exactly when the group splits.
fn signature<Tag>(state: &RawDfaState<Tag>, group_of: &[usize]) -> Vec<(u16, u16, usize)> {
    let mut sig: Vec<(u16, u16, usize)> = state
        .transitions
        .iter()
        .map(|t| (t.first_char, t.last_char, group_of[t.target.as_usize()]))
        .collect();
    sig.sort_unstable();
    sig
}

/// Minimizes `dfa` in place, returning the minimized automaton. Unreachable states (there should
/// be none after subset construction, which only ever visits reachable subsets) are not a
/// separate concern here; this only merges equivalent reachable states.
pub(crate) fn minimize<Tag>(dfa: RawDfa<Tag>) -> RawDfa<Tag>
where
    Tag: Clone + Eq + std::hash::Hash,
{
    trace!("Minimize DFA with {} states ----------------------------", dfa.states.len());
    let n = dfa.states.len();
    if n == 0 {
        return dfa;
    }

    // Initial partition: group by accept tag identity (`None` is its own group).
    let mut tag_groups: FxHashMap<Option<Tag>, usize> = FxHashMap::default();
    let mut group_of = vec![0usize; n];
    for (i, state) in dfa.states.iter().enumerate() {
        let next_id = tag_groups.len();
        let group = *tag_groups.entry(state.accept.clone()).or_insert(next_id);
        group_of[i] = group;
    }

    loop {
        let mut sig_to_group: FxHashMap<(usize, Vec<(u16, u16, usize)>), usize> = FxHashMap::default();
        let mut new_group_of = vec![0usize; n];
        for (i, state) in dfa.states.iter().enumerate() {
            let sig = signature(state, &group_of);
            let key = (group_of[i], sig);
            let next_id = sig_to_group.len();
            let group = *sig_to_group.entry(key).or_insert(next_id);
            new_group_of[i] = group;
        }
        if new_group_of == group_of {
            break;
        }
        group_of = new_group_of;
        trace!("Refined to {} groups", sig_to_group.len());
    }

    // Renumber: one DFA state per final group, keyed by its representative's transitions and
    // accept tag, with transition targets rewritten to the representative's group id.
    let group_count = group_of.iter().copied().max().map_or(0, |m| m + 1);
    let mut representative = vec![usize::MAX; group_count];
    for (i, &g) in group_of.iter().enumerate() {
        if representative[g] == usize::MAX {
            representative[g] = i;
        }
    }

    let mut new_states: Vec<RawDfaState<Tag>> = Vec::with_capacity(group_count);
    for &rep in &representative {
        let old = &dfa.states[rep];
        let transitions: Vec<RawTransition> = old
            .transitions
            .iter()
            .map(|t| RawTransition {
                first_char: t.first_char,
                last_char: t.last_char,
                target: StateID::new(group_of[t.target.as_usize()] as u32),
            })
            .collect();
        new_states.push(RawDfaState {
            transitions,
            accept: old.accept.clone(),
        });
    }

    let starts = dfa
        .starts
        .iter()
        .map(|s| StateID::new(group_of[s.as_usize()] as u32))
        .collect();

    trace!("Minimized DFA has {} states", new_states.len());
    RawDfa {
        states: new_states,
        starts,
    }
}

/// True if every state reachable from `starts` agrees with `minimize`'s output on acceptance for
/// all sampled inputs; exposed for tests that want to sanity-check a minimization against a
/// brute-force reference over a bounded alphabet.
#[cfg(test)]
pub(crate) fn reachable_states<Tag>(dfa: &RawDfa<Tag>) -> BTreeSet<StateID> {
    use std::collections::VecDeque;
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::new();
    for &s in &dfa.starts {
        if seen.insert(s) {
            queue.push_back(s);
        }
    }
    while let Some(s) = queue.pop_front() {
        for t in &dfa.states[s.as_usize()].transitions {
            if seen.insert(t.target) {
                queue.push_back(t.target);
            }
        }
    }
    seen
}
