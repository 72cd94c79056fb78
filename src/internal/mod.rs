//! Build-time internals: the NFA, subset construction, and DFA minimization.
//!
//! Everything here is an implementation detail of [`crate::builder::DfaBuilder`] and is not part
//! of the public API; the public surface is [`crate::pattern`], [`crate::packed_dfa`],
//! [`crate::builder`], [`crate::matcher`], [`crate::searcher`] and [`crate::replace`].

mod ids;
pub(crate) use ids::{LanguageID, LanguageIDBase, StateID, StateIDBase};

pub(crate) mod nfa;
pub(crate) use nfa::Nfa;

pub(crate) mod raw_dfa;
pub(crate) use raw_dfa::RawDfa;

pub(crate) mod subset_construction;

pub(crate) mod minimizer;
