#![forbid(missing_docs)]
//! # `dfa-forge`
//! A multi-pattern regular-language compiler over 16-bit code units.
//!
//! Patterns are built from the combinator vocabulary in [`pattern`], compiled by a
//! [`builder::DfaBuilder`] through an NFA, subset construction, and DFA minimization into a flat,
//! serializable [`packed_dfa::PackedDfa`], then driven by [`matcher::StringMatcher`] (match right
//! here), [`searcher::StringSearcher`] (find matches anywhere), or [`replace::SearchAndReplace`]
//! (search and rewrite).

/// Module with error definitions.
mod errors;
pub use errors::{Error, ErrorKind, Result};

/// Module that provides the sorted-boundary-list character range type.
mod char_range;
pub use char_range::CharRange;

/// Embedded Unicode general-category tables, used by [`CharRange::category`].
mod unicode_tables;

/// Case-folding tables, used by [`pattern::Pattern::case_insensitive`].
mod case_fold;

/// The module with internal build-time implementation details: the NFA, subset construction, and
/// DFA minimization.
mod internal;

/// Module that provides the pattern combinator algebra.
mod pattern;
pub use pattern::Pattern;

/// Module that provides the flat, matching-ready packed DFA.
mod packed_dfa;
pub use packed_dfa::{PackedDfa, PackedTransition};

/// Module that provides the builder cache trait and its key derivation.
mod cache;
pub use cache::{cache_key, BuilderCache};

/// Module that provides the DFA builder.
mod builder;
pub use builder::{decline_ambiguity, prefer_first_tag, AmbiguityResolver, DfaBuilder};

/// Module that provides an anchored, single-position matcher.
mod matcher;
pub use matcher::{Match, StringMatcher};

/// Module that provides an unanchored, iterator-based searcher.
mod searcher;
pub use searcher::StringSearcher;

/// Module that provides search-and-replace.
mod replace;
pub use replace::{delete, ignore, literal, space_or_newline, surround, to_lower, to_upper, SearchAndReplace, StringReplacement};

/// Module that provides a span type.
mod span;
pub use span::Span;

/// Graphviz export of a [`PackedDfa`], for debugging a build by eye.
#[cfg(feature = "dot_writer")]
pub mod dot;
