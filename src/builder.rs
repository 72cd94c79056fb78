//! The DFA builder (C7, §4.5): compiles added patterns, per language, into matching-ready
//! [`PackedDfa`]s, optionally going through a [`BuilderCache`] first.

use std::collections::HashSet;

use log::trace;

use crate::cache::{cache_key, hash_word, BuilderCache};
use crate::errors::{ErrorKind, Result};
use crate::internal::{minimizer, subset_construction, Nfa, StateID};
use crate::packed_dfa::PackedDfa;
use crate::pattern::Pattern;

/// A caller-supplied ambiguity resolver (§3.7, §4.5): called with the distinct tags that are all
/// simultaneously live at one DFA state, it picks the one tag that should win, or declines (`None`)
/// to report [`ErrorKind::Ambiguity`] instead.
pub type AmbiguityResolver<'a, Tag> = dyn FnMut(&[Tag]) -> Option<Tag> + 'a;

/// A resolver that declines every ambiguity, so any tie between two or more patterns' accepts is
/// reported as [`ErrorKind::Ambiguity`] rather than silently picked.
pub fn decline_ambiguity<Tag>() -> impl FnMut(&[Tag]) -> Option<Tag> {
    |_tags: &[Tag]| None
}

/// A resolver that always picks the first tag in the order [`DfaBuilder::add_pattern`] added it,
/// i.e. the earliest-added pattern wins every tie.
pub fn prefer_first_tag<Tag: Clone>() -> impl FnMut(&[Tag]) -> Option<Tag> {
    |tags: &[Tag]| tags.first().cloned()
}

/// Builds [`PackedDfa`]s from a set of tagged patterns (C7).
///
/// Patterns are added once with [`DfaBuilder::add_pattern`], then one or more "languages" -
/// subsets of the added tags - are compiled together with [`DfaBuilder::build`]. Each language
/// gets its own start state in the resulting DFA, addressed by its index in the `languages` slice.
pub struct DfaBuilder<Tag> {
    patterns: Vec<(Pattern, Tag)>,
    cache: Option<Box<dyn BuilderCache<Tag>>>,
}

impl<Tag> Default for DfaBuilder<Tag> {
    fn default() -> Self {
        DfaBuilder {
            patterns: Vec::new(),
            cache: None,
        }
    }
}

impl<Tag> DfaBuilder<Tag> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `pattern`, tagged `tag`, to the set of patterns this builder knows about.
    pub fn add_pattern(&mut self, pattern: Pattern, tag: Tag) {
        self.patterns.push((pattern, tag));
    }

    /// Forgets every pattern added so far.
    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    /// Installs a [`BuilderCache`] this builder consults before building and populates after.
    pub fn with_cache(&mut self, cache: Box<dyn BuilderCache<Tag>>) {
        self.cache = Some(cache);
    }

    /// Builds one NFA start state per entry of `languages`, wiring each included pattern's
    /// fragment (reversed first, if `reverse` is set) behind it. If `prefix_any` is set, the start
    /// state also gets a self-loop covering every code unit, turning it into an unanchored
    /// "scan anywhere" start rather than an anchored one (used by [`Self::build_string_searcher`]).
    fn language_starts(
        &self,
        languages: &[HashSet<Tag>],
        nfa: &mut Nfa<Tag>,
        reverse: bool,
        prefix_any: bool,
    ) -> Vec<StateID>
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        languages
            .iter()
            .map(|wanted| {
                let start = nfa.new_state();
                if prefix_any {
                    nfa.add_transition(start, 0, u16::MAX, start);
                }
                for (pattern, tag) in &self.patterns {
                    if !wanted.contains(tag) {
                        continue;
                    }
                    let accept = nfa.new_state();
                    nfa.set_accept(accept, tag.clone());
                    let entry = if reverse {
                        pattern.reversed().add_to_nfa(nfa, accept)
                    } else {
                        pattern.add_to_nfa(nfa, accept)
                    };
                    nfa.add_epsilon(start, entry);
                }
                start
            })
            .collect()
    }

    /// Compiles `languages` into a single anchored [`PackedDfa`]: `dfa.start(i)` is the start
    /// state for `languages[i]`, and matching always begins exactly where the caller asks (see
    /// [`crate::matcher::StringMatcher`]).
    ///
    /// `resolver` is consulted whenever two or more patterns' accepts are simultaneously live at
    /// one DFA state; see [`decline_ambiguity`] and [`prefer_first_tag`] for ready-made resolvers.
    pub fn build(
        &mut self,
        languages: &[HashSet<Tag>],
        resolver: &mut AmbiguityResolver<Tag>,
    ) -> Result<PackedDfa<Tag>, Tag>
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        if self.cache.is_some() {
            let key = self.cache_key(languages);
            if let Some(dfa) = self.cache.as_ref().unwrap().get(&key) {
                trace!("Cache hit for key {}", key);
                return Ok(dfa);
            }
            trace!("Cache miss for key {}, building", key);
            let dfa = self.build_uncached(languages, false, resolver)?;
            self.cache.as_mut().unwrap().put(&key, &dfa);
            return Ok(dfa);
        }
        self.build_uncached(languages, false, resolver)
    }

    /// Compiles `languages` into reverse finders (§4.1): one [`PackedDfa`] whose `i`-th start
    /// state recognizes exactly the reverses of the strings matched by `languages[i]`, with every
    /// start disemptified so it never accepts the empty string.
    ///
    /// Used alongside an unanchored forward scan (see [`Self::build_string_searcher`]) to recover
    /// the true start of a match once its end has been found.
    pub fn build_reverse_finders(
        &mut self,
        languages: &[HashSet<Tag>],
        resolver: &mut AmbiguityResolver<Tag>,
    ) -> Result<PackedDfa<Tag>, Tag>
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        let mut nfa: Nfa<Tag> = Nfa::new();
        let starts = self.language_starts(languages, &mut nfa, true, false);
        let disemptified: Vec<StateID> = starts.into_iter().map(|s| nfa.disemptify(s)).collect();
        let raw = subset_construction::build(&nfa, &disemptified, resolver)
            .map_err(|tags| ErrorKind::Ambiguity { tags })?;
        let minimized = minimizer::minimize(raw);
        Ok(PackedDfa::from_raw(minimized))
    }

    /// Compiles both halves a [`crate::searcher::StringSearcher`] needs for `languages`: an
    /// unanchored forward scan DFA (used to find where a match ends) and the matching reverse
    /// finder (used to recover where it started). Returns `(scan_dfa, reverse_dfa)`.
    ///
    /// `resolver` is used for both halves in turn.
    pub fn build_string_searcher(
        &mut self,
        languages: &[HashSet<Tag>],
        resolver: &mut AmbiguityResolver<Tag>,
    ) -> Result<(PackedDfa<Tag>, PackedDfa<Tag>), Tag>
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        let scan_dfa = self.build_uncached(languages, true, resolver)?;
        let reverse_dfa = self.build_reverse_finders(languages, resolver)?;
        Ok((scan_dfa, reverse_dfa))
    }

    fn build_uncached(
        &self,
        languages: &[HashSet<Tag>],
        prefix_any: bool,
        resolver: &mut AmbiguityResolver<Tag>,
    ) -> Result<PackedDfa<Tag>, Tag>
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        trace!(
            "Building DFA from {} pattern(s) over {} language(s), unanchored = {}",
            self.patterns.len(),
            languages.len(),
            prefix_any
        );
        let mut nfa: Nfa<Tag> = Nfa::new();
        let starts = self.language_starts(languages, &mut nfa, false, prefix_any);
        let raw = subset_construction::build(&nfa, &starts, resolver)
            .map_err(|tags| ErrorKind::Ambiguity { tags })?;
        let minimized = minimizer::minimize(raw);
        Ok(PackedDfa::from_raw(minimized))
    }

    /// Derives the §6.3 cache key for `languages` from the added patterns' and tags' structural
    /// hashes, via [`hash_word`] rather than `std::collections::hash_map::DefaultHasher` so the
    /// key stays stable across Rust versions.
    fn cache_key(&self, languages: &[HashSet<Tag>]) -> String
    where
        Tag: Clone + Eq + std::hash::Hash,
    {
        let mut words: Vec<u64> = self
            .patterns
            .iter()
            .map(|(pattern, tag)| hash_word(pattern) ^ hash_word(tag).rotate_left(1))
            .collect();
        for language in languages {
            let mut tags: Vec<u64> = language.iter().map(hash_word).collect();
            tags.sort_unstable();
            words.extend(tags);
        }
        cache_key(words)
    }
}
