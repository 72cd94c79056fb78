//! Search-and-replace (C8c, §4.6 / §8): drives a [`crate::searcher::StringSearcher`] end to end,
//! handing each match to a per-tag [`StringReplacement`] rule and splicing the results back
//! together with the untouched text between matches.

use std::collections::HashMap;
use std::hash::Hash;

use crate::matcher::Match;

/// A per-tag rule deciding what a match becomes.
///
/// Handles one match over `src[start..end]` by appending whatever it wants onto `dest`, and
/// returns the number of additional code units of `src` to skip past `end` before the next match
/// is considered — 0 resumes scanning immediately after this match. The skip lets a rule reach
/// past its own match to consume and rewrite context a naive next-match search would otherwise
/// re-split (§4.6), e.g. merging the gap before the following word into its own output.
///
/// Implemented for any `Fn(&mut Vec<u16>, &[u16], usize, usize) -> usize`, so the built-in rules
/// below and ad hoc closures both work as arguments to [`SearchAndReplace::on`].
pub trait StringReplacement {
    /// Appends the replacement for `src[start..end]` onto `dest` and returns the extra skip.
    fn decide(&self, dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize) -> usize;
}

impl<F> StringReplacement for F
where
    F: Fn(&mut Vec<u16>, &[u16], usize, usize) -> usize,
{
    fn decide(&self, dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize) -> usize {
        self(dest, src, start, end)
    }
}

/// Keeps the matched text unchanged.
pub fn ignore() -> impl StringReplacement {
    |dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize| {
        dest.extend_from_slice(&src[start..end]);
        0
    }
}

/// Deletes the matched text.
pub fn delete() -> impl StringReplacement {
    |_dest: &mut Vec<u16>, _src: &[u16], _start: usize, _end: usize| 0
}

fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Upper-cases the matched text.
pub fn to_upper() -> impl StringReplacement {
    |dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize| {
        dest.extend(encode(&decode(&src[start..end]).to_uppercase()));
        0
    }
}

/// Lower-cases the matched text.
pub fn to_lower() -> impl StringReplacement {
    |dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize| {
        dest.extend(encode(&decode(&src[start..end]).to_lowercase()));
        0
    }
}

/// Collapses the matched text to a single space, or a single newline if the match contains one
/// (so a run of whitespace spanning a line break collapses to a line break, not a space).
pub fn space_or_newline() -> impl StringReplacement {
    |dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize| {
        let matched = &src[start..end];
        let text = if matched.contains(&(b'\n' as u16)) { "\n" } else { " " };
        dest.extend(encode(text));
        0
    }
}

/// Replaces every match with the fixed string `text`, regardless of what it matched.
pub fn literal(text: &str) -> impl StringReplacement {
    let encoded = encode(text);
    move |dest: &mut Vec<u16>, _src: &[u16], _start: usize, _end: usize| {
        dest.extend_from_slice(&encoded);
        0
    }
}

/// Wraps the matched text with `prefix` and `suffix`, leaving the match itself unchanged.
pub fn surround(prefix: &str, suffix: &str) -> impl StringReplacement {
    let prefix = encode(prefix);
    let suffix = encode(suffix);
    move |dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize| {
        dest.extend_from_slice(&prefix);
        dest.extend_from_slice(&src[start..end]);
        dest.extend_from_slice(&suffix);
        0
    }
}

/// Applies a per-tag set of [`StringReplacement`] rules over a stream of matches, producing the
/// rewritten text.
pub struct SearchAndReplace<Tag> {
    rules: HashMap<Tag, Box<dyn StringReplacement>>,
}

impl<Tag> Default for SearchAndReplace<Tag> {
    fn default() -> Self {
        SearchAndReplace {
            rules: HashMap::new(),
        }
    }
}

impl<Tag> SearchAndReplace<Tag>
where
    Tag: Eq + Hash,
{
    /// Creates a replacer with no rules; tags with no registered rule default to [`ignore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` as what to do with every match tagged `tag`.
    pub fn on(&mut self, tag: Tag, rule: impl StringReplacement + 'static) {
        self.rules.insert(tag, Box::new(rule));
    }

    /// Rewrites `input` by copying the gaps between `matches` unchanged and applying each match's
    /// rule (or [`ignore`] if none is registered for its tag) to its span.
    ///
    /// `matches` must be sorted by span start and non-overlapping, the order
    /// [`crate::searcher::StringSearcher`] produces them in. A rule's skip (§4.6) can advance the
    /// cursor past a later match's start; any match that begins before the cursor has reached it
    /// is skipped, since its input was already consumed by an earlier rule.
    pub fn apply(&self, input: &[u16], matches: impl IntoIterator<Item = Match<Tag>>) -> Vec<u16> {
        let mut out = Vec::with_capacity(input.len());
        let mut cursor = 0usize;
        for m in matches {
            let range = m.span.range();
            if range.start < cursor {
                continue;
            }
            out.extend_from_slice(&input[cursor..range.start]);
            let skip = match self.rules.get(&m.tag) {
                Some(rule) => rule.decide(&mut out, input, range.start, range.end),
                None => {
                    out.extend_from_slice(&input[range.clone()]);
                    0
                }
            };
            cursor = (range.end + skip).min(input.len());
        }
        out.extend_from_slice(&input[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DfaBuilder;
    use crate::pattern::Pattern;
    use crate::searcher::StringSearcher;
    use std::collections::HashSet;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn to_string(units: &[u16]) -> String {
        String::from_utf16_lossy(units)
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Tag {
        Tag0,
    }

    fn run(pattern: Pattern, input: &str, rule: impl StringReplacement + 'static) -> String {
        let mut builder: DfaBuilder<Tag> = DfaBuilder::new();
        builder.add_pattern(pattern, Tag::Tag0);
        let lang: HashSet<Tag> = [Tag::Tag0].into_iter().collect();
        let (scan_dfa, reverse_dfa) = builder.build_string_searcher(&[lang], &mut crate::builder::decline_ambiguity()).unwrap();
        let input = utf16(input);
        let searcher = StringSearcher::new(&scan_dfa, &reverse_dfa, 0, &input);
        let mut replacer: SearchAndReplace<Tag> = SearchAndReplace::new();
        replacer.on(Tag::Tag0, rule);
        to_string(&replacer.apply(&input, searcher))
    }

    #[test]
    fn delete_strips_matched_tags() {
        let p = Pattern::seq([
            Pattern::literal("<b>"),
        ]);
        let out = run(p, "x<b>y", delete());
        assert_eq!(out, "xy");
    }

    #[test]
    fn to_upper_upcases_keyword() {
        let out = run(Pattern::literal("if"), "an if clause", to_upper());
        assert_eq!(out, "an IF clause");
    }

    #[test]
    fn to_lower_downcases_acronym() {
        let out = run(Pattern::literal("ID"), "user ID here", to_lower());
        assert_eq!(out, "user id here");
    }

    #[test]
    fn literal_redacts_matches() {
        let out = run(Pattern::literal("secret"), "the secret word", literal("[REDACTED]"));
        assert_eq!(out, "the [REDACTED] word");
    }

    #[test]
    fn space_or_newline_collapses_runs() {
        let whitespace = Pattern::alt([
            Pattern::char(crate::char_range::CharRange::single(b' ' as u16)),
            Pattern::char(crate::char_range::CharRange::single(b'\n' as u16)),
        ])
        .repeat1();
        let out = run(whitespace, "a   b\n\nc", space_or_newline());
        assert_eq!(out, "a b\nc");
    }

    #[test]
    fn ignore_leaves_text_unchanged() {
        let out = run(Pattern::literal("kept"), "this is kept as is", ignore());
        assert_eq!(out, "this is kept as is");
    }

    #[test]
    fn surround_wraps_matched_identifiers() {
        let out = run(Pattern::literal("name"), "my name tag", surround("**", "**"));
        assert_eq!(out, "my **name** tag");
    }

    #[test]
    fn reposition_replacement_merges_word_pairs_across_gaps() {
        use crate::char_range::CharRange;

        fn alnum() -> Pattern {
            Pattern::alt([
                Pattern::char(CharRange::range(b'a' as u16, b'z' as u16)),
                Pattern::char(CharRange::range(b'0' as u16, b'9' as u16)),
            ])
        }

        fn word_pair(dest: &mut Vec<u16>, src: &[u16], start: usize, end: usize) -> usize {
            let matched = &src[start..end];
            let gap_start = matched.iter().position(|&c| c == b' ' as u16).unwrap();
            let w2_start = gap_start
                + matched[gap_start..].iter().position(|&c| c != b' ' as u16).unwrap();
            dest.extend_from_slice(&matched[..gap_start]);
            dest.extend_from_slice(&encode(", "));
            dest.extend_from_slice(&matched[w2_start..]);

            let mut i = end;
            while i < src.len() && src[i] == b' ' as u16 {
                i += 1;
            }
            if i > end && i < src.len() && src[i] != b' ' as u16 {
                dest.extend_from_slice(&encode(", "));
                i - end
            } else {
                0
            }
        }

        let pattern = Pattern::seq([
            alnum().repeat1(),
            Pattern::char(CharRange::single(b' ' as u16)).repeat1(),
            alnum().repeat1(),
        ]);
        let out = run(pattern, " one two  three   four five ", word_pair);
        assert_eq!(out, " one, two, three, four, five ");
    }

    #[test]
    fn unregistered_tag_defaults_to_keep() {
        let mut builder: DfaBuilder<Tag> = DfaBuilder::new();
        builder.add_pattern(Pattern::literal("x"), Tag::Tag0);
        let lang: HashSet<Tag> = [Tag::Tag0].into_iter().collect();
        let (scan_dfa, reverse_dfa) = builder.build_string_searcher(&[lang], &mut crate::builder::decline_ambiguity()).unwrap();
        let input = utf16("x");
        let searcher = StringSearcher::new(&scan_dfa, &reverse_dfa, 0, &input);
        let replacer: SearchAndReplace<Tag> = SearchAndReplace::new();
        assert_eq!(to_string(&replacer.apply(&input, searcher)), "x");
    }
}
