//! A table-driven suite of pattern/match correctness tests, in the spirit of the teacher crate's
//! own `match_test.rs`.

use std::collections::HashSet;

use dfa_forge::{CharRange, DfaBuilder, Pattern, StringMatcher};

#[derive(Debug)]
struct TestData {
    pattern: Pattern,
    input: &'static str,
    /// `None` means no match is expected at position 0; `Some((start, end))` gives the expected
    /// matched span.
    expected: Option<(usize, usize)>,
}

fn td(pattern: Pattern, input: &'static str, expected: Option<(usize, usize)>) -> TestData {
    TestData { pattern, input, expected }
}

fn check(cases: Vec<TestData>) {
    for case in cases {
        let mut builder: DfaBuilder<&'static str> = DfaBuilder::new();
        builder.add_pattern(case.pattern, "T");
        let lang: HashSet<&'static str> = ["T"].into_iter().collect();
        let dfa = builder.build(&[lang], &mut dfa_forge::decline_ambiguity()).unwrap();
        let matcher = StringMatcher::new(&dfa, 0);
        let input: Vec<u16> = case.input.encode_utf16().collect();
        let found = matcher.find_at(&input, 0).map(|m| (m.span.start, m.span.end));
        assert_eq!(found, case.expected, "input = {:?}", case.input);
    }
}

#[test]
fn literal_patterns() {
    check(vec![
        td(Pattern::literal("if"), "if", Some((0, 2))),
        td(Pattern::literal("if"), "iffy", Some((0, 2))),
        td(Pattern::literal("if"), "i", None),
        td(Pattern::literal("if"), "elif", None),
    ]);
}

#[test]
fn alternation_and_repetition() {
    check(vec![
        td(Pattern::alt([Pattern::literal("cat"), Pattern::literal("dog")]), "cat", Some((0, 3))),
        td(Pattern::alt([Pattern::literal("cat"), Pattern::literal("dog")]), "dog", Some((0, 3))),
        td(Pattern::alt([Pattern::literal("cat"), Pattern::literal("dog")]), "cow", None),
        td(Pattern::char(CharRange::range(b'0' as u16, b'9' as u16)).repeat1(), "1234x", Some((0, 4))),
        td(Pattern::char(CharRange::range(b'0' as u16, b'9' as u16)).repeat1(), "x123", None),
        td(Pattern::char(CharRange::single(b'a' as u16)).repeat(), "", Some((0, 0))),
    ]);
}

#[test]
fn maybe_and_maybe_repeat() {
    check(vec![
        td(Pattern::seq([Pattern::literal("colo"), Pattern::literal("u").maybe(), Pattern::literal("r")]), "color", Some((0, 5))),
        td(Pattern::seq([Pattern::literal("colo"), Pattern::literal("u").maybe(), Pattern::literal("r")]), "colour", Some((0, 6))),
        td(Pattern::literal("ab").maybe_repeat(), "ababab!", Some((0, 6))),
        td(Pattern::literal("ab").maybe_repeat(), "!", Some((0, 0))),
    ]);
}

#[test]
fn case_insensitive_literal() {
    check(vec![
        td(Pattern::literal("select").case_insensitive(), "SELECT", Some((0, 6))),
        td(Pattern::literal("select").case_insensitive(), "SeLeCt * from", Some((0, 6))),
        td(Pattern::literal("select").case_insensitive(), "selected", Some((0, 6))),
    ]);
}

#[test]
fn identifier_pattern_matches_unicode_letters() {
    let start = CharRange::category("L").unwrap().union(&CharRange::single(b'_' as u16));
    let cont = start.union(&CharRange::category("Nd").unwrap());
    let identifier = Pattern::seq([Pattern::char(start), Pattern::char(cont).repeat()]);
    check(vec![
        td(identifier.clone(), "caf\u{e9}_1 x", Some((0, 5))),
        td(identifier.clone(), "_private", Some((0, 8))),
        td(identifier, "1nvalid", None),
    ]);
}

#[test]
fn longest_match_wins_among_overlapping_patterns() {
    let mut builder: DfaBuilder<&'static str> = DfaBuilder::new();
    builder.add_pattern(Pattern::literal("in"), "IN");
    builder.add_pattern(Pattern::literal("int"), "INT");
    let lang: HashSet<&'static str> = ["IN", "INT"].into_iter().collect();
    let dfa = builder.build(&[lang], &mut dfa_forge::decline_ambiguity()).unwrap();
    let matcher = StringMatcher::new(&dfa, 0);
    let input: Vec<u16> = "int x".encode_utf16().collect();
    let m = matcher.find_at(&input, 0).unwrap();
    assert_eq!(m.tag, "INT");
    assert_eq!(m.span.range(), 0..3);
}
