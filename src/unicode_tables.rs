//! Embedded Unicode category data (§3.1).
//!
//! Each category is computed once, by scanning the 16-bit code-unit space and querying
//! `seshat-unicode`'s [`Ucd`] trait, and memoized behind a [`std::sync::LazyLock`] the way the
//! teacher crate's Unicode-derived tables are built lazily on first use. Unpaired surrogate code
//! units (`0xD800..=0xDFFF`) have no `char` representation and are treated as members of no
//! category, matching their Unicode general category `Cs` (surrogate).

use std::sync::LazyLock;

use seshat::unicode::{props::Gc, Ucd};

use crate::char_range::CharRange;

fn build(pred: impl Fn(char) -> bool) -> CharRange {
    let mut boundaries = Vec::new();
    let mut in_set = false;
    for cu in 0u32..=0xFFFF {
        let member = if (0xD800..=0xDFFF).contains(&cu) {
            false
        } else {
            // SAFETY-free: `cu` is outside the surrogate range here, so it is always a valid
            // Unicode scalar value.
            pred(char::from_u32(cu).unwrap())
        };
        if member != in_set {
            boundaries.push(cu as u16);
            in_set = member;
        }
    }
    CharRange::from_boundaries(boundaries)
}

static L: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.alpha()));
static LU: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.upper()));
static LL: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.lower()));
static ND: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.gc() == Gc::Nd));
static P: LazyLock<CharRange> = LazyLock::new(|| {
    build(|c| {
        matches!(
            c.gc(),
            Gc::Pc | Gc::Pd | Gc::Ps | Gc::Pe | Gc::Pi | Gc::Pf | Gc::Po
        )
    })
});
static S: LazyLock<CharRange> =
    LazyLock::new(|| build(|c| matches!(c.gc(), Gc::Sc | Gc::Sk | Gc::Sm | Gc::So)));
static Z: LazyLock<CharRange> =
    LazyLock::new(|| build(|c| matches!(c.gc(), Gc::Zs | Gc::Zl | Gc::Zp)));
static IDENTIFIER_START: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.xids()));
static IDENTIFIER_PART: LazyLock<CharRange> = LazyLock::new(|| build(|c| c.xidc()));
/// A standalone "bare identifier" category: alphanumeric like identifier continuation.
static IDENTIFIER: LazyLock<CharRange> = LazyLock::new(|| IDENTIFIER_PART.clone());
static WORD: LazyLock<CharRange> =
    LazyLock::new(|| build(|c| c.is_alphanumeric() || c.join_c() || c.gc() == Gc::Pc || c.gc() == Gc::Mn));
static HORIZONTAL_WHITESPACE: LazyLock<CharRange> = LazyLock::new(|| {
    build(|c| matches!(c, '\t' | ' ' | '\u{A0}') || c.gc() == Gc::Zs)
});
static VERTICAL_WHITESPACE: LazyLock<CharRange> = LazyLock::new(|| {
    build(|c| matches!(c, '\n' | '\x0B' | '\x0C' | '\r' | '\u{85}') || matches!(c.gc(), Gc::Zl | Gc::Zp))
});

/// Looks up a named category. See [`crate::char_range::CharRange::category`] for the recognized
/// names.
pub(crate) fn category(name: &str) -> Option<CharRange> {
    let table = match name {
        "L" => &L,
        "Lu" => &LU,
        "Ll" => &LL,
        "Nd" => &ND,
        "P" => &P,
        "S" => &S,
        "Z" => &Z,
        "Identifier" => &IDENTIFIER,
        "IdentifierStart" => &IDENTIFIER_START,
        "IdentifierPart" => &IDENTIFIER_PART,
        "Word" => &WORD,
        "HorizontalWhitespace" => &HORIZONTAL_WHITESPACE,
        "VerticalWhitespace" => &VERTICAL_WHITESPACE,
        _ => return None,
    };
    Some(LazyLock::force(table).clone())
}
