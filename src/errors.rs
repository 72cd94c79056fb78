//! Module with the crate's error type.
//!
//! All fallible operations in this crate return [`Result`], an alias for `std::result::Result<T,
//! Error<Tag>>`. The error is generic over the caller's accept-tag type because
//! [`ErrorKind::Ambiguity`] carries the offending tag set; the tag type is required only to be
//! `Clone + Eq + Hash` (see [`crate::pattern`] / the builder), not `Debug` or `Display`, so
//! [`ErrorKind`] implements [`std::fmt::Debug`] by hand rather than deriving it.

use std::fmt;

/// A specialized `Result` type for this crate's fallible operations.
pub type Result<T, Tag> = std::result::Result<T, Error<Tag>>;

/// The error type returned by this crate's fallible operations.
///
/// Boxes its [`ErrorKind`] so that `Result<T, Error<Tag>>` stays small on the stack, mirroring
/// the boxed-error convention used throughout this crate's build-time components.
#[derive(thiserror::Error)]
#[error(transparent)]
pub struct Error<Tag>(#[from] Box<ErrorKind<Tag>>);

impl<Tag> Error<Tag> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind<Tag> {
        &self.0
    }
}

impl<Tag> fmt::Debug for Error<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<Tag> From<ErrorKind<Tag>> for Error<Tag> {
    fn from(kind: ErrorKind<Tag>) -> Self {
        Error(Box::new(kind))
    }
}

/// The kinds of errors that can occur while building or using the artifacts of this crate.
#[derive(thiserror::Error)]
pub enum ErrorKind<Tag> {
    /// A DFA state would have to accept more than one tag and the ambiguity resolver in effect
    /// for the build either wasn't supplied or declined to combine the tags.
    #[error(
        "ambiguous match: {} accept tags collide at one state and no resolver could combine them",
        .tags.len()
    )]
    Ambiguity {
        /// The colliding tags, in the order they were discovered.
        tags: Vec<Tag>,
    },
    /// A value read from a [`crate::cache::BuilderCache`] failed its checksum.
    #[error("cached entry for key `{key}` failed its checksum and was rejected")]
    CorruptCache {
        /// The cache key whose value was corrupt.
        key: String,
    },
    /// A pattern combinator was asked to reverse a variant that has no defined reversal.
    ///
    /// Reserved: the combinator algebra in [`crate::pattern`] defines a reversal for every
    /// variant, so this never occurs today.
    #[error("pattern combinator has no defined reversal")]
    InvalidPattern,
    /// An I/O failure while reading or writing the persisted form of a packed DFA (§6.4).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl<Tag> fmt::Debug for ErrorKind<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Ambiguity { tags } => f
                .debug_struct("Ambiguity")
                .field("tag_count", &tags.len())
                .finish(),
            ErrorKind::CorruptCache { key } => {
                f.debug_struct("CorruptCache").field("key", key).finish()
            }
            ErrorKind::InvalidPattern => f.debug_struct("InvalidPattern").finish(),
            ErrorKind::Io(e) => f.debug_tuple("Io").field(e).finish(),
        }
    }
}
