//! Token records and their interned tags.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::string_interner::InternedString;

/// The kind of a token, e.g. `keyword` or `string.quoted`.
///
/// Tags are interned: cloning one is a pointer copy, and every occurrence
/// of the same name shares a single allocation no matter how many tokens
/// carry it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Tag(InternedString);

impl Tag {
    /// The name given to tokens the lexer could not recognize.
    pub const ERROR: &'static str = "error";

    /// Creates (or reuses) the tag with the given name.
    pub fn new(name: &str) -> Self {
        Tag(InternedString::new(name))
    }

    /// The tag for unrecognized input.
    pub fn error() -> Self {
        Tag::new(Self::ERROR)
    }

    /// Returns the tag's name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if this is the [`Tag::error`] tag.
    pub fn is_error(&self) -> bool {
        self.as_str() == Self::ERROR
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lexed token in absolute document coordinates.
///
/// `from` is inclusive and `to` exclusive, both byte offsets into the
/// document. Tokens are plain values; a buffer never mutates one it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The kind of the token
    pub tag: Tag,
    /// Byte offset of the first byte of the token
    pub from: usize,
    /// Byte offset one past the last byte of the token
    pub to: usize,
}

impl Token {
    /// Create a new token spanning `from..to`.
    pub fn new<T: Into<Tag>>(tag: T, from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "token ends before it starts: {from}..{to}");
        Self {
            tag: tag.into(),
            from,
            to,
        }
    }

    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Returns true for zero-width tokens.
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// The byte range covered by the token.
    pub fn span(&self) -> Range<usize> {
        self.from..self.to
    }

    /// Returns true if this token was produced from unrecognized input.
    pub fn is_error(&self) -> bool {
        self.tag.is_error()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.tag, self.from, self.to)
    }
}
