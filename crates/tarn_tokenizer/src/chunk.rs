//! Fixed-capacity token buckets.
//!
//! A [`Chunk`] holds a run of consecutive tokens together with the lexer
//! state that was valid right before the first of them. Tokens are stored
//! relative to the chunk's anchor, so moving a chunk (after an edit shifted
//! the text behind it) only touches the anchor.

use crate::context::SerializedTokenizerContext;
use crate::token::{Tag, Token};

/// Default number of tokens per chunk.
pub const CHUNK_SIZE: usize = 32;

/// A token stored relative to its chunk's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredToken {
    tag: Tag,
    /// Signed distance from the chunk's `pos` to the token start
    offset: isize,
    len: usize,
}

/// A bucket of tokens anchored at a document offset and a lexer stack.
///
/// The anchor is always valid. The token list is independent of it and may
/// be empty, either because the chunk was just opened or because a split
/// cleared it; lexing can resume from the anchor in both cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<S> {
    pos: usize,
    stack: S,
    tokens: Vec<StoredToken>,
}

impl<S> Chunk<S> {
    /// Creates an empty chunk anchored at `pos` with the given stack.
    pub fn new(pos: usize, stack: S) -> Self {
        Self {
            pos,
            stack,
            tokens: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Document offset of the chunk's first token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Lexer stack valid immediately before the chunk's first token.
    pub fn stack(&self) -> &S {
        &self.stack
    }

    /// Number of tokens currently stored.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the chunk holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Absolute end offset of the last token, or `pos` for an empty chunk.
    pub fn end(&self) -> usize {
        self.tokens
            .last()
            .map_or(self.pos, |token| self.absolute(token.offset) + token.len)
    }

    /// Appends one token.
    ///
    /// The chunk does not enforce a capacity; the owning buffer only routes
    /// tokens to chunks with room left. Positions are not validated: a token
    /// starting before [`Chunk::pos`] compiles back to where it was.
    pub fn add(&mut self, token: Token) {
        self.tokens.push(self.relative(token));
    }

    /// Replaces the stored tokens wholesale, keeping the anchor.
    pub fn set_tokens<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Token>,
    {
        let stored = tokens.into_iter().map(|token| self.relative(token)).collect();
        self.tokens = stored;
    }

    /// Iterates the tokens in absolute document coordinates.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().map(move |token| {
            let from = self.absolute(token.offset);
            Token::new(token.tag.clone(), from, from + token.len)
        })
    }

    /// Returns the tokens in absolute document coordinates.
    pub fn compile(&self) -> Vec<Token> {
        self.tokens().collect()
    }

    /// Moves the anchor by `delta` bytes. Stored tokens move with it.
    pub fn shift(&mut self, delta: isize) {
        self.pos = self.pos.saturating_add_signed(delta);
    }

    fn absolute(&self, offset: isize) -> usize {
        self.pos.saturating_add_signed(offset)
    }

    fn relative(&self, token: Token) -> StoredToken {
        StoredToken {
            offset: (token.from as isize).wrapping_sub(self.pos as isize),
            len: token.len(),
            tag: token.tag,
        }
    }
}

impl<S: Clone> Chunk<S> {
    /// The chunk's anchor as a detached context to resume lexing from.
    pub fn context(&self) -> SerializedTokenizerContext<S> {
        SerializedTokenizerContext::new(self.pos, self.stack.clone())
    }
}
