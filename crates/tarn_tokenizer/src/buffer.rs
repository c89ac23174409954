//! The chunked token buffer.
//!
//! A [`TokenizerBuffer`] stores the token stream of one contiguous span of a
//! document as an ordered list of [`Chunk`]s. Appending fills the last chunk
//! until it reaches the configured capacity and then opens a new one
//! anchored at the lexer's current position and stack. Because every chunk
//! records where lexing may resume, an edit only requires finding the chunk
//! in front of it ([`TokenizerBuffer::search`]), cutting the buffer there
//! ([`TokenizerBuffer::split`]) and lexing again from that chunk's anchor.
//!
//! # Examples
//!
//! ```no_run
//! use tarn_tokenizer::{ModeStack, Side, Token, TokenizerBuffer, TokenizerContext};
//!
//! let mut buffer = TokenizerBuffer::new();
//! let context = TokenizerContext::new(0, ModeStack::new());
//! buffer.add(&context, [Token::new("keyword", 0, 3), Token::new("identifier", 4, 5)]);
//!
//! let hit = buffer.search(4, Side::Before, false).unwrap();
//! assert_eq!(hit.index, 0);
//! assert_eq!(buffer.compile().len(), 2);
//! ```

use log::{debug, trace};

use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::context::Context;
use crate::error::{BufferError, BufferResult};
use crate::token::Token;

/// Configuration for a tokenizer buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Maximum number of tokens per chunk
    pub chunk_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }
}

/// Which side of the searched position a search result must lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Whichever chunk the binary search lands on.
    #[default]
    Either,
    /// The chunk must start at or before the position.
    Before,
    /// The chunk must start at or after the position.
    After,
}

/// A chunk found by [`TokenizerBuffer::search`], with its index.
#[derive(Debug)]
pub struct SearchHit<'a, S> {
    /// Index of the chunk in the buffer
    pub index: usize,
    /// The chunk itself
    pub chunk: &'a Chunk<S>,
}

/// An ordered sequence of chunks covering one contiguous lexed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerBuffer<S> {
    chunks: Vec<Chunk<S>>,
    config: BufferConfig,
}

impl<S> Default for TokenizerBuffer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TokenizerBuffer<S> {
    /// Create an empty buffer with the default chunk size.
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Create an empty buffer with a custom configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            chunks: Vec::new(),
            config: BufferConfig {
                chunk_size: config.chunk_size.max(1),
            },
        }
    }

    /// The buffer's configuration.
    pub fn config(&self) -> BufferConfig {
        self.config
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the buffer holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of tokens across all chunks.
    pub fn token_count(&self) -> usize {
        self.chunks.iter().map(Chunk::size).sum()
    }

    /// Retrieves a chunk, or `None` if `index` is out of range.
    pub fn get(&self, index: usize) -> Option<&Chunk<S>> {
        self.chunks.get(index)
    }

    /// Retrieves a chunk mutably, or `None` if `index` is out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Chunk<S>> {
        self.chunks.get_mut(index)
    }

    /// The tail chunk, if any.
    pub fn last(&self) -> Option<&Chunk<S>> {
        self.chunks.last()
    }

    /// The chunks in document order.
    pub fn chunks(&self) -> &[Chunk<S>] {
        &self.chunks
    }

    /// Iterate the chunks in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk<S>> {
        self.chunks.iter()
    }

    /// Returns true if the next added token would open a new chunk.
    pub fn tail_is_full(&self) -> bool {
        self.chunks
            .last()
            .map_or(true, |chunk| chunk.size() >= self.config.chunk_size)
    }

    /// Every token in the buffer, in absolute coordinates and document order.
    pub fn compile(&self) -> Vec<Token> {
        let mut compiled = Vec::with_capacity(self.token_count());
        for chunk in &self.chunks {
            compiled.extend(chunk.tokens());
        }
        compiled
    }

    /// Appends tokens, opening a new chunk whenever the tail is full.
    ///
    /// The last chunk is filled up to the configured chunk size before a new
    /// one is opened. `context` is only read when a chunk is opened, and must
    /// then describe the position and stack right before the token being
    /// placed.
    pub fn add<C, I>(&mut self, context: &C, tokens: I)
    where
        C: Context<S> + ?Sized,
        I: IntoIterator<Item = Token>,
        S: Clone,
    {
        for token in tokens {
            if self.tail_is_full() {
                trace!("opening chunk {} at {}", self.chunks.len(), context.pos());
                self.chunks
                    .push(Chunk::new(context.pos(), context.stack().clone()));
            }

            if let Some(chunk) = self.chunks.last_mut() {
                chunk.add(token);
            }
        }
    }

    /// Splits the buffer after the chunk at `index`.
    ///
    /// `self` keeps chunks `0..=index` and the chunks after `index` are moved
    /// into the returned buffer. The chunk at `index` keeps its anchor but
    /// has its tokens cleared, since lexing will resume from it. A buffer
    /// with a single chunk is left untouched and the returned buffer is empty.
    ///
    /// Fails without modifying the buffer if `index` addresses no chunk.
    pub fn split(&mut self, index: usize) -> BufferResult<Self> {
        if index >= self.chunks.len() {
            return Err(BufferError::invalid_index(index, self.chunks.len()));
        }

        if self.chunks.len() <= 1 {
            debug!("split of single-chunk buffer is a no-op");
            return Ok(Self::with_config(self.config));
        }

        let right = self.chunks.split_off(index + 1);

        if let Some(boundary) = self.chunks.last_mut() {
            boundary.set_tokens(std::iter::empty());
        }

        debug!(
            "split buffer at chunk {}: {} chunks left, {} chunks right",
            index,
            self.chunks.len(),
            right.len()
        );

        Ok(Self {
            chunks: right,
            config: self.config,
        })
    }

    /// Searches for the chunk closest to `pos`.
    ///
    /// With [`Side::Before`] the result starts at or before `pos`, with
    /// [`Side::After`] at or after it. If `precise` is set, only a chunk
    /// starting exactly at `pos` is returned. Returns `None` when nothing
    /// qualifies, including for an empty buffer.
    pub fn search(&self, pos: usize, side: Side, precise: bool) -> Option<SearchHit<'_, S>> {
        let last = self.chunks.len().checked_sub(1)?;

        let mut index = match self.chunks.binary_search_by(|chunk| chunk.pos().cmp(&pos)) {
            Ok(index) => return Some(self.hit(index)),
            Err(_) if precise => return None,
            Err(insertion) => insertion.min(last),
        };

        // walk to the requested side
        match side {
            Side::Either => {}
            Side::Before => {
                while self.chunks[index].pos() > pos {
                    index = index.checked_sub(1)?;
                }
            }
            Side::After => {
                while self.chunks[index].pos() < pos {
                    index += 1;
                    if index > last {
                        return None;
                    }
                }
            }
        }

        Some(self.hit(index))
    }

    /// Moves every chunk anchor by `delta` bytes.
    pub fn shift(&mut self, delta: isize) {
        if delta == 0 {
            return;
        }
        for chunk in &mut self.chunks {
            chunk.shift(delta);
        }
    }

    /// Moves all chunks of `other` to the end of this buffer.
    ///
    /// `other` must start at or after the end of this buffer.
    pub fn append(&mut self, mut other: Self) {
        debug_assert!(
            match (self.chunks.last(), other.chunks.first()) {
                (Some(tail), Some(head)) => tail.pos() <= head.pos(),
                _ => true,
            },
            "appended chunks must not precede the buffer's tail"
        );
        self.chunks.append(&mut other.chunks);
    }

    /// Drops the leading chunks that start before `pos`.
    ///
    /// Returns the number of chunks dropped.
    pub fn discard_before(&mut self, pos: usize) -> usize {
        let count = self.chunks.partition_point(|chunk| chunk.pos() < pos);
        self.chunks.drain(..count);
        count
    }

    /// Removes every chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    fn hit(&self, index: usize) -> SearchHit<'_, S> {
        SearchHit {
            index,
            chunk: &self.chunks[index],
        }
    }
}

impl<'a, S> IntoIterator for &'a TokenizerBuffer<S> {
    type Item = &'a Chunk<S>;
    type IntoIter = std::slice::Iter<'a, Chunk<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
