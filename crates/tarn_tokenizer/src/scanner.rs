//! Driving a [`logos`] lexer into a [`TokenizerBuffer`].
//!
//! The [`Scanner`] is the glue between a grammar and the buffer: it feeds
//! every token the lexer produces into the buffer together with the
//! position and stack the lexer was in right before that token, and it
//! implements incremental re-lexing after an edit.
//!
//! A grammar is any `logos` token type whose `Extras` is the lexer stack
//! and which implements [`Highlight`]. Callbacks push and pop modes on the
//! extras, and the scanner snapshots them whenever a chunk is opened.
//!
//! # Examples
//!
//! ```no_run
//! use logos::Logos;
//! use tarn_tokenizer::{Edit, Highlight, ModeStack, Scanner, Tag, TokenizerBuffer, TokenizerContext};
//!
//! #[derive(Logos, Debug, Clone, PartialEq)]
//! #[logos(extras = ModeStack)]
//! #[logos(skip r"[ \t\n]+")]
//! enum Word {
//!     #[regex("[a-z]+")]
//!     Word,
//! }
//!
//! impl Highlight for Word {
//!     fn tag(&self) -> Option<Tag> {
//!         Some(Tag::new("word"))
//!     }
//! }
//!
//! let mut source = String::from("alpha beta gamma");
//! let mut buffer = TokenizerBuffer::new();
//! let scanner = Scanner::<Word>::new();
//! scanner.scan(&mut buffer, &source, &TokenizerContext::new(0, ModeStack::new())).unwrap();
//!
//! source.insert_str(6, "delta ");
//! scanner.rescan(&mut buffer, &source, Edit::insert(6, 6)).unwrap();
//! assert_eq!(buffer.token_count(), 4);
//! ```

use std::marker::PhantomData;

use log::{debug, trace};
use logos::Logos;

use crate::buffer::{Side, TokenizerBuffer};
use crate::context::{Context, SerializedTokenizerContext, TokenizerContext};
use crate::error::{BufferError, BufferResult};
use crate::token::{Tag, Token};

/// Maps a lexer token to the tag stored in the buffer.
pub trait Highlight {
    /// The tag for this token, or `None` to leave it out of the buffer.
    fn tag(&self) -> Option<Tag>;
}

/// Configuration for the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScannerConfig {
    /// Maximum number of tokens a single [`Scanner::scan`] pass adds, or
    /// `None` to lex to the end of the source
    pub max_tokens: Option<usize>,
}

/// One text replacement, described in post-edit document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Offset where the replacement starts
    pub from: usize,
    /// Number of bytes removed at `from`
    pub removed: usize,
    /// Number of bytes inserted at `from`
    pub inserted: usize,
}

impl Edit {
    /// A replacement of `removed` bytes at `from` with `inserted` new ones.
    pub fn replace(from: usize, removed: usize, inserted: usize) -> Self {
        Self {
            from,
            removed,
            inserted,
        }
    }

    /// An insertion of `len` bytes at `at`.
    pub fn insert(at: usize, len: usize) -> Self {
        Self::replace(at, 0, len)
    }

    /// A deletion of `len` bytes starting at `from`.
    pub fn delete(from: usize, len: usize) -> Self {
        Self::replace(from, len, 0)
    }

    /// Change of the document length.
    pub fn delta(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }

    /// End of the inserted text in the edited document.
    pub fn end(&self) -> usize {
        self.from + self.inserted
    }
}

/// What a scan pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned<S> {
    /// Number of tokens added to the buffer
    pub tokens: usize,
    /// Where to continue if the pass stopped at its token limit, `None` if
    /// it reached the end of the source or resynchronized with old chunks
    pub resume: Option<SerializedTokenizerContext<S>>,
    /// Number of chunks from before the edit that were kept after the
    /// re-lexed region
    pub reused: usize,
}

/// Feeds the tokens of the grammar `T` into tokenizer buffers.
#[derive(Debug)]
pub struct Scanner<T> {
    config: ScannerConfig,
    grammar: PhantomData<fn() -> T>,
}

impl<T> Default for Scanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scanner<T> {
    /// Create a scanner with default configuration
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            config,
            grammar: PhantomData,
        }
    }

    /// Lexes `source` starting at `context` and appends the tokens to `buffer`.
    pub fn scan<'s, S, C>(
        &self,
        buffer: &mut TokenizerBuffer<S>,
        source: &'s str,
        context: &C,
    ) -> BufferResult<Scanned<S>>
    where
        T: Logos<'s, Source = str, Extras = S> + Highlight,
        S: Clone,
        C: Context<S> + ?Sized,
    {
        let start = SerializedTokenizerContext::new(context.pos(), context.stack().clone());
        self.lex(buffer, source, start, self.config.max_tokens, |_| false)
    }

    /// Re-lexes `buffer` after `edit` has been applied to `source`.
    ///
    /// Lexing resumes from the chunk in front of the edit and stops as soon
    /// as it reaches a chunk from before the edit that starts at the same
    /// position with the same stack; everything from there on is reused.
    /// A buffer with a single chunk is lexed again from that chunk's anchor;
    /// an empty buffer, or an edit in front of the first chunk, restarts at
    /// offset 0 with the default stack.
    pub fn rescan<'s, S>(
        &self,
        buffer: &mut TokenizerBuffer<S>,
        source: &'s str,
        edit: Edit,
    ) -> BufferResult<Scanned<S>>
    where
        T: Logos<'s, Source = str, Extras = S> + Highlight,
        S: Clone + Default + PartialEq,
    {
        let found = buffer.search(edit.from, Side::Before, false).map(|hit| hit.index);
        let boundary = match found {
            Some(index) if buffer.len() > 1 => index.saturating_sub(1),
            Some(_) => return self.restart_single(buffer, source, edit),
            None => {
                debug!("rescanning whole document after edit at {}", edit.from);
                buffer.clear();
                let start = SerializedTokenizerContext::new(0, S::default());
                return self.lex(buffer, source, start, None, |_| false);
            }
        };

        let start = match buffer.get(boundary) {
            Some(chunk) => chunk.context(),
            None => return Err(BufferError::invalid_index(boundary, buffer.len())),
        };
        if source.get(start.pos..).is_none() {
            return Err(BufferError::invalid_position(start.pos, source.len()));
        }

        let mut right = buffer.split(boundary)?;
        right.shift(edit.delta());
        let stale = right.discard_before(edit.end());
        debug!(
            "rescanning from {} after edit at {}, {} stale chunks dropped, {} candidates kept",
            start.pos,
            edit.from,
            stale,
            right.len()
        );

        let mut resynced = false;
        let mut scanned = self.lex(buffer, source, start, None, |context| {
            right.discard_before(context.pos());
            resynced = right.get(0).is_some_and(|chunk| {
                chunk.pos() == context.pos() && chunk.stack() == context.stack()
            });
            resynced
        })?;

        if resynced {
            trace!("resynchronized with {} old chunks", right.len());
            scanned.reused = right.len();
            buffer.append(right);
        }
        Ok(scanned)
    }

    /// Re-lexes a single-chunk buffer from its own anchor, so a buffer
    /// covering a sub-span keeps its start and stack.
    fn restart_single<'s, S>(
        &self,
        buffer: &mut TokenizerBuffer<S>,
        source: &'s str,
        edit: Edit,
    ) -> BufferResult<Scanned<S>>
    where
        T: Logos<'s, Source = str, Extras = S> + Highlight,
        S: Clone,
    {
        let Some(chunk) = buffer.get_mut(0) else {
            return Err(BufferError::invalid_index(0, 0));
        };
        let start = chunk.context();
        if source.get(start.pos..).is_none() {
            return Err(BufferError::invalid_position(start.pos, source.len()));
        }

        debug!("rescanning single chunk from {} after edit at {}", start.pos, edit.from);
        chunk.set_tokens(std::iter::empty());
        self.lex(buffer, source, start, None, |_| false)
    }

    /// Runs the lexer from `start`, adding tokens until the source ends,
    /// `limit` tokens were added, or `stop` returns true at a chunk boundary.
    fn lex<'s, S, F>(
        &self,
        buffer: &mut TokenizerBuffer<S>,
        source: &'s str,
        start: SerializedTokenizerContext<S>,
        limit: Option<usize>,
        mut stop: F,
    ) -> BufferResult<Scanned<S>>
    where
        T: Logos<'s, Source = str, Extras = S> + Highlight,
        S: Clone,
        F: FnMut(&TokenizerContext<S>) -> bool,
    {
        let offset = start.pos;
        let text = source
            .get(offset..)
            .ok_or_else(|| BufferError::invalid_position(offset, source.len()))?;

        let mut lexer = T::lexer_with_extras(text, start.stack);
        let mut context = TokenizerContext::new(offset, lexer.extras.clone());
        let mut added = 0;

        loop {
            if limit.is_some_and(|limit| added >= limit) {
                let resume =
                    SerializedTokenizerContext::new(offset + lexer.span().end, lexer.extras.clone());
                return Ok(Scanned {
                    tokens: added,
                    resume: Some(resume),
                    reused: 0,
                });
            }

            let before = lexer.extras.clone();
            let Some(result) = lexer.next() else {
                break;
            };
            let span = lexer.span();

            let tag = match result {
                Ok(token) => match token.tag() {
                    Some(tag) => tag,
                    None => continue,
                },
                Err(_) => Tag::error(),
            };

            context.advance_to(offset + span.start);
            context.replace_stack(before);

            if buffer.tail_is_full() && stop(&context) {
                trace!("stopping at chunk boundary {}", context.pos());
                break;
            }

            buffer.add(&context, [Token::new(tag, offset + span.start, offset + span.end)]);
            added += 1;
        }

        Ok(Scanned {
            tokens: added,
            resume: None,
            reused: 0,
        })
    }
}
