//! Error types for buffer and scanner operations.
//!
//! Lookups (`get`, `search`) report absence with `Option` and never fail;
//! only operations that would otherwise leave a buffer in an inconsistent
//! state return a [`BufferError`].

/// The result type for fallible buffer operations.
pub type BufferResult<T = ()> = Result<T, BufferError>;

/// An error raised by a [`TokenizerBuffer`](crate::TokenizerBuffer) or a
/// [`Scanner`](crate::Scanner). The buffer is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A split was requested at an index that addresses no chunk.
    #[error("chunk index {index} is out of range for a buffer of {len} chunks")]
    InvalidIndex {
        /// The requested chunk index.
        index: usize,
        /// The number of chunks in the buffer.
        len: usize,
    },

    /// Lexing was asked to resume at an offset outside the source text, or
    /// inside a multi-byte character.
    #[error("cannot resume lexing at offset {pos} (source is {len} bytes)")]
    InvalidPosition {
        /// The requested byte offset.
        pos: usize,
        /// The source length in bytes.
        len: usize,
    },
}

impl BufferError {
    /// Creates an invalid index error.
    pub fn invalid_index(index: usize, len: usize) -> Self {
        BufferError::InvalidIndex { index, len }
    }

    /// Creates an invalid position error.
    pub fn invalid_position(pos: usize, len: usize) -> Self {
        BufferError::InvalidPosition { pos, len }
    }
}
