//! Incremental tokenization buffer for editor syntax highlighting.
//!
//! This crate stores the output of a lexer over a live document in
//! fixed-size chunks, each tagged with the lexer state valid at its start,
//! so that after an edit only the region around the edit has to be lexed
//! again.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod chunk;
pub mod context;
pub mod error;
pub mod scanner;
pub mod stack;
pub mod string_interner;
pub mod token;

// Re-export the main types for convenience
pub use buffer::{BufferConfig, SearchHit, Side, TokenizerBuffer};
pub use chunk::{Chunk, CHUNK_SIZE};
pub use context::{Context, SerializedTokenizerContext, TokenizerContext};
pub use error::{BufferError, BufferResult};
pub use scanner::{Edit, Highlight, Scanned, Scanner, ScannerConfig};
pub use stack::ModeStack;
pub use string_interner::InternedString;
pub use token::{Tag, Token};
