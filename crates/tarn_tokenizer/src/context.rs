//! Lexer resumption state.
//!
//! A context pairs a document offset with the lexer's stack at that
//! offset. The buffer reads one whenever it opens a new chunk, and hands
//! one back (via [`Chunk::context`](crate::Chunk::context)) when lexing has
//! to restart in the middle of a document.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anything that can anchor a new chunk.
pub trait Context<S> {
    /// The current scan position.
    fn pos(&self) -> usize;

    /// The lexer stack valid at [`Context::pos`].
    fn stack(&self) -> &S;
}

/// The live context carried by a lexer while it scans forward.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizerContext<S> {
    pos: usize,
    stack: S,
}

impl<S> TokenizerContext<S> {
    /// Create a context at `pos` with the given stack.
    pub fn new(pos: usize, stack: S) -> Self {
        Self { pos, stack }
    }

    /// Moves the scan position.
    pub fn advance_to(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Replaces the stack, returning the previous one.
    pub fn replace_stack(&mut self, stack: S) -> S {
        std::mem::replace(&mut self.stack, stack)
    }

    /// Consumes the context and returns its stack.
    pub fn into_stack(self) -> S {
        self.stack
    }
}

impl<S: Clone> TokenizerContext<S> {
    /// Snapshot the context as a plain value.
    pub fn serialize(&self) -> SerializedTokenizerContext<S> {
        SerializedTokenizerContext {
            pos: self.pos,
            stack: self.stack.clone(),
        }
    }
}

impl<S> Context<S> for TokenizerContext<S> {
    fn pos(&self) -> usize {
        self.pos
    }

    fn stack(&self) -> &S {
        &self.stack
    }
}

/// A context detached from any running lexer: a position and a stack
/// snapshot, suitable for persisting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerializedTokenizerContext<S> {
    /// Document offset
    pub pos: usize,
    /// Lexer stack at `pos`
    pub stack: S,
}

impl<S> SerializedTokenizerContext<S> {
    /// Create a new serialized context.
    pub fn new(pos: usize, stack: S) -> Self {
        Self { pos, stack }
    }
}

impl<S> Context<S> for SerializedTokenizerContext<S> {
    fn pos(&self) -> usize {
        self.pos
    }

    fn stack(&self) -> &S {
        &self.stack
    }
}

impl<S> From<SerializedTokenizerContext<S>> for TokenizerContext<S> {
    fn from(context: SerializedTokenizerContext<S>) -> Self {
        TokenizerContext::new(context.pos, context.stack)
    }
}

impl<S: Clone> From<&TokenizerContext<S>> for SerializedTokenizerContext<S> {
    fn from(context: &TokenizerContext<S>) -> Self {
        context.serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModeStack;

    #[test]
    fn test_live_context_round_trip() {
        let mut live = TokenizerContext::new(0, ModeStack::new());
        live.advance_to(12);
        let previous = live.replace_stack(ModeStack::new().push("comment"));
        assert!(previous.is_empty());

        let snapshot = live.serialize();
        assert_eq!(snapshot.pos, 12);
        assert_eq!(snapshot.stack.depth(), 1);

        let restored = TokenizerContext::from(snapshot);
        assert_eq!(restored, live);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_context_json() {
        let context = SerializedTokenizerContext::new(40, ModeStack::new().push("string"));
        let json = serde_json::to_string(&context).unwrap();
        assert_eq!(json, r#"{"pos":40,"stack":["string"]}"#);

        let restored: SerializedTokenizerContext<ModeStack> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, context);
    }
}
