//! Immutable lexer mode stacks.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::Tag;

/// An immutable stack of nested lexer modes.
///
/// Every chunk stores a snapshot of the lexer state it started in, so the
/// stack is a value: `push` and `pop` return a new stack and leave the
/// receiver untouched. Snapshots held by older chunks can never be changed
/// by a later lexing pass.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ModeStack(Arc<[Tag]>);

impl ModeStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new stack with `mode` on top.
    pub fn push<T: Into<Tag>>(&self, mode: T) -> Self {
        let mut modes = Vec::with_capacity(self.0.len() + 1);
        modes.extend_from_slice(&self.0);
        modes.push(mode.into());
        ModeStack(modes.into())
    }

    /// Returns a new stack without the top mode. Popping an empty stack
    /// yields an empty stack.
    pub fn pop(&self) -> Self {
        match self.0.split_last() {
            Some((_, rest)) => ModeStack(rest.into()),
            None => self.clone(),
        }
    }

    /// The innermost mode, if any.
    pub fn top(&self) -> Option<&Tag> {
        self.0.last()
    }

    /// Number of nested modes.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no mode is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the modes from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl fmt::Debug for ModeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(Tag::as_str)).finish()
    }
}
