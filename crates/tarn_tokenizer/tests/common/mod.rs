//! A small parenthesized grammar shared by the integration tests.
//!
//! Every `(` pushes a mode on the lexer stack and every `)` pops one, so two
//! positions only share a stack when they sit at the same nesting depth.

#![allow(dead_code)]

use logos::{Lexer, Logos};
use tarn_tokenizer::{
    BufferConfig, Edit, Highlight, ModeStack, Scanner, Tag, TokenizerBuffer, TokenizerContext,
};

fn open(lex: &mut Lexer<Lisp>) {
    lex.extras = lex.extras.push("list");
}

fn close(lex: &mut Lexer<Lisp>) {
    lex.extras = lex.extras.pop();
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = ModeStack)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Lisp {
    #[token("(", open)]
    Open,
    #[token(")", close)]
    Close,
    #[token("define")]
    Define,
    #[regex("[a-z][a-z0-9-]*")]
    Symbol,
    #[regex("[0-9]+")]
    Number,
    #[regex(";[^\n]*")]
    Comment,
}

impl Highlight for Lisp {
    fn tag(&self) -> Option<Tag> {
        let name = match self {
            Lisp::Open | Lisp::Close => "bracket",
            Lisp::Define => "keyword",
            Lisp::Symbol => "variable",
            Lisp::Number => "number",
            Lisp::Comment => return None,
        };
        Some(Tag::new(name))
    }
}

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

/// `lines` top-level definitions, five tokens each.
pub fn program(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("(define v{} {})\n", i, i * 7))
        .collect()
}

/// Lexes `source` from scratch.
pub fn fresh(source: &str, chunk_size: usize) -> TokenizerBuffer<ModeStack> {
    let mut buffer = TokenizerBuffer::with_config(BufferConfig { chunk_size });
    Scanner::<Lisp>::new()
        .scan(&mut buffer, source, &TokenizerContext::new(0, ModeStack::new()))
        .expect("offset 0 is always valid");
    buffer
}

/// Replaces `removed` bytes at `from` with `text`, returning the edit.
pub fn apply(source: &mut String, from: usize, removed: usize, text: &str) -> Edit {
    source.replace_range(from..from + removed, text);
    Edit::replace(from, removed, text.len())
}
