use pretty_assertions::assert_eq;
use tarn_tokenizer::{
    BufferError, Chunk, SerializedTokenizerContext, Side, Token, TokenizerBuffer, CHUNK_SIZE,
};

/// Stack stand-in: the buffer never looks inside it.
type Depth = u32;

/// Appends `count` tokens of width 2 with a gap of 1, starting at `start`,
/// reporting each token's own position as the context.
fn feed(buffer: &mut TokenizerBuffer<Depth>, start: usize, count: usize) -> usize {
    let mut pos = start;
    for i in 0..count {
        let context = SerializedTokenizerContext::new(pos, (i % 4) as Depth);
        buffer.add(&context, [Token::new("identifier", pos, pos + 2)]);
        pos += 3;
    }
    pos
}

/// A buffer whose chunks are anchored exactly at the given offsets.
fn anchored(anchors: &[usize]) -> TokenizerBuffer<Depth> {
    let mut buffer = TokenizerBuffer::new();
    for &anchor in anchors {
        let context = SerializedTokenizerContext::new(anchor, 0);
        buffer.add(
            &context,
            (0..CHUNK_SIZE).map(|i| Token::new("t", anchor + i, anchor + i + 1)),
        );
    }
    buffer
}

#[test]
fn test_chunking_invariant() {
    let mut buffer = TokenizerBuffer::new();
    feed(&mut buffer, 0, 100);

    let compiled = buffer.compile();
    assert_eq!(compiled.len(), 100);
    assert!(compiled.windows(2).all(|pair| pair[0].to <= pair[1].from));

    let sizes: Vec<usize> = buffer.iter().map(Chunk::size).collect();
    assert_eq!(sizes, vec![CHUNK_SIZE, CHUNK_SIZE, CHUNK_SIZE, 4]);
}

#[test]
fn test_position_monotonicity() {
    let mut buffer = TokenizerBuffer::new();
    feed(&mut buffer, 5, 200);

    let anchors: Vec<usize> = buffer.iter().map(Chunk::pos).collect();
    assert!(anchors.windows(2).all(|pair| pair[0] < pair[1]));

    // Each chunk is anchored at its own first token
    for chunk in &buffer {
        assert_eq!(chunk.compile().first().map(|token| token.from), Some(chunk.pos()));
    }
}

#[test]
fn test_chunk_anchor_stack_comes_from_context() {
    let mut buffer = TokenizerBuffer::new();
    feed(&mut buffer, 0, CHUNK_SIZE + 1);

    // Token 32 was added with stack 32 % 4
    assert_eq!(buffer.get(1).map(|chunk| *chunk.stack()), Some(0));
    assert_eq!(
        buffer.get(1).map(Chunk::context),
        Some(SerializedTokenizerContext::new(96, 0))
    );
}

#[test]
fn test_split_excludes_boundary_tokens() {
    let mut buffer = anchored(&[0, 32, 64, 96]);
    let original = buffer.compile();
    let right = buffer.split(2).unwrap();

    let left = buffer.compile();
    assert_eq!(left, original[..2 * CHUNK_SIZE].to_vec());
    assert!(left.iter().all(|token| token.to <= 64));

    assert_eq!(right.compile(), original[3 * CHUNK_SIZE..].to_vec());
    assert_eq!(buffer.last().map(Chunk::pos), Some(64));
}

#[test]
fn test_split_moves_right_chunks() {
    let mut buffer = anchored(&[0, 32, 64, 96]);
    let mut right = buffer.split(0).unwrap();

    // Mutating one half leaves the other untouched
    feed(&mut buffer, 1, 3);
    right.shift(1000);

    assert_eq!(buffer.iter().map(Chunk::pos).collect::<Vec<_>>(), vec![0]);
    assert_eq!(
        right.iter().map(Chunk::pos).collect::<Vec<_>>(),
        vec![1032, 1064, 1096]
    );
    assert_eq!(buffer.token_count(), 3);
}

#[test]
fn test_degenerate_split() {
    let mut buffer = anchored(&[0]);
    let right = buffer.split(0).unwrap();

    assert!(right.is_empty());
    assert_eq!(buffer.token_count(), CHUNK_SIZE);
}

#[test]
fn test_invalid_split() {
    let mut buffer = anchored(&[0, 32, 64, 96]);

    match buffer.split(99) {
        Err(BufferError::InvalidIndex { index, len }) => {
            assert_eq!(index, 99);
            assert_eq!(len, 4);
        }
        other => panic!("expected InvalidIndex, got {:?}", other.map(|right| right.len())),
    }
    assert_eq!(buffer.len(), 4);
}

#[test]
fn test_search_examples() {
    let buffer = anchored(&[0, 32, 64, 96]);

    let floor = buffer.search(50, Side::Before, false).unwrap();
    assert_eq!(floor.chunk.pos(), 32);

    let ceiling = buffer.search(50, Side::After, false).unwrap();
    assert_eq!(ceiling.chunk.pos(), 64);

    let exact = buffer.search(32, Side::Either, true).unwrap();
    assert_eq!((exact.chunk.pos(), exact.index), (32, 1));

    assert!(buffer.search(33, Side::Either, true).is_none());
}

#[test]
fn test_empty_buffer() {
    let buffer: TokenizerBuffer<Depth> = TokenizerBuffer::new();

    assert!(buffer.search(10, Side::Either, false).is_none());
    assert!(buffer.search(10, Side::Before, true).is_none());
    assert!(buffer.compile().is_empty());
    assert!(buffer.get(0).is_none());
}

#[test]
fn test_refill_after_split_resumes_at_anchor() {
    let mut buffer = anchored(&[0, 32, 64]);
    let _right = buffer.split(1).unwrap();

    let resume = buffer.last().map(Chunk::context).unwrap();
    buffer.add(&resume, [Token::new("keyword", 32, 36)]);

    // The cleared boundary chunk takes the new token instead of a new chunk
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.last().map(Chunk::compile), Some(vec![Token::new("keyword", 32, 36)]));
}

#[cfg(feature = "serde")]
#[test]
fn test_compiled_tokens_serialize() {
    let buffer = anchored(&[0]);
    let compiled = buffer.compile();
    let json = serde_json::to_string(&compiled[..1]).unwrap();

    assert_eq!(json, r#"[{"tag":"t","from":0,"to":1}]"#);
    let restored: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, compiled[..1].to_vec());
}
