//! Sentence-aligned text chunking for document mode.
//!
//! The synthesis endpoint accepts a bounded amount of text per request, so
//! documents are cut into chunks made of whole sentences. A sentence is never
//! split; one that is longer than the budget on its own becomes an
//! over-budget chunk.

/// Maximum characters per synthesis request in document mode.
pub const DEFAULT_CHUNK_SIZE: usize = 400;

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Collapse whitespace and split into sentences. Boundaries are a terminator
/// followed by a space. Every returned sentence ends with a terminator; one
/// is appended (`.`) when the source fragment had none.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut fragments = Vec::new();
    let mut start = 0;
    let mut chars = normalized.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !TERMINATORS.contains(&c) {
            continue;
        }
        if let Some(&(next, ' ')) = chars.peek() {
            fragments.push(&normalized[start..next]);
            start = next + 1;
        }
    }
    if start < normalized.len() {
        fragments.push(&normalized[start..]);
    }

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with(TERMINATORS) {
                s.to_string()
            } else {
                format!("{s}.")
            }
        })
        .collect()
}

/// Greedily pack sentences into chunks whose joined length (in characters)
/// stays within `budget`. Returns an empty vector for blank input; no
/// returned chunk is ever empty.
pub fn chunk_text(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if current.is_empty() {
            current = sentence;
            current_len = sentence_len;
            continue;
        }

        if current_len + 1 + sentence_len > budget {
            chunks.push(std::mem::take(&mut current));
            current = sentence;
            current_len = sentence_len;
        } else {
            current.push(' ');
            current.push_str(&sentence);
            current_len += 1 + sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
