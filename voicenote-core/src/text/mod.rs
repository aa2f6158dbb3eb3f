pub mod chunker;

pub use chunker::{chunk_text, split_sentences, DEFAULT_CHUNK_SIZE};
