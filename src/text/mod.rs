//! Text processing for TTS: normalization and chunking.

pub mod chunker;
pub mod cleaner;

/// A chunk of text ready for TTS synthesis.
///
/// Sequence position determines concatenation order and silence placement
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Index within the request
    pub index: usize,
    /// The text content, never empty
    pub text: String,
}

impl TextChunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }
}

/// Normalize extracted text and split it into TTS-ready chunks.
pub fn prepare_chunks(text: &str, max_len: usize) -> Vec<TextChunk> {
    let cleaned = cleaner::normalize_extracted(text);
    chunker::split_text(&cleaned, max_len)
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk::new(index, text))
        .collect()
}
