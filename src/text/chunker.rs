//! Sentence-boundary text chunking for TTS processing.

/// Split text into chunks no longer than `max_len` characters, breaking at
/// sentence boundaries. Lengths are counted in characters, not bytes, so
/// multi-byte text is not cut short.
///
/// Sentences are accumulated into a buffer; the buffer is flushed whenever
/// appending the next sentence would make it reach or exceed `max_len`. A
/// sentence that is itself longer than `max_len` is never merged: any pending
/// buffer is flushed first and the oversized sentence is emitted whole as its
/// own chunk.
///
/// Guarantees: chunk order equals text order, no chunk is empty, and every
/// non-whitespace character of the input appears in exactly one chunk. Empty
/// or whitespace-only input yields no chunks.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();

        if sentence_chars > max_len {
            // Oversized atomic sentence: flush pending buffer, emit standalone
            if !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
                buffer_chars = 0;
            }
            chunks.push(sentence);
            continue;
        }

        if !buffer.is_empty() && buffer_chars + 1 + sentence_chars >= max_len {
            chunks.push(std::mem::take(&mut buffer));
            buffer_chars = 0;
        }

        if buffer.is_empty() {
            buffer = sentence;
            buffer_chars = sentence_chars;
        } else {
            buffer.push(' ');
            buffer.push_str(&sentence);
            buffer_chars += 1 + sentence_chars;
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// Split text into sentence-like units.
///
/// A unit ends after a run of sentence-terminal punctuation (`.`, `!`, `?`)
/// that is followed by whitespace. Units are trimmed; empty units are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if after_terminal && c.is_whitespace() {
            let unit = text[start..i].trim();
            if !unit.is_empty() {
                sentences.push(unit.to_string());
            }
            start = i;
        }
        after_terminal = matches!(c, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}
