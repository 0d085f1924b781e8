//! Error taxonomy for the narration pipeline.
//!
//! Callers pattern-match on the variant kind; human-readable messages are for
//! display only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrateError {
    #[error("no text could be extracted from the selected pages")]
    EmptyText,

    #[error("invalid page range: {start}-{end} (pages are 1-based and start must not exceed end)")]
    InvalidPageRange { start: u32, end: u32 },

    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("voice reference not found: {0}")]
    VoiceNotFound(String),

    #[error("TTS engine error: {0}")]
    Engine(String),

    #[error("chunk synthesis timed out after {0}s")]
    ChunkTimeout(u64),

    #[error("generation produced no audio")]
    NoAudioGenerated,

    #[error("compressed encoding failed: {0}")]
    Encoding(String),

    #[error("audio has {0} channels; only mono output is supported")]
    MultiChannel(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),

    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, NarrateError>;
