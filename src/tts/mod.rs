//! TTS engine trait and construction.

pub mod chatterbox;

#[cfg(test)]
pub mod mock;

use crate::audio::Waveform;
use crate::error::Result;
use crate::voice::VoiceReference;
use async_trait::async_trait;
use std::sync::Arc;

/// The external text-to-speech capability.
///
/// `Ok(None)` models the engine producing nothing for a chunk; `Err` models a
/// thrown failure. The generation loop treats both as per-chunk recoverable.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Synthesize one chunk of text, optionally conditioned on a reference
    /// voice clip.
    async fn synthesize(&self, text: &str, voice: &VoiceReference) -> Result<Option<Waveform>>;

    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32;
}

/// Create the Chatterbox engine.
///
/// # Arguments
/// * `device` - "cuda", "cpu", or None for auto-detect
pub fn create_engine(device: Option<&str>) -> Result<Arc<dyn TtsEngine>> {
    Ok(Arc::new(chatterbox::ChatterboxEngine::new(device)?))
}
