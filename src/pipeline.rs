//! The narration pipeline: voice resolution, chunking, per-chunk synthesis,
//! assembly, and artifact writing.
//!
//! Chunks are processed strictly in order, one synthesis call at a time;
//! inference is GPU-bound and the engine serializes calls internally anyway.
//! Individual chunk failures are absorbed here (skip and continue); the batch
//! as a whole fails only when no chunk produced audio.

use crate::audio::{Waveform, assembler, writer};
use crate::audio::writer::OutputArtifacts;
use crate::config::NarrateConfig;
use crate::error::{NarrateError, Result};
use crate::extract::PageRange;
use crate::text::{self, TextChunk};
use crate::tts::TtsEngine;
use crate::voice::{self, VoiceReference};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One narration request.
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    /// Book title used in artifact names
    pub book_name: String,
    /// Page range the text was extracted from
    pub pages: PageRange,
    /// Requested voice, as a clip name or path
    pub voice_option: String,
}

/// Result of a completed narration request.
#[derive(Debug, Clone)]
pub struct NarrationOutput {
    pub artifacts: OutputArtifacts,
    /// Wall-clock time spent in the generation loop
    pub elapsed: Duration,
    pub chunks_total: usize,
    /// Chunks skipped after exhausting retries
    pub chunks_failed: usize,
}

pub struct Narrator {
    engine: Arc<dyn TtsEngine>,
    config: NarrateConfig,
}

impl Narrator {
    pub fn new(engine: Arc<dyn TtsEngine>, config: NarrateConfig) -> Self {
        if engine.sample_rate() != config.sample_rate {
            warn!(
                engine = engine.sample_rate(),
                configured = config.sample_rate,
                "engine sample rate differs from configured rate; using configured"
            );
        }
        Self { engine, config }
    }

    /// Run the full pipeline for already-extracted text.
    ///
    /// `on_progress` is called with (completed, total) after each chunk.
    pub async fn narrate<F>(
        &self,
        text: &str,
        request: &NarrationRequest,
        on_progress: F,
    ) -> Result<NarrationOutput>
    where
        F: FnMut(usize, usize),
    {
        // Resolve the reference voice once for the whole request
        let voice = if self.config.strict_voice {
            voice::resolve_strict(&request.voice_option, &self.config.voices_dir)?
        } else {
            voice::resolve(&request.voice_option, &self.config.voices_dir)
        };
        match voice.clip_path() {
            Some(clip) => info!(clip = %clip.display(), "using reference voice"),
            None => info!("no reference clip resolved; synthesizing with default voice"),
        }

        let chunks = text::prepare_chunks(text, self.config.max_chunk_len);
        if chunks.is_empty() {
            return Err(NarrateError::EmptyText);
        }
        info!(chunks = chunks.len(), "prepared text chunks");

        let (segments, elapsed, failed) =
            self.generate_segments(&chunks, &voice, on_progress).await?;

        let samples = assembler::assemble(&segments)?;

        let artifacts = writer::write_artifacts(
            &samples,
            self.config.sample_rate,
            &self.config.output_dir,
            &request.book_name,
            &request.pages,
            &voice::sanitized_name(&request.voice_option),
            self.config.mp3_bitrate_kbps,
        )?;

        Ok(NarrationOutput {
            artifacts,
            elapsed,
            chunks_total: chunks.len(),
            chunks_failed: failed,
        })
    }

    /// Generate waveform segments for all chunks, in order.
    ///
    /// After each successful chunk a fixed silence gap is appended, including
    /// after the last one. A chunk that produces nothing after retries is
    /// skipped. Returns the segments, the wall-clock duration of the whole
    /// loop, and the number of skipped chunks. Fails only when every chunk
    /// was skipped.
    pub async fn generate_segments<F>(
        &self,
        chunks: &[TextChunk],
        voice: &VoiceReference,
        mut on_progress: F,
    ) -> Result<(Vec<Waveform>, Duration, usize)>
    where
        F: FnMut(usize, usize),
    {
        let start = Instant::now();
        let silence = Waveform::silence(self.config.silence_secs, self.config.sample_rate);
        let total = chunks.len();

        let mut segments = Vec::new();
        let mut failed = 0usize;

        for (i, chunk) in chunks.iter().enumerate() {
            match self.synthesize_chunk(chunk, voice).await {
                Some(waveform) => {
                    segments.push(waveform);
                    segments.push(silence.clone());
                }
                None => {
                    warn!(chunk = chunk.index, "chunk produced no audio, skipping");
                    failed += 1;
                }
            }
            on_progress(i + 1, total);
        }

        if segments.is_empty() {
            return Err(NarrateError::NoAudioGenerated);
        }

        Ok((segments, start.elapsed(), failed))
    }

    /// Synthesize one chunk with a per-attempt timeout and bounded retries.
    ///
    /// Returns `None` when every attempt failed or came back empty.
    async fn synthesize_chunk(&self, chunk: &TextChunk, voice: &VoiceReference) -> Option<Waveform> {
        let attempts = 1 + self.config.chunk_retries;
        let timeout = Duration::from_secs(self.config.chunk_timeout_secs);

        for attempt in 1..=attempts {
            let outcome = tokio::time::timeout(timeout, self.engine.synthesize(&chunk.text, voice))
                .await
                .map_err(|_| NarrateError::ChunkTimeout(self.config.chunk_timeout_secs))
                .and_then(|r| r);

            match outcome {
                Ok(Some(waveform)) => return Some(waveform),
                Ok(None) => {
                    warn!(
                        chunk = chunk.index,
                        attempt, attempts, "engine returned no audio"
                    );
                }
                Err(e) => {
                    warn!(chunk = chunk.index, attempt, attempts, "synthesis failed: {e}");
                }
            }
        }

        None
    }
}
