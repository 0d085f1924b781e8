//! Configurable mock TTS engine for tests.

use super::TtsEngine;
use crate::audio::Waveform;
use crate::error::{NarrateError, Result};
use crate::voice::VoiceReference;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A mock engine with scriptable per-call behavior.
pub struct MockEngine {
    /// Samples returned on success
    samples: Vec<f32>,
    /// Sample rate reported to the pipeline
    sample_rate: u32,
    /// 0-based call indices that return `Ok(None)`
    null_calls: HashSet<usize>,
    /// 0-based call indices that return an engine error
    fail_calls: HashSet<usize>,
    /// When true every call returns `Ok(None)`
    always_null: bool,
    /// Sleep applied before responding, when set
    delay: Option<Duration>,
    /// 0-based call indices the delay applies to; empty means every call
    delay_calls: HashSet<usize>,
    /// Number of synthesize calls made so far
    call_count: AtomicUsize,
    /// Voice references observed per call
    seen_voices: Mutex<Vec<VoiceReference>>,
}

impl MockEngine {
    /// An engine that always succeeds with the given samples.
    pub fn succeeds_with(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            null_calls: HashSet::new(),
            fail_calls: HashSet::new(),
            always_null: false,
            delay: None,
            delay_calls: HashSet::new(),
            call_count: AtomicUsize::new(0),
            seen_voices: Mutex::new(Vec::new()),
        }
    }

    /// An engine that returns `Ok(None)` for every call.
    pub fn always_null(sample_rate: u32) -> Self {
        Self {
            always_null: true,
            ..Self::succeeds_with(Vec::new(), sample_rate)
        }
    }

    /// Make the given 0-based call indices return `Ok(None)`.
    pub fn with_null_calls(mut self, calls: &[usize]) -> Self {
        self.null_calls = calls.iter().copied().collect();
        self
    }

    /// Make the given 0-based call indices return an engine error.
    pub fn with_failing_calls(mut self, calls: &[usize]) -> Self {
        self.fail_calls = calls.iter().copied().collect();
        self
    }

    /// Sleep for `delay` before responding, on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep for `delay` before responding, on the given 0-based call
    /// indices only.
    pub fn with_delayed_calls(mut self, calls: &[usize], delay: Duration) -> Self {
        self.delay = Some(delay);
        self.delay_calls = calls.iter().copied().collect();
        self
    }

    /// Number of synthesize calls made.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Voice references observed, in call order.
    pub fn seen_voices(&self) -> Vec<VoiceReference> {
        self.seen_voices.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsEngine for MockEngine {
    async fn synthesize(&self, _text: &str, voice: &VoiceReference) -> Result<Option<Waveform>> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.seen_voices.lock().unwrap().push(voice.clone());

        if let Some(delay) = self.delay {
            if self.delay_calls.is_empty() || self.delay_calls.contains(&call) {
                tokio::time::sleep(delay).await;
            }
        }

        if self.fail_calls.contains(&call) {
            return Err(NarrateError::Engine(format!("scripted failure on call {call}")));
        }
        if self.always_null || self.null_calls.contains(&call) {
            return Ok(None);
        }
        Ok(Some(Waveform::mono(self.samples.clone())))
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
