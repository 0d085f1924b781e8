//! Chatterbox Turbo TTS engine using PyO3 to embed Python.
//!
//! Model weights are expensive to load, so the Python model object is held
//! for the lifetime of the engine: loaded lazily on the first synthesis call
//! and reused afterwards. The same mutex that guards initialization also
//! serializes inference, since the model is not proven safe for concurrent
//! generate calls. The guard travels into the blocking task, so the lock is
//! released only when the generate call has actually finished, even when the
//! caller abandons a timed-out attempt.

use super::TtsEngine;
use crate::audio::Waveform;
use crate::error::{NarrateError, Result};
use crate::voice::VoiceReference;
use async_trait::async_trait;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tokio::sync::Mutex;
use tracing::info;

/// Chatterbox generates 24 kHz mono audio.
const CHATTERBOX_SAMPLE_RATE: u32 = 24000;

/// Initialize the Python runtime once per process.
static PYTHON_INIT: Once = Once::new();

impl From<PyErr> for NarrateError {
    fn from(e: PyErr) -> Self {
        NarrateError::Engine(e.to_string())
    }
}

/// Chatterbox Turbo TTS engine.
pub struct ChatterboxEngine {
    /// Device inference runs on (cuda, cpu)
    device: String,
    /// Lazily loaded model handle; the mutex serializes load and inference,
    /// and its owned guard is held by the blocking task for the full call
    model: Arc<Mutex<Option<Py<PyAny>>>>,
}

impl ChatterboxEngine {
    /// Create a new engine.
    ///
    /// # Arguments
    /// * `device` - "cuda", "cpu", or None for auto-detect
    ///
    /// The model itself is not loaded here; the first synthesis call loads
    /// it. Concurrent first calls coalesce on the model lock, so the load
    /// happens exactly once.
    pub fn new(device: Option<&str>) -> Result<Self> {
        PYTHON_INIT.call_once(|| {
            pyo3::prepare_freethreaded_python();
        });

        let device = match device {
            Some(d) => d.to_string(),
            None => Self::detect_device()?,
        };

        Ok(Self {
            device,
            model: Arc::new(Mutex::new(None)),
        })
    }

    /// Auto-detect the best available device.
    fn detect_device() -> Result<String> {
        Python::with_gil(|py| {
            let torch = py.import("torch")?;
            let cuda = torch.getattr("cuda")?;
            if cuda.call_method0("is_available")?.extract::<bool>()? {
                Ok("cuda".to_string())
            } else {
                Ok("cpu".to_string())
            }
        })
    }
}

/// Load the pretrained Chatterbox Turbo model.
fn load_model(device: &str) -> Result<Py<PyAny>> {
    Python::with_gil(|py| {
        let module = py.import("chatterbox.tts_turbo")?;
        let class = module.getattr("ChatterboxTurboTTS")?;

        let kwargs = PyDict::new(py);
        kwargs.set_item("device", device)?;
        let model = class.call_method("from_pretrained", (), Some(&kwargs))?;

        Ok(model.unbind())
    })
}

/// Run one generate call and extract the waveform samples.
fn synthesize_blocking(
    model: &Py<PyAny>,
    text: &str,
    clip: Option<&Path>,
) -> Result<Option<Waveform>> {
    Python::with_gil(|py| {
        let model = model.bind(py);

        let kwargs = PyDict::new(py);
        if let Some(clip) = clip {
            kwargs.set_item("audio_prompt_path", clip.to_string_lossy().as_ref())?;
        }

        let wav = model.call_method("generate", (text,), Some(&kwargs))?;
        if wav.is_none() {
            return Ok(None);
        }

        // Tensor -> numpy, then flatten. A 2-d result is (channels, samples);
        // the channel count travels with the waveform so the assembler can
        // reject anything that is not mono.
        let wav_np = wav.call_method0("cpu")?.call_method0("numpy")?;
        let ndim: usize = wav_np.getattr("ndim")?.extract()?;

        let (flat, channels) = match ndim {
            1 => (wav_np, 1),
            2 => {
                let shape: (usize, usize) = wav_np.getattr("shape")?.extract()?;
                (wav_np.call_method1("reshape", (-1i64,))?, shape.0)
            }
            n => {
                return Err(NarrateError::Engine(format!(
                    "unexpected waveform rank: {n}"
                )));
            }
        };

        let samples: Vec<f32> = flat.call_method0("tolist")?.extract()?;
        Ok(Some(Waveform { samples, channels }))
    })
}

#[async_trait]
impl TtsEngine for ChatterboxEngine {
    async fn synthesize(&self, text: &str, voice: &VoiceReference) -> Result<Option<Waveform>> {
        // The owned guard moves into the blocking task and is dropped only
        // when the blocking work finishes. A caller that abandons a timed-out
        // attempt therefore does not release the lock early; the next attempt
        // waits until the stalled generate call has actually returned.
        let guard = self.model.clone().lock_owned().await;

        let device = self.device.clone();
        let text = text.to_string();
        let clip: Option<PathBuf> = voice.clip_path().map(Path::to_path_buf);

        tokio::task::spawn_blocking(move || {
            let mut slot = guard;
            if slot.is_none() {
                info!(device = %device, "loading Chatterbox Turbo model");
                *slot = Some(load_model(&device)?);
            }
            match slot.as_ref() {
                Some(model) => synthesize_blocking(model, &text, clip.as_deref()),
                None => Err(NarrateError::Engine("model not initialized".to_string())),
            }
        })
        .await
        .map_err(|e| NarrateError::Engine(format!("synthesis task failed: {e}")))?
    }

    fn sample_rate(&self) -> u32 {
        CHATTERBOX_SAMPLE_RATE
    }
}
