//! pdf-narrator configuration management.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_MAX_CHUNK_LEN: usize = 500;
const DEFAULT_SILENCE_SECS: f64 = 0.25;
const DEFAULT_SAMPLE_RATE: u32 = 24000;
const DEFAULT_MP3_BITRATE_KBPS: u32 = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrateConfig {
    /// Maximum chunk length in characters fed to the TTS engine per call
    #[serde(default = "default_max_chunk_len")]
    pub max_chunk_len: usize,

    /// Silence inserted after each generated segment, in seconds
    #[serde(default = "default_silence_secs")]
    pub silence_secs: f64,

    /// Output sample rate in Hz (Chatterbox generates at 24 kHz)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Bitrate for the compressed MP3 artifact
    #[serde(default = "default_mp3_bitrate")]
    pub mp3_bitrate_kbps: u32,

    /// Directory searched for reference voice clips
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// Directory artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Voice used when the request doesn't name one
    #[serde(default)]
    pub default_voice: Option<String>,

    /// Device to use (cuda, cpu). None means auto-detect.
    #[serde(default)]
    pub device: Option<String>,

    /// Fail the request when the requested voice cannot be resolved,
    /// instead of falling back to default-voice synthesis
    #[serde(default)]
    pub strict_voice: bool,

    /// Additional synthesis attempts per chunk before it is skipped
    #[serde(default = "default_chunk_retries")]
    pub chunk_retries: u32,

    /// Per-attempt synthesis timeout in seconds
    #[serde(default = "default_chunk_timeout")]
    pub chunk_timeout_secs: u64,
}

fn default_max_chunk_len() -> usize {
    DEFAULT_MAX_CHUNK_LEN
}

fn default_silence_secs() -> f64 {
    DEFAULT_SILENCE_SECS
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_mp3_bitrate() -> u32 {
    DEFAULT_MP3_BITRATE_KBPS
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("voices")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_chunk_retries() -> u32 {
    1
}

fn default_chunk_timeout() -> u64 {
    300
}

impl Default for NarrateConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: default_max_chunk_len(),
            silence_secs: default_silence_secs(),
            sample_rate: default_sample_rate(),
            mp3_bitrate_kbps: default_mp3_bitrate(),
            voices_dir: default_voices_dir(),
            output_dir: default_output_dir(),
            default_voice: None,
            device: None,
            strict_voice: false,
            chunk_retries: default_chunk_retries(),
            chunk_timeout_secs: default_chunk_timeout(),
        }
    }
}

impl NarrateConfig {
    /// Get the config file path: ~/.config/pdf-narrator/narrate.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("pdf-narrator")
            .join("narrate.toml"))
    }

    /// Load config from file, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: NarrateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
