//! Persisting the assembled waveform as WAV and MP3 artifacts.

use crate::error::{NarrateError, Result};
use crate::extract::PageRange;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Paths of the written artifacts for one narration request.
#[derive(Debug, Clone)]
pub struct OutputArtifacts {
    /// The lossless WAV file
    pub wav: PathBuf,
    /// The compressed MP3 derivative; `None` when encoding failed (non-fatal)
    pub mp3: Option<PathBuf>,
}

/// Write the assembled waveform under `out_dir` and derive a compressed copy.
///
/// The filename stem encodes the book name, a literal `part x` placeholder,
/// the sanitized voice name, and the page range. Pre-existing files at either
/// derived path are deleted first (overwrite, not append). The WAV is written
/// first; MP3 derivation is only attempted afterwards and its failure is
/// non-fatal.
pub fn write_artifacts(
    samples: &[f32],
    sample_rate: u32,
    out_dir: &Path,
    book_name: &str,
    pages: &PageRange,
    voice_name: &str,
    bitrate_kbps: u32,
) -> Result<OutputArtifacts> {
    std::fs::create_dir_all(out_dir)?;

    let stem = format!(
        "{} part x {} pg{}-{}",
        book_name, voice_name, pages.start, pages.end
    );
    let wav_path = out_dir.join(format!("{stem}.wav"));
    let mp3_path = out_dir.join(format!("{stem}.mp3"));

    remove_stale(&wav_path)?;
    remove_stale(&mp3_path)?;

    write_wav(&wav_path, samples, sample_rate)?;
    info!(path = %wav_path.display(), "wrote lossless artifact");

    let mp3 = match encode_mp3(&wav_path, &mp3_path, bitrate_kbps) {
        Ok(()) => {
            info!(path = %mp3_path.display(), "wrote compressed artifact");
            Some(mp3_path)
        }
        Err(e) => {
            warn!("mp3 encoding failed, continuing with WAV only: {e}");
            None
        }
    };

    Ok(OutputArtifacts {
        wav: wav_path,
        mp3,
    })
}

/// Delete a stale artifact if one exists at `path`.
fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Write samples as 16-bit PCM WAV.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Derive an MP3 copy of a WAV file via ffmpeg at a fixed bitrate.
pub fn encode_mp3(wav_path: &Path, mp3_path: &Path, bitrate_kbps: u32) -> Result<()> {
    let output = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(wav_path)
        .args(["-b:a", &format!("{bitrate_kbps}k")])
        .arg(mp3_path)
        .output()
        .map_err(|e| NarrateError::Encoding(format!("failed to run ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NarrateError::Encoding(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_wav_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let samples = vec![0.0, 0.5, -0.5, 1.0, -1.0];

        write_wav(&path, &samples, 24000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 5);
    }

    #[test]
    fn test_write_wav_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");

        write_wav(&path, &vec![0.1; 1000], 24000).unwrap();
        let large = std::fs::metadata(&path).unwrap().len();

        write_wav(&path, &vec![0.1; 10], 24000).unwrap();
        let small = std::fs::metadata(&path).unwrap().len();

        // Replaced entirely, not appended
        assert!(small < large);
    }

    #[test]
    fn test_write_wav_clamps_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clamped.wav");
        write_wav(&path, &[2.0, -2.0], 24000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }

    #[test]
    fn test_artifact_stem_naming() {
        let dir = TempDir::new().unwrap();
        let pages = PageRange { start: 3, end: 10 };
        let artifacts = write_artifacts(
            &[0.0; 100],
            24000,
            dir.path(),
            "mybook",
            &pages,
            "amy",
            64,
        )
        .unwrap();

        assert_eq!(
            artifacts.wav,
            dir.path().join("mybook part x amy pg3-10.wav")
        );
        assert!(artifacts.wav.exists());
        // MP3 derivation depends on ffmpeg being installed; when it is absent
        // the result is the non-fatal None
        if let Some(mp3) = &artifacts.mp3 {
            assert!(mp3.exists());
        }
    }

    // Note: exercising encode_mp3 end to end requires ffmpeg on PATH and is
    // better suited for integration tests.
}
