//! Waveform types and assembly into output artifacts.

pub mod assembler;
pub mod writer;

/// A run of floating-point audio samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in [-1.0, 1.0], flattened in channel-major order
    pub samples: Vec<f32>,
    /// Number of channels; the pipeline only ever assembles mono
    pub channels: usize,
}

impl Waveform {
    /// A single-channel waveform.
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            samples,
            channels: 1,
        }
    }

    /// An all-zero mono waveform of the given duration, sample count rounded
    /// down.
    pub fn silence(duration_secs: f64, sample_rate: u32) -> Self {
        let count = (duration_secs * sample_rate as f64) as usize;
        Self::mono(vec![0.0; count])
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_sample_count() {
        let s = Waveform::silence(0.25, 24000);
        assert_eq!(s.len(), 6000);
        assert!(s.samples.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_silence_rounds_down() {
        // 0.1s at 44100 Hz is 4410 exactly; 0.33s at 100 Hz rounds down
        assert_eq!(Waveform::silence(0.1, 44100).len(), 4410);
        assert_eq!(Waveform::silence(0.333, 100).len(), 33);
    }

    #[test]
    fn test_mono() {
        let w = Waveform::mono(vec![0.5, -0.5]);
        assert_eq!(w.channels, 1);
        assert_eq!(w.len(), 2);
        assert!(!w.is_empty());
    }
}
