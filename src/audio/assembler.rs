//! Concatenation of generated segments into one flat waveform.

use super::Waveform;
use crate::error::{NarrateError, Result};

/// Concatenate segments in order into a single flat sample sequence.
///
/// Pure function. Segments must be mono; the engine collapses a singleton
/// channel dimension at extraction time, so a multi-channel segment here
/// means the model produced stereo, which is out of scope. Empty input
/// yields an empty sequence (the generator owns the no-audio failure).
pub fn assemble(segments: &[Waveform]) -> Result<Vec<f32>> {
    let total: usize = segments.iter().map(Waveform::len).sum();
    let mut samples = Vec::with_capacity(total);

    for segment in segments {
        if segment.channels != 1 {
            return Err(NarrateError::MultiChannel(segment.channels));
        }
        samples.extend_from_slice(&segment.samples);
    }

    Ok(samples)
}
