//! Per-file pipeline and batch orchestration

pub mod scheduler;
pub mod tasks;

pub use scheduler::{run, BatchReport};
pub use tasks::{collect_tasks, ensure_output_dirs, Task};

use crate::decoder::SymphoniaDecoder;
use crate::encoder;
use crate::error::{AudioError, AudioResult};
use crate::filter::{normalize_duration, resample};
use std::path::Path;

/// Extra native-rate frames decoded past the trim window so the resampler's
/// filter delay never shifts the trim boundary.
const DECODE_TAIL_FRAMES: u64 = 1024;

/// Normalization parameters, shared by value across all tasks of a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessorConfig {
    /// Output sample rate in Hz
    pub target_sample_rate: u32,
    /// Shorter outputs are zero-padded up to this duration (seconds)
    pub min_duration: f64,
    /// Longer outputs are hard-clipped to this duration (seconds)
    pub max_duration: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            target_sample_rate: 16_000,
            min_duration: 3.0,
            max_duration: 5.0,
        }
    }
}

impl ProcessorConfig {
    /// Reject configurations no file could satisfy.
    ///
    /// An inverted duration window (`min > max`) is a configuration error
    /// reported before any file is touched, not a silently-resolved
    /// ambiguity.
    pub fn validate(&self) -> AudioResult<()> {
        if self.target_sample_rate == 0 {
            return Err(AudioError::InvalidConfig(
                "target sample rate must be positive".to_string(),
            ));
        }
        if !self.min_duration.is_finite() || !self.max_duration.is_finite() {
            return Err(AudioError::InvalidConfig(
                "durations must be finite".to_string(),
            ));
        }
        if self.min_duration < 0.0 || self.max_duration < 0.0 {
            return Err(AudioError::InvalidConfig(
                "durations must be non-negative".to_string(),
            ));
        }
        if self.min_duration > self.max_duration {
            return Err(AudioError::InvalidConfig(format!(
                "min duration {} exceeds max duration {}",
                self.min_duration, self.max_duration
            )));
        }
        Ok(())
    }
}

/// Run the full pipeline for one file: decode, resample, trim or pad, encode.
///
/// Every stage consumes its predecessor's buffer, and all per-file resources
/// (demuxer, codec decoder, resampler state, WAV writer) live only within
/// this call; ownership releases them on every exit path, early errors
/// included.
pub fn process_file(input: &Path, output: &Path, config: &ProcessorConfig) -> AudioResult<()> {
    config.validate()?;

    let decoder = SymphoniaDecoder::open(input)?;

    // Stop decoding once enough native-rate frames exist to cover the trim
    // window after resampling; the tail of a long file is never read.
    let cap =
        (config.max_duration * decoder.sample_rate() as f64).ceil() as u64 + DECODE_TAIL_FRAMES;
    let decoded = decoder.decode_all(Some(cap))?;

    let resampled = resample(decoded, config.target_sample_rate)?;
    let normalized = normalize_duration(resampled, config.min_duration, config.max_duration)?;

    encoder::encode(&normalized, output)
}
