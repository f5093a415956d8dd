use crate::error::{AudioError, AudioResult};

/// Interleaved PCM audio buffer.
///
/// Samples are 32-bit floats stored interleaved per channel (L,R,L,R,...).
/// The sample count is always an exact multiple of the channel count; the
/// constructor rejects anything else. Every pipeline stage consumes its input
/// buffer by value and produces a fresh one, so a buffer is only ever owned
/// by the stage currently working on it.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    /// Interleaved f32 samples
    samples: Vec<f32>,
    /// Sample rate in Hz
    sample_rate: u32,
    /// Number of channels
    channels: u16,
}

impl PcmBuffer {
    /// Create a new buffer, validating the interleave invariant
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidPcm("sample rate must be positive".to_string()));
        }
        if channels == 0 {
            return Err(AudioError::InvalidPcm("channel count must be positive".to_string()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(AudioError::InvalidPcm(format!(
                "sample count {} is not a multiple of channel count {}",
                samples.len(),
                channels
            )));
        }

        Ok(PcmBuffer {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the buffer, yielding its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Duration in seconds at the buffer's sample rate
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
