use crate::core::PcmBuffer;
use crate::error::{AudioError, AudioResult};
use hound::{WavSpec, WavWriter};
use std::path::Path;

/// Frames per write so memory use stays bounded by the chunk, not the buffer
const WRITE_CHUNK_FRAMES: usize = 1024;

/// WAV encoder writing 32-bit float little-endian PCM.
///
/// The RIFF/WAVE header goes out on creation; `finalize` patches the chunk
/// sizes after the last sample. A file abandoned before `finalize` is not
/// cleaned up and must be treated as invalid.
pub struct WavEncoder {
    writer: Option<WavWriter<std::io::BufWriter<std::fs::File>>>,
    sample_rate: u32,
    channels: u16,
}

impl WavEncoder {
    /// Open the output file and write the container header
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32, channels: u16) -> AudioResult<Self> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
        })
    }

    /// Sample rate of the output stream
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the output stream
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Append one interleaved chunk of samples
    pub fn write(&mut self, samples: &[f32]) -> AudioResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::WriteFailed("encoder already finalized".to_string()))?;

        for &sample in samples {
            writer.write_sample(sample)?;
        }

        Ok(())
    }

    /// Flush buffered samples and patch the header sizes
    pub fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}

/// Serialize a buffer to a WAV file, streaming in fixed-size chunks
pub fn encode(buffer: &PcmBuffer, path: &Path) -> AudioResult<()> {
    let mut encoder = WavEncoder::create(path, buffer.sample_rate(), buffer.channels())?;

    let chunk_len = WRITE_CHUNK_FRAMES * buffer.channels() as usize;
    for chunk in buffer.samples().chunks(chunk_len) {
        encoder.write(chunk)?;
    }

    encoder.finalize()
}
