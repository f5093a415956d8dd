use crate::core::PcmBuffer;
use crate::error::{AudioError, AudioResult};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder.
///
/// Opens one media file, selects the best audio track and decodes it to
/// interleaved 32-bit float at the stream's native sample rate and channel
/// count. Multiplexed video and subtitle tracks are ignored.
pub struct SymphoniaDecoder {
    /// Demuxer for the probed container
    reader: Box<dyn symphonia::core::formats::FormatReader>,
    /// Selected audio track
    track_id: u32,
    /// Native sample rate of the selected track
    sample_rate: u32,
    /// Native channel count of the selected track
    channels: u16,
    /// Codec decoder for the selected track
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
}

impl SymphoniaDecoder {
    /// Open a media file and prepare the best audio track for decoding
    pub fn open<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = Box::new(
            File::open(path).map_err(|e| AudioError::OpenFailed(format!("{}: {}", path.display(), e)))?,
        );
        let mss = MediaSourceStream::new(file, Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| AudioError::OpenFailed(format!("{}: {}", path.display(), e)))?;

        let reader = probed.format;

        // Symphonia only surfaces decodable media tracks; the first non-null
        // codec is the container's strongest audio candidate.
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::NoAudioStream(path.display().to_string()))?
            .clone();

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::NoAudioStream(format!("{}: unknown sample rate", path.display())))?;

        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .filter(|&c| c > 0)
            .ok_or_else(|| AudioError::NoAudioStream(format!("{}: unknown channel count", path.display())))?;

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::UnsupportedCodec(format!("{}: {}", path.display(), e)))?;

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            sample_rate,
            channels,
            decoder,
        })
    }

    /// Native sample rate of the selected track
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Native channel count of the selected track
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Decode the whole track into one interleaved buffer.
    ///
    /// When `stop_after_frames` is set, decoding ends as soon as that many
    /// frames (samples per channel) have been produced, so the tail of a long
    /// file is never read from disk. The result may overshoot the cap by at
    /// most one packet.
    pub fn decode_all(mut self, stop_after_frames: Option<u64>) -> AudioResult<PcmBuffer> {
        let mut samples: Vec<f32> = Vec::new();
        let channels = self.channels as usize;

        loop {
            if let Some(cap) = stop_after_frames {
                if (samples.len() / channels) as u64 >= cap {
                    break;
                }
            }

            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    return Err(AudioError::OpenFailed(
                        "stream changed mid-decode".to_string(),
                    ));
                }
                Err(e) => return Err(AudioError::OpenFailed(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                // A corrupt packet loses its own samples only
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(AudioError::OpenFailed(e.to_string())),
            };

            let spec = *decoded.spec();
            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            if sample_buf.samples().is_empty() {
                continue;
            }

            samples.extend_from_slice(sample_buf.samples());
        }

        PcmBuffer::new(samples, self.sample_rate, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_test_wav(path: &Path, frames: usize, rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            for ch in 0..channels {
                let v = (i as f32 / frames as f32) * if ch == 0 { 1.0 } else { -1.0 };
                writer.write_sample(v).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_open_missing_file() {
        let result = SymphoniaDecoder::open("/nonexistent/file.mp3");
        assert!(matches!(result, Err(AudioError::OpenFailed(_))));
    }

    #[test]
    fn test_open_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        let mut f = File::create(&path).unwrap();
        f.write_all(&[0u8; 64]).unwrap();

        let result = SymphoniaDecoder::open(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_wav_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.wav");
        write_test_wav(&path, 4800, 48000, 1);

        let decoder = SymphoniaDecoder::open(&path).unwrap();
        assert_eq!(decoder.sample_rate(), 48000);
        assert_eq!(decoder.channels(), 1);

        let buf = decoder.decode_all(None).unwrap();
        assert_eq!(buf.frames(), 4800);
        assert_eq!(buf.samples()[0], 0.0);
        let last = buf.samples()[4799];
        assert!((last - 4799.0 / 4800.0).abs() < 1e-6);
    }

    #[test]
    fn test_decode_preserves_stereo_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, 1000, 16000, 2);

        let buf = SymphoniaDecoder::open(&path).unwrap().decode_all(None).unwrap();
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.frames(), 1000);
        // Left is a rising ramp, right is its negation
        assert_eq!(buf.samples()[500 * 2], -buf.samples()[500 * 2 + 1]);
    }

    #[test]
    fn test_decode_early_stop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.wav");
        write_test_wav(&path, 80000, 16000, 1);

        let buf = SymphoniaDecoder::open(&path)
            .unwrap()
            .decode_all(Some(16000))
            .unwrap();
        // Stops at packet granularity once the cap is reached
        assert!(buf.frames() >= 16000);
        assert!(buf.frames() < 80000);
    }
}
