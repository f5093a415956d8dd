use crate::core::PcmBuffer;
use crate::error::{AudioError, AudioResult};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Sinc filter length. Matches the fixed `filter_size=64` of the reference
/// conversion chain.
const SINC_FILTER_LEN: usize = 64;

/// Anti-aliasing cutoff relative to the Nyquist frequency of the lower of the
/// two rates. Suppresses fold-back while keeping content relevant to ML
/// feature extraction.
const CUTOFF: f32 = 0.97;

/// Frames fed to the converter per call
const CHUNK_FRAMES: usize = 1024;

/// Convert a buffer to `target_rate` with band-limited interpolation.
///
/// When the rates already match the input buffer is returned untouched, bit
/// for bit; no filter runs on that path. Otherwise the signal is low-pass
/// filtered and interpolated by a windowed-sinc converter, the filter memory
/// is flushed after the last input block, and the output is clipped to
/// `round(input_frames * target_rate / source_rate)` frames per channel so
/// the result length is a deterministic function of the input length. The
/// channel count is never changed here.
pub fn resample(buffer: PcmBuffer, target_rate: u32) -> AudioResult<PcmBuffer> {
    if target_rate == 0 {
        return Err(AudioError::ResamplerInitFailed(
            "target sample rate must be positive".to_string(),
        ));
    }

    if buffer.sample_rate() == target_rate {
        return Ok(buffer);
    }

    let channels = buffer.channels();
    let ratio = target_rate as f64 / buffer.sample_rate() as f64;
    let in_frames = buffer.frames();
    let expected_frames = (in_frames as f64 * ratio).round() as usize;

    if in_frames == 0 {
        return PcmBuffer::new(Vec::new(), target_rate, channels);
    }

    let params = SincInterpolationParameters {
        sinc_len: SINC_FILTER_LEN,
        f_cutoff: CUTOFF,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_FRAMES, channels as usize)
        .map_err(|e| AudioError::ResamplerInitFailed(e.to_string()))?;

    let delay = resampler.output_delay();
    let planar = deinterleave(buffer.samples(), channels as usize);
    let mut out_planar: Vec<Vec<f32>> =
        vec![Vec::with_capacity(expected_frames + delay); channels as usize];

    let mut pos = 0;
    while pos + CHUNK_FRAMES <= in_frames {
        let chunk: Vec<&[f32]> = planar.iter().map(|c| &c[pos..pos + CHUNK_FRAMES]).collect();
        let out = resampler
            .process(&chunk, None)
            .map_err(|e| AudioError::ResampleFailed(e.to_string()))?;
        append_planar(&mut out_planar, &out);
        pos += CHUNK_FRAMES;
    }

    if pos < in_frames {
        let tail: Vec<&[f32]> = planar.iter().map(|c| &c[pos..]).collect();
        let out = resampler
            .process_partial(Some(&tail), None)
            .map_err(|e| AudioError::ResampleFailed(e.to_string()))?;
        append_planar(&mut out_planar, &out);
    }

    // The sinc filter holds samples back; flush until the delayed tail has
    // fully drained.
    while out_planar[0].len() < delay + expected_frames {
        let out = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| AudioError::ResampleFailed(e.to_string()))?;
        if out[0].is_empty() {
            break;
        }
        append_planar(&mut out_planar, &out);
    }

    let available = out_planar[0].len().saturating_sub(delay);
    let take = expected_frames.min(available);
    let samples = interleave(&out_planar, delay, take);

    PcmBuffer::new(samples, target_rate, channels)
}

fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let frames = samples.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (ch, &s) in frame.iter().enumerate() {
            planar[ch].push(s);
        }
    }
    planar
}

fn append_planar(dst: &mut [Vec<f32>], src: &[Vec<f32>]) {
    for (d, s) in dst.iter_mut().zip(src) {
        d.extend_from_slice(s);
    }
}

fn interleave(planar: &[Vec<f32>], skip: usize, frames: usize) -> Vec<f32> {
    let channels = planar.len();
    let mut samples = Vec::with_capacity(frames * channels);
    for i in skip..skip + frames {
        for ch in planar {
            samples.push(ch[i]);
        }
    }
    samples
}
