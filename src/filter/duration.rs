use crate::core::PcmBuffer;
use crate::error::AudioResult;

/// Trim or pad a buffer to fit within `[min_secs, max_secs]`.
///
/// Thresholds are measured at the buffer's current sample rate, so this must
/// run after resampling, never before. Both frame counts use `floor`:
/// a buffer longer than `max_secs` is hard-clipped to an exact prefix of
/// `floor(max_secs * rate)` frames, a shorter-than-`min_secs` buffer is
/// extended with exact zeros to `floor(min_secs * rate)` frames, and anything
/// already inside the closed window is returned unchanged, same allocation.
/// With `min_secs == max_secs` every output has exactly that length.
pub fn normalize_duration(
    buffer: PcmBuffer,
    min_secs: f64,
    max_secs: f64,
) -> AudioResult<PcmBuffer> {
    let rate = buffer.sample_rate();
    let channels = buffer.channels();
    let frames = buffer.frames();

    let max_frames = (max_secs * rate as f64).floor() as usize;
    let min_frames = (min_secs * rate as f64).floor() as usize;

    if frames > max_frames {
        let mut samples = buffer.into_samples();
        samples.truncate(max_frames * channels as usize);
        PcmBuffer::new(samples, rate, channels)
    } else if frames < min_frames {
        let mut samples = buffer.into_samples();
        samples.resize(min_frames * channels as usize, 0.0);
        PcmBuffer::new(samples, rate, channels)
    } else {
        Ok(buffer)
    }
}
