//! Batch rendering: a finite WAV file from one chunk pull.

use std::path::Path;

use ambisynth_spec::Profile;

use crate::chunk::ChunkProducer;
use crate::error::{AudioError, AudioResult};
use crate::wav::WavResult;

/// Longest render accepted, in seconds. Larger requests should stream.
pub const MAX_RENDER_SECONDS: f64 = 3600.0;

/// Number of samples in `seconds` of audio, rounded.
pub fn sample_count(seconds: f64, sample_rate: u32) -> AudioResult<usize> {
    if !(seconds.is_finite() && seconds > 0.0 && seconds <= MAX_RENDER_SECONDS) {
        return Err(AudioError::InvalidDuration { duration: seconds });
    }
    Ok((seconds * sample_rate as f64).round() as usize)
}

/// Renders `seconds` of a profile to an in-memory WAV file.
///
/// The output is byte-identical to the first `seconds · sample_rate` samples
/// of a stream of the same seeded profile.
pub fn render(profile: &Profile, seconds: f64, sample_rate: u32) -> AudioResult<WavResult> {
    let count = sample_count(seconds, sample_rate)?;
    let mut producer = ChunkProducer::from_profile(profile, sample_rate)?;
    let pcm = producer.next_chunk(count);
    let result = WavResult::from_pcm(&pcm, sample_rate);

    tracing::info!(
        profile = profile.name(),
        subtype = %profile.subtype(),
        seconds,
        samples = result.num_samples,
        pcm_hash = %result.pcm_hash,
        "rendered"
    );
    Ok(result)
}

/// Renders and writes the WAV file to `path`.
pub fn render_to_file(
    profile: &Profile,
    seconds: f64,
    sample_rate: u32,
    path: &Path,
) -> AudioResult<WavResult> {
    let result = render(profile, seconds, sample_rate)?;
    std::fs::write(path, &result.wav_data)?;
    Ok(result)
}
