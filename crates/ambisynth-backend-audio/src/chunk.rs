//! Chunk producer: the only thing that advances a generator.
//!
//! Every call pulls `count` samples, scales them by the current volume,
//! clamps and quantizes them to 16-bit little-endian PCM. Chunks carry no
//! framing, so `next_chunk(n)` followed by `next_chunk(m)` yields exactly the
//! bytes of one `next_chunk(n + m)`.

use ambisynth_spec::{clamp_unit, Profile, Subtype};

use crate::error::AudioResult;
use crate::generator::{validate_sample_rate, Generator};
use crate::wav::quantize_sample;

/// Bytes per mono 16-bit sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Pulls PCM chunks from one generator.
#[derive(Debug, Clone)]
pub struct ChunkProducer {
    generator: Generator,
    volume: f64,
    sample_rate: u32,
    samples_produced: u64,
}

impl ChunkProducer {
    /// Wraps a generator. Volume is clamped to `[0, 1]`.
    pub fn new(generator: Generator, volume: f64, sample_rate: u32) -> Self {
        Self {
            generator,
            volume: clamp_unit(volume),
            sample_rate,
            samples_produced: 0,
        }
    }

    /// Creates a producer for a profile.
    pub fn from_profile(profile: &Profile, sample_rate: u32) -> AudioResult<Self> {
        validate_sample_rate(sample_rate)?;
        let generator = Generator::from_profile(profile, sample_rate);
        Ok(Self::new(generator, profile.volume(), sample_rate))
    }

    /// Produces `count` samples as 16-bit little-endian PCM.
    pub fn next_chunk(&mut self, count: usize) -> Vec<u8> {
        let mut chunk = Vec::with_capacity(count * BYTES_PER_SAMPLE);
        self.write_chunk(count, &mut chunk);
        chunk
    }

    /// Appends `count` samples of PCM to `out`.
    pub fn write_chunk(&mut self, count: usize, out: &mut Vec<u8>) {
        out.reserve(count * BYTES_PER_SAMPLE);
        for _ in 0..count {
            let sample = self.next_scaled();
            out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
        }
    }

    /// Produces `count` post-volume samples as floats in `[-1, 1]`.
    ///
    /// Advances the generator exactly as [`ChunkProducer::next_chunk`] would.
    pub fn next_samples(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_scaled()).collect()
    }

    #[inline]
    fn next_scaled(&mut self) -> f64 {
        self.samples_produced += 1;
        (self.generator.next_sample() * self.volume).clamp(-1.0, 1.0)
    }

    /// Changes the volume for subsequent samples (clamped).
    pub fn set_volume(&mut self, volume: f64) {
        let clamped = clamp_unit(volume);
        if clamped != volume {
            tracing::debug!(requested = volume, clamped, "volume clamped");
        }
        self.volume = clamped;
    }

    /// Current volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Sample rate the generator was built for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Subtype being synthesized.
    pub fn subtype(&self) -> Subtype {
        self.generator.subtype()
    }

    /// Total samples produced so far.
    pub fn samples_produced(&self) -> u64 {
        self.samples_produced
    }

    /// Seconds of audio produced so far.
    pub fn seconds_produced(&self) -> f64 {
        self.samples_produced as f64 / self.sample_rate as f64
    }
}
