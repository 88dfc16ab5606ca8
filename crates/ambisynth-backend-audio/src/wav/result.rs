//! Rendered WAV result type.

use super::format::WavFormat;
use super::writer::write_wav_to_vec;

/// A complete, finite WAV file.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Wraps already-quantized 16-bit little-endian PCM.
    pub fn from_pcm(pcm: &[u8], sample_rate: u32) -> Self {
        let pcm_hash = blake3::hash(pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: pcm.len() / 2,
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
