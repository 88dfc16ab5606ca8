//! Spectral analysis for verifying noise colors.
//!
//! Power spectra are Welch estimates: Hann-windowed segments with 50%
//! overlap, averaged. Octave bands average the per-bin power inside
//! `[center / √2, center · √2)`, and the color slope is a least-squares fit
//! of band power in dB against `log2(center)`.

use std::f64::consts::{PI, SQRT_2};

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

/// Default Welch segment length.
pub const WELCH_FFT_SIZE: usize = 4096;

/// Power floor keeping `10·log10` finite on silent input.
const POWER_FLOOR: f64 = 1e-20;

/// Mean power in one octave band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OctaveBand {
    /// Band center in Hz.
    pub center_hz: f64,
    /// Mean per-bin power in dB (arbitrary reference).
    pub power_db: f64,
    /// FFT bins averaged into this band.
    pub bins: usize,
}

/// Summary of a sample buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumReport {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples analyzed.
    pub num_samples: usize,
    /// Root-mean-square level.
    pub rms: f64,
    /// Peak absolute level.
    pub peak: f64,
    /// Octave bands, ascending.
    pub bands: Vec<OctaveBand>,
    /// Fitted slope in dB per octave.
    pub slope_db_per_octave: f64,
}

/// Welch power spectrum for bins `0..=fft_size / 2`.
///
/// Returns an empty vector when fewer than `fft_size` samples are given.
pub fn welch_power_spectrum(samples: &[f64], fft_size: usize) -> Vec<f64> {
    if fft_size < 2 || samples.len() < fft_size {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let window: Vec<f64> = (0..fft_size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / fft_size as f64).cos()))
        .collect();

    let hop = fft_size / 2;
    let bins = fft_size / 2 + 1;
    let mut power = vec![0.0; bins];
    let mut segments = 0usize;
    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];

    let mut start = 0;
    while start + fft_size <= samples.len() {
        for ((slot, &sample), &w) in buffer
            .iter_mut()
            .zip(&samples[start..start + fft_size])
            .zip(&window)
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        fft.process(&mut buffer);
        for (acc, c) in power.iter_mut().zip(&buffer) {
            *acc += c.norm_sqr();
        }
        segments += 1;
        start += hop;
    }

    let norm = segments as f64;
    power.iter_mut().for_each(|p| *p /= norm);
    power
}

/// Averages a Welch spectrum into octave bands.
///
/// Centers start at `low_hz` and double while they do not exceed `high_hz`.
/// Bands with no bins (too narrow for the FFT resolution) are skipped.
pub fn octave_bands(
    spectrum: &[f64],
    fft_size: usize,
    sample_rate: u32,
    low_hz: f64,
    high_hz: f64,
) -> Vec<OctaveBand> {
    let resolution = sample_rate as f64 / fft_size as f64;
    let nyquist = sample_rate as f64 / 2.0;
    let mut bands = Vec::new();

    let mut center = low_hz;
    while center <= high_hz && center * SQRT_2 <= nyquist {
        let lo = (center / SQRT_2 / resolution).ceil() as usize;
        let hi = ((center * SQRT_2 / resolution).ceil() as usize).min(spectrum.len());
        if hi > lo {
            let mean = spectrum[lo..hi].iter().sum::<f64>() / (hi - lo) as f64;
            bands.push(OctaveBand {
                center_hz: center,
                power_db: 10.0 * mean.max(POWER_FLOOR).log10(),
                bins: hi - lo,
            });
        }
        center *= 2.0;
    }

    bands
}

/// Least-squares slope of band power (dB) against octave number.
///
/// Returns 0.0 for fewer than two bands.
pub fn slope_db_per_octave(bands: &[OctaveBand]) -> f64 {
    if bands.len() < 2 {
        return 0.0;
    }
    let n = bands.len() as f64;
    let xs: Vec<f64> = bands.iter().map(|b| b.center_hz.log2()).collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = bands.iter().map(|b| b.power_db).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (x, band) in xs.iter().zip(bands) {
        cov += (x - mean_x) * (band.power_db - mean_y);
        var += (x - mean_x).powi(2);
    }
    if var == 0.0 {
        0.0
    } else {
        cov / var
    }
}

/// Root-mean-square level; 0.0 for an empty buffer.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

/// Peak absolute level; 0.0 for an empty buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0, |acc: f64, s| acc.max(s.abs()))
}

/// Decodes 16-bit little-endian PCM to floats in `[-1, 1]`.
///
/// A trailing odd byte is ignored.
pub fn decode_pcm16(pcm: &[u8]) -> Vec<f64> {
    pcm.chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]) as f64 / 32767.0)
        .collect()
}

/// Full report over `[low_hz, high_hz]` octave bands.
pub fn analyze(samples: &[f64], sample_rate: u32, low_hz: f64, high_hz: f64) -> SpectrumReport {
    let spectrum = welch_power_spectrum(samples, WELCH_FFT_SIZE);
    let bands = octave_bands(&spectrum, WELCH_FFT_SIZE, sample_rate, low_hz, high_hz);
    SpectrumReport {
        sample_rate,
        num_samples: samples.len(),
        rms: rms(samples),
        peak: peak(samples),
        slope_db_per_octave: slope_db_per_octave(&bands),
        bands,
    }
}
