//! Noise colorers.
//!
//! Turns white entropy into white, pink or brown noise one sample at a time.
//! Pink and brown carry filter state between calls, so a colorer must stay
//! bound to one stream for its whole life.

use crate::error::{AudioError, AudioResult};
use crate::rng::SampleRng;

use super::SampleSource;

/// Pink filter (decay, scale) pairs for taps 0..6, fitted per octave band.
pub const PINK_COEFFS: [(f64, f64); 6] = [
    (0.99886, 0.0555179),
    (0.99332, 0.0750759),
    (0.96900, 0.1538520),
    (0.86650, 0.3104856),
    (0.55000, 0.5329522),
    (-0.7616, -0.0168980),
];

/// Weight of the direct white term in the pink sum.
pub const PINK_WHITE_COEFF: f64 = 0.5362;

/// Tap 6 is reset to `white * PINK_FINAL_STATE_COEFF` after every sample.
pub const PINK_FINAL_STATE_COEFF: f64 = 0.115926;

/// Output normalization bringing pink to roughly white-noise amplitude.
pub const PINK_SCALE: f64 = 0.11;

/// Random walk step per sample.
pub const BROWN_STEP: f64 = 0.02;

/// Leak applied every sample to keep the walk from drifting.
pub const BROWN_DAMPING: f64 = 0.98;

/// Noise color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    /// White noise - equal energy at all frequencies.
    White,
    /// Pink noise - 1/f spectrum, equal energy per octave.
    Pink,
    /// Brown/Brownian noise - 1/f^2 spectrum, very bass-heavy.
    Brown,
}

impl NoiseColor {
    /// Parses a color name. Unknown names are an error, never a fallback.
    pub fn parse(name: &str) -> AudioResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(NoiseColor::White),
            "pink" => Ok(NoiseColor::Pink),
            "brown" => Ok(NoiseColor::Brown),
            _ => Err(AudioError::unknown_subtype("noise", name)),
        }
    }
}

/// Seven-tap pink filter.
#[derive(Debug, Clone, Default)]
pub struct PinkFilter {
    taps: [f64; 7],
}

impl PinkFilter {
    /// Creates a filter with all taps at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters one white sample.
    #[inline]
    pub fn process(&mut self, white: f64) -> f64 {
        for (tap, &(decay, scale)) in self.taps.iter_mut().zip(PINK_COEFFS.iter()) {
            *tap = decay * *tap + white * scale;
        }
        let pink = self.taps.iter().sum::<f64>() + white * PINK_WHITE_COEFF;
        self.taps[6] = white * PINK_FINAL_STATE_COEFF;
        (pink * PINK_SCALE).clamp(-1.0, 1.0)
    }

    /// Current tap values.
    pub fn taps(&self) -> &[f64; 7] {
        &self.taps
    }
}

/// Leaky integrator producing brown noise.
#[derive(Debug, Clone, Default)]
pub struct BrownFilter {
    value: f64,
}

impl BrownFilter {
    /// Creates an integrator at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates one white sample.
    #[inline]
    pub fn process(&mut self, white: f64) -> f64 {
        self.value += white * BROWN_STEP;
        self.value = self.value.clamp(-1.0, 1.0) * BROWN_DAMPING;
        self.value
    }

    /// Current running value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A noise colorer with its persistent state.
#[derive(Debug, Clone)]
pub enum Colorer {
    /// Stateless white noise.
    White,
    /// Pink noise.
    Pink(PinkFilter),
    /// Brown noise.
    Brown(BrownFilter),
}

impl Colorer {
    /// Creates a colorer at rest.
    pub fn new(color: NoiseColor) -> Self {
        match color {
            NoiseColor::White => Colorer::White,
            NoiseColor::Pink => Colorer::Pink(PinkFilter::new()),
            NoiseColor::Brown => Colorer::Brown(BrownFilter::new()),
        }
    }

    /// Creates a colorer from a color name.
    pub fn from_name(name: &str) -> AudioResult<Self> {
        NoiseColor::parse(name).map(Self::new)
    }

    /// Color of this colorer.
    pub fn color(&self) -> NoiseColor {
        match self {
            Colorer::White => NoiseColor::White,
            Colorer::Pink(_) => NoiseColor::Pink,
            Colorer::Brown(_) => NoiseColor::Brown,
        }
    }
}

impl SampleSource for Colorer {
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        let white = rng.next_uniform();
        match self {
            Colorer::White => white,
            Colorer::Pink(filter) => filter.process(white),
            Colorer::Brown(filter) => filter.process(white),
        }
    }
}
