//! Ocean: a low-passed gaussian noise bed under a slow multi-sine wave
//! envelope.

use std::f64::consts::TAU;

use crate::filter::OnePoleLowpass;
use crate::modulation::PhaseAccumulator;
use crate::rng::SampleRng;
use crate::synthesis::SampleSource;

use super::Tuning;

/// Wave components as (frequency Hz, weight).
pub const WAVES: [(f64, f64); 4] = [(0.1, 0.4), (0.15, 0.3), (0.22, 0.2), (0.28, 0.1)];

/// Constant floor added under the wave envelope.
pub const BACKGROUND: f64 = 0.2;

/// Cutoff of the noise bed lowpass in Hz.
pub const BED_CUTOFF: f64 = 200.0;

/// Make-up gain for the low-passed bed.
pub const BED_GAIN: f64 = 2.5;

/// Multiplier on every wave frequency.
const SWELL_SPEED: Tuning = Tuning::new(0.75, 1.0, 1.25);

/// Ocean synthesizer.
#[derive(Debug, Clone)]
pub struct Ocean {
    waves: Vec<(PhaseAccumulator, f64)>,
    total_weight: f64,
    bed: OnePoleLowpass,
}

impl Ocean {
    /// Creates an ocean texture. Wave phase offsets are drawn from `rng`
    /// once, here.
    pub fn new(intensity: f64, sample_rate: f64, rng: &mut SampleRng) -> Self {
        let speed = SWELL_SPEED.at(intensity);
        let waves: Vec<(PhaseAccumulator, f64)> = WAVES
            .iter()
            .map(|&(freq, weight)| {
                let offset = rng.next_unit();
                (PhaseAccumulator::new(freq * speed, sample_rate, offset), weight)
            })
            .collect();
        Self {
            total_weight: WAVES.iter().map(|&(_, w)| w).sum(),
            waves,
            bed: OnePoleLowpass::new(BED_CUTOFF, sample_rate),
        }
    }

    /// Wave envelope in `[0, 1]` for the next sample.
    fn next_envelope(&mut self) -> f64 {
        let wave: f64 = self
            .waves
            .iter_mut()
            .map(|(phase, weight)| *weight * (TAU * phase.advance()).sin())
            .sum();
        (wave + self.total_weight) / (2.0 * self.total_weight)
    }
}

impl SampleSource for Ocean {
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        let bed = self.bed.process(rng.next_gaussian()) * BED_GAIN;
        let envelope = self.next_envelope();
        (bed * (envelope + BACKGROUND) / (1.0 + BACKGROUND)).clamp(-1.0, 1.0)
    }
}
