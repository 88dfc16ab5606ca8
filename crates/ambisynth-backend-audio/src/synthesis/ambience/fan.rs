//! Fan: pink noise under a blade-rate tremolo.

use crate::modulation::Lfo;
use crate::rng::SampleRng;
use crate::synthesis::noise::PinkFilter;
use crate::synthesis::SampleSource;

use super::Tuning;

/// Blade rate in Hz.
const BLADE_RATE: Tuning = Tuning::new(8.0, 12.0, 16.0);

/// Tremolo depth.
const BLADE_DEPTH: Tuning = Tuning::new(0.05, 0.08, 0.10);

/// Fan synthesizer.
#[derive(Debug, Clone)]
pub struct Fan {
    hum: PinkFilter,
    blades: Lfo,
    depth: f64,
}

impl Fan {
    /// Creates a fan texture at the given intensity.
    pub fn new(intensity: f64, sample_rate: f64) -> Self {
        Self {
            hum: PinkFilter::new(),
            blades: Lfo::new(BLADE_RATE.at(intensity), sample_rate, 0.0),
            depth: BLADE_DEPTH.at(intensity),
        }
    }

    /// Tremolo depth in use.
    pub fn depth(&self) -> f64 {
        self.depth
    }
}

impl SampleSource for Fan {
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        let hum = self.hum.process(rng.next_uniform());
        (hum * self.blades.next_gain(self.depth)).clamp(-1.0, 1.0)
    }
}
