//! Rain: pink hiss with short decaying droplet bursts.

use crate::rng::SampleRng;
use crate::synthesis::noise::PinkFilter;
use crate::synthesis::SampleSource;

use super::Tuning;

/// Gain applied to the pink hiss bed.
pub const HISS_GAIN: f64 = 0.3;

/// Per-sample probability of a droplet starting.
const DROP_PROBABILITY: Tuning = Tuning::new(0.005, 0.01, 0.02);

/// Multiplier on droplet amplitude.
const DROP_GAIN: Tuning = Tuning::new(0.5, 1.0, 1.5);

/// Droplet amplitude range before intensity scaling.
const DROP_AMPLITUDE: (f64, f64) = (0.1, 0.3);

/// Droplet length range in samples (inclusive).
const DROP_LENGTH: (u32, u32) = (10, 50);

/// Exponent of the droplet envelope `exp(-DECAY * t / len)`.
const DROP_DECAY: f64 = 5.0;

#[derive(Debug, Clone)]
struct Droplet {
    amplitude: f64,
    length: u32,
    age: u32,
}

impl Droplet {
    fn envelope(&self) -> f64 {
        (-DROP_DECAY * self.age as f64 / self.length as f64).exp()
    }
}

/// Rain synthesizer.
#[derive(Debug, Clone)]
pub struct Rain {
    hiss: PinkFilter,
    drops: Vec<Droplet>,
    drop_probability: f64,
    drop_gain: f64,
}

impl Rain {
    /// Creates a rain texture at the given intensity.
    pub fn new(intensity: f64) -> Self {
        Self {
            hiss: PinkFilter::new(),
            drops: Vec::new(),
            drop_probability: DROP_PROBABILITY.at(intensity),
            drop_gain: DROP_GAIN.at(intensity),
        }
    }

    /// Number of droplets currently sounding.
    pub fn active_drops(&self) -> usize {
        self.drops.len()
    }

    fn spawn_drop(&mut self, rng: &mut SampleRng) {
        let amplitude = rng.next_range(DROP_AMPLITUDE.0, DROP_AMPLITUDE.1) * self.drop_gain;
        let span = (DROP_LENGTH.1 - DROP_LENGTH.0 + 1) as f64;
        let length = DROP_LENGTH.0 + ((rng.next_unit() * span) as u32).min(DROP_LENGTH.1 - DROP_LENGTH.0);
        self.drops.push(Droplet {
            amplitude,
            length,
            age: 0,
        });
    }
}

impl SampleSource for Rain {
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        let mut out = self.hiss.process(rng.next_uniform()) * HISS_GAIN;

        if rng.chance(self.drop_probability) {
            self.spawn_drop(rng);
        }

        for drop in &mut self.drops {
            out += drop.amplitude * drop.envelope() * rng.next_uniform();
            drop.age += 1;
        }
        self.drops.retain(|drop| drop.age < drop.length);

        out.clamp(-1.0, 1.0)
    }
}
