//! Wind: brown rumble with a slow swell and occasional gusts.

use std::f64::consts::PI;

use crate::modulation::Lfo;
use crate::rng::SampleRng;
use crate::synthesis::noise::BrownFilter;
use crate::synthesis::SampleSource;

use super::Tuning;

/// Make-up gain bringing the brown walk up to a usable level.
pub const MAKEUP_GAIN: f64 = 3.0;

/// Peak multiplier reached in the middle of a gust.
pub const GUST_PEAK: f64 = 1.5;

/// Swell rate in Hz.
const SWELL_RATE: Tuning = Tuning::new(0.05, 0.1, 0.2);

/// Swell depth.
const SWELL_DEPTH: Tuning = Tuning::new(0.2, 0.3, 0.5);

/// Expected gusts per second, not per sample; divided by the sample rate
/// to get the per-sample onset chance.
const GUST_RATE: Tuning = Tuning::new(0.1, 0.2, 0.4);

/// Gust duration range in seconds.
const GUST_SECONDS: (f64, f64) = (1.0, 3.0);

#[derive(Debug, Clone)]
struct Gust {
    age: u64,
    length: u64,
}

impl Gust {
    /// Half-sine rising from 1.0 to `GUST_PEAK` and back.
    fn gain(&self) -> f64 {
        let t = self.age as f64 / self.length as f64;
        1.0 + (GUST_PEAK - 1.0) * (PI * t).sin()
    }
}

/// Wind synthesizer.
#[derive(Debug, Clone)]
pub struct Wind {
    base: BrownFilter,
    swell: Lfo,
    depth: f64,
    gust: Option<Gust>,
    gust_probability: f64,
    sample_rate: f64,
}

impl Wind {
    /// Creates a wind texture at the given intensity.
    pub fn new(intensity: f64, sample_rate: f64) -> Self {
        Self {
            base: BrownFilter::new(),
            swell: Lfo::new(SWELL_RATE.at(intensity), sample_rate, 0.0),
            depth: SWELL_DEPTH.at(intensity),
            gust: None,
            gust_probability: GUST_RATE.at(intensity) / sample_rate,
            sample_rate,
        }
    }

    /// Whether a gust is currently in flight.
    pub fn gusting(&self) -> bool {
        self.gust.is_some()
    }

    fn next_gust_gain(&mut self, rng: &mut SampleRng) -> f64 {
        if self.gust.is_none() && rng.chance(self.gust_probability) {
            let seconds = rng.next_range(GUST_SECONDS.0, GUST_SECONDS.1);
            self.gust = Some(Gust {
                age: 0,
                length: ((seconds * self.sample_rate) as u64).max(1),
            });
        }

        match &mut self.gust {
            Some(gust) => {
                let gain = gust.gain();
                gust.age += 1;
                if gust.age >= gust.length {
                    self.gust = None;
                }
                gain
            }
            None => 1.0,
        }
    }
}

impl SampleSource for Wind {
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        let rumble = self.base.process(rng.next_uniform()) * MAKEUP_GAIN;
        let swell = self.swell.next_gain(self.depth);
        let gust = self.next_gust_gain(rng);
        (rumble * swell * gust).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gust_envelope_shape() {
        let gust = Gust { age: 0, length: 100 };
        assert!((gust.gain() - 1.0).abs() < 1e-12);
        let mid = Gust { age: 50, length: 100 };
        assert!((mid.gain() - GUST_PEAK).abs() < 1e-12);
    }

    #[test]
    fn test_gust_rate_is_per_second() {
        assert_eq!(Wind::new(0.5, 44_100.0).gust_probability, 0.2 / 44_100.0);
        assert_eq!(Wind::new(0.5, 8_000.0).gust_probability, 0.2 / 8_000.0);
        assert_eq!(Wind::new(1.0, 8_000.0).gust_probability, 0.4 / 8_000.0);
    }

    #[test]
    fn test_gusts_occur_and_end() {
        let sample_rate = 8_000.0;
        let mut wind = Wind::new(1.0, sample_rate);
        let mut rng = SampleRng::seeded(4);
        let mut gust_samples = 0usize;
        let mut longest_run = 0usize;
        let mut run = 0usize;
        for _ in 0..(sample_rate as usize * 60) {
            wind.next_sample(&mut rng);
            if wind.gusting() {
                gust_samples += 1;
                run += 1;
                longest_run = longest_run.max(run);
            } else {
                run = 0;
            }
        }
        assert!(gust_samples > 0, "no gust in a minute at high intensity");
        assert!(longest_run <= (GUST_SECONDS.1 * sample_rate) as usize);
    }

    #[test]
    fn test_output_in_range() {
        let mut wind = Wind::new(0.5, 44_100.0);
        let mut rng = SampleRng::seeded(5);
        for _ in 0..50_000 {
            let s = wind.next_sample(&mut rng);
            assert!((-1.0..=1.0).contains(&s));
        }
    }
}
