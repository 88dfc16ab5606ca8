//! Ambience synthesizers.
//!
//! Each texture composes a noise colorer with periodic or stochastic
//! modulation. Tuning constants are expressed as low/medium/high triples and
//! interpolated by the profile's intensity; medium is the default texture.

mod fan;
mod ocean;
mod rain;
mod wind;

pub use fan::Fan;
pub use ocean::Ocean;
pub use rain::Rain;
pub use wind::Wind;

/// A tuning constant at low, medium and high intensity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tuning {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Tuning {
    pub(crate) const fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    /// Piecewise-linear interpolation: 0 -> low, 0.5 -> medium, 1 -> high.
    pub(crate) fn at(&self, intensity: f64) -> f64 {
        let t = intensity.clamp(0.0, 1.0);
        if t < 0.5 {
            self.low + (self.medium - self.low) * (t * 2.0)
        } else {
            self.medium + (self.high - self.medium) * ((t - 0.5) * 2.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_endpoints() {
        let tuning = Tuning::new(8.0, 12.0, 16.0);
        assert_eq!(tuning.at(0.0), 8.0);
        assert_eq!(tuning.at(0.5), 12.0);
        assert_eq!(tuning.at(1.0), 16.0);
        assert_eq!(tuning.at(0.25), 10.0);
        assert_eq!(tuning.at(7.0), 16.0);
    }
}
