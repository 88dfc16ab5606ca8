//! One-pole filters for smoothing noise beds.

use std::f64::consts::TAU;

/// One-pole lowpass: `y += a * (x - y)` with `a = 1 - exp(-2π·fc/fs)`.
#[derive(Debug, Clone)]
pub struct OnePoleLowpass {
    coeff: f64,
    state: f64,
}

impl OnePoleLowpass {
    /// Creates a lowpass with the given cutoff.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        let cutoff = cutoff.clamp(1.0, sample_rate * 0.49);
        Self {
            coeff: 1.0 - (-TAU * cutoff / sample_rate).exp(),
            state: 0.0,
        }
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.state += self.coeff * (input - self.state);
        self.state
    }

    /// Smoothing coefficient `a`.
    pub fn coeff(&self) -> f64 {
        self.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_passes() {
        let mut lp = OnePoleLowpass::new(200.0, 44_100.0);
        let mut out = 0.0;
        for _ in 0..44_100 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nyquist_is_attenuated() {
        let mut lp = OnePoleLowpass::new(200.0, 44_100.0);
        let mut peak: f64 = 0.0;
        for i in 0..44_100 {
            let x = if i % 2 == 0 { 1.0 } else { -1.0 };
            let y = lp.process(x);
            if i > 1000 {
                peak = peak.max(y.abs());
            }
        }
        assert!(peak < 0.05, "peak = {peak}");
    }

    #[test]
    fn test_coefficient_in_unit_interval() {
        for &fc in &[1.0, 200.0, 5000.0, 1e9] {
            let lp = OnePoleLowpass::new(fc, 48_000.0);
            assert!(lp.coeff() > 0.0 && lp.coeff() < 1.0);
        }
    }
}
