//! Low-frequency modulation sources.
//!
//! Phases are kept in cycles (`[0, 1)`) and wrapped every step so that
//! streams running for days do not lose precision.

use std::f64::consts::TAU;

/// Phase accumulator advancing by `frequency / sample_rate` cycles per step.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    increment: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at `initial_phase` cycles.
    pub fn new(frequency: f64, sample_rate: f64, initial_phase: f64) -> Self {
        Self {
            phase: initial_phase.rem_euclid(1.0),
            increment: frequency / sample_rate,
        }
    }

    /// Advances one sample and returns the new phase in cycles.
    #[inline]
    pub fn advance(&mut self) -> f64 {
        self.phase = (self.phase + self.increment).rem_euclid(1.0);
        self.phase
    }

    /// Current phase in cycles.
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

/// Sine LFO.
///
/// Each step advances the phase first, then returns `sin(2π·phase)`.
#[derive(Debug, Clone)]
pub struct Lfo {
    phase: PhaseAccumulator,
}

impl Lfo {
    /// Creates a sine LFO.
    ///
    /// # Arguments
    /// * `rate` - LFO rate in Hz
    /// * `sample_rate` - Audio sample rate
    /// * `initial_phase` - Initial phase offset in cycles
    pub fn new(rate: f64, sample_rate: f64, initial_phase: f64) -> Self {
        Self {
            phase: PhaseAccumulator::new(rate, sample_rate, initial_phase),
        }
    }

    /// Next LFO value in `[-1, 1]`.
    #[inline]
    pub fn next_value(&mut self) -> f64 {
        (TAU * self.phase.advance()).sin()
    }

    /// Tremolo gain `1 + depth * sin(2π·phase)`.
    #[inline]
    pub fn next_gain(&mut self, depth: f64) -> f64 {
        1.0 + depth * self.next_value()
    }
}
