//! Per-sample synthesis algorithms.
//!
//! - `noise` - White/pink/brown colorers with persistent filter state
//! - `ambience` - Rain, wind, fan and ocean textures built on the colorers

pub mod ambience;
pub mod noise;

use crate::rng::SampleRng;

/// Common trait for streaming sample sources.
///
/// Implementors produce one normalized sample per call and keep whatever
/// state they need between calls. Splitting a run of calls across chunk
/// boundaries must not change the output.
pub trait SampleSource {
    /// Generates the next sample, nominally in `[-1.0, 1.0]`.
    ///
    /// # Arguments
    /// * `rng` - The generator's own entropy source
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64;
}
