//! Generator dispatch and factory.
//!
//! A [`Generator`] binds one synthesis voice to its own entropy source. The
//! voice is a tagged enum so dispatch is an exhaustive `match`; adding a
//! subtype without wiring it here is a compile error.

use ambisynth_spec::{
    Profile, SoundFamily, Subtype, DEFAULT_INTENSITY, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};

use crate::chunk::ChunkProducer;
use crate::error::{AudioError, AudioResult};
use crate::rng::SampleRng;
use crate::synthesis::ambience::{Fan, Ocean, Rain, Wind};
use crate::synthesis::noise::{Colorer, NoiseColor};
use crate::synthesis::SampleSource;

/// Sample rate used by [`create_generator`].
pub const STREAM_SAMPLE_RATE: u32 = 44_100;

/// Synthesis voice for one subtype, with its persistent state.
#[derive(Debug, Clone)]
pub enum Voice {
    /// White, pink or brown noise.
    Noise(Colorer),
    /// Rain ambience.
    Rain(Rain),
    /// Wind ambience.
    Wind(Wind),
    /// Fan ambience.
    Fan(Fan),
    /// Ocean ambience.
    Ocean(Ocean),
}

impl Voice {
    /// Creates the voice for `subtype`. Construction-time randomness (ocean
    /// wave phases) is drawn from `rng`.
    pub fn new(subtype: Subtype, intensity: f64, sample_rate: f64, rng: &mut SampleRng) -> Self {
        match subtype {
            Subtype::White => Voice::Noise(Colorer::new(NoiseColor::White)),
            Subtype::Pink => Voice::Noise(Colorer::new(NoiseColor::Pink)),
            Subtype::Brown => Voice::Noise(Colorer::new(NoiseColor::Brown)),
            Subtype::Rain => Voice::Rain(Rain::new(intensity)),
            Subtype::Wind => Voice::Wind(Wind::new(intensity, sample_rate)),
            Subtype::Fan => Voice::Fan(Fan::new(intensity, sample_rate)),
            Subtype::Ocean => Voice::Ocean(Ocean::new(intensity, sample_rate, rng)),
        }
    }
}

impl SampleSource for Voice {
    #[inline]
    fn next_sample(&mut self, rng: &mut SampleRng) -> f64 {
        match self {
            Voice::Noise(colorer) => colorer.next_sample(rng),
            Voice::Rain(rain) => rain.next_sample(rng),
            Voice::Wind(wind) => wind.next_sample(rng),
            Voice::Fan(fan) => fan.next_sample(rng),
            Voice::Ocean(ocean) => ocean.next_sample(rng),
        }
    }
}

/// A voice bound to its own RNG.
#[derive(Debug, Clone)]
pub struct Generator {
    subtype: Subtype,
    voice: Voice,
    rng: SampleRng,
}

impl Generator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `subtype` - Sound to synthesize
    /// * `intensity` - Ambience texture in `[0, 1]`; ignored by noise colors
    /// * `sample_rate` - Output sample rate in Hz
    /// * `seed` - Seed for reproducible output, or `None` for fresh entropy
    pub fn new(subtype: Subtype, intensity: f64, sample_rate: u32, seed: Option<u32>) -> Self {
        let mut rng = SampleRng::from_seed(seed);
        let voice = Voice::new(subtype, intensity, sample_rate as f64, &mut rng);
        tracing::debug!(%subtype, intensity, sample_rate, ?seed, "generator created");
        Self { subtype, voice, rng }
    }

    /// Creates the generator described by a profile.
    pub fn from_profile(profile: &Profile, sample_rate: u32) -> Self {
        Self::new(profile.subtype(), profile.intensity(), sample_rate, profile.seed())
    }

    /// Subtype this generator synthesizes.
    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    /// Next raw sample, before volume.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        self.voice.next_sample(&mut self.rng)
    }
}

/// Checks a stream sample rate.
pub fn validate_sample_rate(sample_rate: u32) -> AudioResult<()> {
    if (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        Ok(())
    } else {
        Err(AudioError::InvalidSampleRate { rate: sample_rate })
    }
}

/// Creates a chunk producer from loosely typed family and subtype names at
/// [`STREAM_SAMPLE_RATE`].
///
/// Unlike profile coercion, nothing falls back to a default here: an unknown
/// family is [`AudioError::UnknownType`], and a subtype that the family does
/// not own is [`AudioError::UnknownSubtype`].
///
/// # Example
///
/// ```
/// use ambisynth_backend_audio::create_generator;
///
/// let mut producer = create_generator("noise", "pink", 0.5, Some(42)).unwrap();
/// let chunk = producer.next_chunk(22_050);
/// assert_eq!(chunk.len(), 44_100);
///
/// assert!(create_generator("music", "pink", 0.5, None).is_err());
/// assert!(create_generator("noise", "rain", 0.5, None).is_err());
/// ```
pub fn create_generator(
    profile_type: &str,
    subtype: &str,
    volume: f64,
    seed: Option<u32>,
) -> AudioResult<ChunkProducer> {
    create_generator_at(profile_type, subtype, volume, seed, STREAM_SAMPLE_RATE)
}

/// Same as [`create_generator`] at an explicit sample rate.
pub fn create_generator_at(
    profile_type: &str,
    subtype: &str,
    volume: f64,
    seed: Option<u32>,
    sample_rate: u32,
) -> AudioResult<ChunkProducer> {
    validate_sample_rate(sample_rate)?;
    let family = SoundFamily::parse(profile_type)
        .map_err(|_| AudioError::UnknownType(profile_type.to_string()))?;
    let subtype = Subtype::parse_in(family, subtype)
        .map_err(|_| AudioError::unknown_subtype(family.as_str(), subtype))?;

    let generator = Generator::new(subtype, DEFAULT_INTENSITY, sample_rate, seed);
    Ok(ChunkProducer::new(generator, volume, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_errors() {
        assert!(matches!(
            create_generator("music", "pink", 0.5, None),
            Err(AudioError::UnknownType(t)) if t == "music"
        ));
        assert!(matches!(
            create_generator("noise", "violet", 0.5, None),
            Err(AudioError::UnknownSubtype { family, subtype }) if family == "noise" && subtype == "violet"
        ));
        // Known subtype in the wrong family is still unknown for that family.
        assert!(matches!(
            create_generator("ambient", "pink", 0.5, None),
            Err(AudioError::UnknownSubtype { .. })
        ));
    }

    #[test]
    fn test_factory_accepts_every_subtype() {
        for subtype in Subtype::ALL {
            let producer =
                create_generator(subtype.family().as_str(), subtype.as_str(), 0.5, Some(1)).unwrap();
            assert_eq!(producer.subtype(), subtype);
        }
    }

    #[test]
    fn test_factory_rejects_bad_sample_rate() {
        assert!(matches!(
            create_generator_at("noise", "white", 0.5, None, 100),
            Err(AudioError::InvalidSampleRate { rate: 100 })
        ));
    }

    #[test]
    fn test_seeded_generators_match() {
        for subtype in Subtype::ALL {
            let mut a = Generator::new(subtype, 0.5, 44_100, Some(77));
            let mut b = Generator::new(subtype, 0.5, 44_100, Some(77));
            let va: Vec<f64> = (0..2000).map(|_| a.next_sample()).collect();
            let vb: Vec<f64> = (0..2000).map(|_| b.next_sample()).collect();
            assert_eq!(va, vb, "{subtype} not reproducible");
        }
    }

    #[test]
    fn test_from_profile_uses_profile_fields() {
        let profile = Profile::new("Night", Subtype::Ocean).with_seed(Some(3));
        let generator = Generator::from_profile(&profile, 22_050);
        assert_eq!(generator.subtype(), Subtype::Ocean);
    }
}
