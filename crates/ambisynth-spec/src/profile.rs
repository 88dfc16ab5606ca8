//! Normalized sound profiles.
//!
//! A [`Profile`] is the unit a listener selects: which family of generator,
//! which subtype within it, at what volume, and optionally from which seed.
//! Profiles are built from raw documents by [`crate::coerce::coerce_profile`]
//! and are immutable afterwards except for their volume.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Default volume when a document does not specify one.
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Default ambience intensity ("medium").
pub const DEFAULT_INTENSITY: f64 = 0.5;

/// Default profile name.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Generator family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundFamily {
    /// Colored broadband noise.
    #[default]
    Noise,
    /// Textured ambiences built on colored noise.
    Ambient,
}

impl SoundFamily {
    /// All families, in declaration order.
    pub const ALL: [SoundFamily; 2] = [SoundFamily::Noise, SoundFamily::Ambient];

    /// Returns the family name as used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundFamily::Noise => "noise",
            SoundFamily::Ambient => "ambient",
        }
    }

    /// Parses a family name. Matching is case-insensitive.
    pub fn parse(name: &str) -> Result<Self, ProfileError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "noise" => Ok(SoundFamily::Noise),
            "ambient" => Ok(SoundFamily::Ambient),
            _ => Err(ProfileError::UnknownType(name.to_string())),
        }
    }

    /// Subtypes that belong to this family.
    pub fn subtypes(&self) -> &'static [Subtype] {
        match self {
            SoundFamily::Noise => &[Subtype::White, Subtype::Pink, Subtype::Brown],
            SoundFamily::Ambient => &[Subtype::Rain, Subtype::Wind, Subtype::Fan, Subtype::Ocean],
        }
    }

    /// Subtype used when a document names an unknown one.
    pub fn default_subtype(&self) -> Subtype {
        match self {
            SoundFamily::Noise => Subtype::White,
            SoundFamily::Ambient => Subtype::Rain,
        }
    }
}

impl std::fmt::Display for SoundFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete sound within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    /// White noise (flat spectrum).
    White,
    /// Pink noise (-3 dB/octave).
    Pink,
    /// Brown noise (-6 dB/octave).
    Brown,
    /// Rain: pink hiss with droplet bursts.
    Rain,
    /// Wind: brown rumble with slow swells and gusts.
    Wind,
    /// Fan: pink noise with blade-rate tremolo.
    Fan,
    /// Ocean: low-passed noise under a slow wave envelope.
    Ocean,
}

impl Subtype {
    /// All subtypes across both families.
    pub const ALL: [Subtype; 7] = [
        Subtype::White,
        Subtype::Pink,
        Subtype::Brown,
        Subtype::Rain,
        Subtype::Wind,
        Subtype::Fan,
        Subtype::Ocean,
    ];

    /// Returns the subtype name as used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::White => "white",
            Subtype::Pink => "pink",
            Subtype::Brown => "brown",
            Subtype::Rain => "rain",
            Subtype::Wind => "wind",
            Subtype::Fan => "fan",
            Subtype::Ocean => "ocean",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Subtype::White => "White Noise",
            Subtype::Pink => "Pink Noise",
            Subtype::Brown => "Brown Noise",
            Subtype::Rain => "Rain",
            Subtype::Wind => "Wind",
            Subtype::Fan => "Fan",
            Subtype::Ocean => "Ocean Waves",
        }
    }

    /// Family this subtype belongs to.
    pub fn family(&self) -> SoundFamily {
        match self {
            Subtype::White | Subtype::Pink | Subtype::Brown => SoundFamily::Noise,
            Subtype::Rain | Subtype::Wind | Subtype::Fan | Subtype::Ocean => SoundFamily::Ambient,
        }
    }

    /// Looks up a subtype by name, accepting common aliases.
    ///
    /// Returns `None` for unrecognized names; callers decide whether that is
    /// an error or a reason to fall back to a default.
    pub fn lookup(name: &str) -> Option<Self> {
        let normalized = normalize_subtype(name);
        let subtype = match normalized.as_str() {
            "white" => Subtype::White,
            "pink" => Subtype::Pink,
            "brown" | "brownian" | "red" => Subtype::Brown,
            "rain" | "rainfall" => Subtype::Rain,
            "wind" => Subtype::Wind,
            "fan" => Subtype::Fan,
            "ocean" | "waves" | "sea" => Subtype::Ocean,
            _ => return None,
        };
        Some(subtype)
    }

    /// Parses a subtype that must belong to `family`.
    pub fn parse_in(family: SoundFamily, name: &str) -> Result<Self, ProfileError> {
        match Self::lookup(name) {
            Some(subtype) if subtype.family() == family => Ok(subtype),
            _ => Err(ProfileError::UnknownSubtype {
                family: family.as_str().to_string(),
                subtype: name.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a subtype string: trims, lowercases, unifies separators and
/// strips a trailing `_noise` (so "White Noise" and "white-noise" both become
/// "white").
pub fn normalize_subtype(name: &str) -> String {
    let mut normalized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    if let Some(stripped) = normalized.strip_suffix("_noise") {
        normalized = stripped.to_string();
    }
    normalized
}

/// Clamps a value into `[0, 1]`. NaN becomes 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A normalized, validated sound profile.
///
/// Fields are private so the family/subtype invariant and the volume clamp
/// cannot be bypassed; only [`Profile::set_volume`] mutates after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    name: String,
    family: SoundFamily,
    subtype: Subtype,
    volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    intensity: f64,
}

impl Profile {
    /// Creates a profile for `subtype`, deriving the family from it.
    pub fn new(name: impl Into<String>, subtype: Subtype) -> Self {
        Self {
            name: name.into(),
            family: subtype.family(),
            subtype,
            volume: DEFAULT_VOLUME,
            seed: None,
            intensity: DEFAULT_INTENSITY,
        }
    }

    /// Creates a profile from an explicit family and subtype.
    pub fn with_family(
        name: impl Into<String>,
        family: SoundFamily,
        subtype: Subtype,
    ) -> Result<Self, ProfileError> {
        if subtype.family() != family {
            return Err(ProfileError::SubtypeFamilyMismatch {
                subtype: subtype.as_str().to_string(),
                declared: family.as_str().to_string(),
                actual: subtype.family().as_str().to_string(),
            });
        }
        Ok(Self::new(name, subtype))
    }

    /// Sets the volume (clamped).
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.set_volume(volume);
        self
    }

    /// Sets or clears the seed.
    pub fn with_seed(mut self, seed: Option<u32>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the intensity (clamped).
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = clamp_unit(intensity);
        self
    }

    /// Display name; unique within a configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generator family.
    pub fn family(&self) -> SoundFamily {
        self.family
    }

    /// Subtype; always a member of [`Profile::family`].
    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    /// Output gain in `[0, 1]`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Seed for reproducible output; `None` means fresh entropy per stream.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Ambience texture intensity in `[0, 1]`; ignored by noise colors.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Updates the volume in place.
    pub fn set_volume(&mut self, volume: f64) {
        let clamped = clamp_unit(volume);
        if clamped != volume {
            tracing::debug!(profile = %self.name, requested = volume, clamped, "volume clamped");
        }
        self.volume = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        assert_eq!(SoundFamily::parse("noise").unwrap(), SoundFamily::Noise);
        assert_eq!(SoundFamily::parse(" Ambient ").unwrap(), SoundFamily::Ambient);
        assert!(matches!(
            SoundFamily::parse("music"),
            Err(ProfileError::UnknownType(_))
        ));
    }

    #[test]
    fn test_every_subtype_belongs_to_exactly_one_family() {
        for subtype in Subtype::ALL {
            let owners: Vec<_> = SoundFamily::ALL
                .iter()
                .filter(|f| f.subtypes().contains(&subtype))
                .collect();
            assert_eq!(owners.len(), 1, "{subtype} owned by {owners:?}");
            assert_eq!(*owners[0], subtype.family());
        }
    }

    #[test]
    fn test_subtype_aliases() {
        assert_eq!(Subtype::lookup("White Noise"), Some(Subtype::White));
        assert_eq!(Subtype::lookup("brown_noise"), Some(Subtype::Brown));
        assert_eq!(Subtype::lookup("Brownian"), Some(Subtype::Brown));
        assert_eq!(Subtype::lookup("waves"), Some(Subtype::Ocean));
        assert_eq!(Subtype::lookup("PINK"), Some(Subtype::Pink));
        assert_eq!(Subtype::lookup("bogus"), None);
    }

    #[test]
    fn test_parse_in_rejects_other_family() {
        assert_eq!(
            Subtype::parse_in(SoundFamily::Ambient, "fan").unwrap(),
            Subtype::Fan
        );
        assert!(Subtype::parse_in(SoundFamily::Noise, "fan").is_err());
        assert!(Subtype::parse_in(SoundFamily::Noise, "violet").is_err());
    }

    #[test]
    fn test_profile_clamps_volume_and_intensity() {
        let profile = Profile::new("loud", Subtype::Pink)
            .with_volume(1.7)
            .with_intensity(-0.2);
        assert_eq!(profile.volume(), 1.0);
        assert_eq!(profile.intensity(), 0.0);

        let quiet = Profile::new("nan", Subtype::Pink).with_volume(f64::NAN);
        assert_eq!(quiet.volume(), 0.0);
    }

    #[test]
    fn test_with_family_mismatch() {
        let err = Profile::with_family("x", SoundFamily::Noise, Subtype::Rain).unwrap_err();
        assert_eq!(err.code(), "P003");
    }
}
