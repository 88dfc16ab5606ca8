//! Raw profile documents and their normalization.
//!
//! Profile documents come from user configuration and are loosely typed:
//! the family may be missing, the subtype may use an alias or be unknown,
//! and numeric parameters may arrive as strings. [`coerce_profile`] turns a
//! [`RawProfile`] into a validated [`Profile`] exactly once, at load time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProfileError;
use crate::profile::{
    Profile, SoundFamily, Subtype, DEFAULT_INTENSITY, DEFAULT_PROFILE_NAME,
    DEFAULT_VOLUME,
};
use crate::seed::{is_empty_seed, resolve_seed};

/// A profile as written in a configuration document.
///
/// ```json
/// {
///   "name": "Bedroom",
///   "type": "noise",
///   "subtype": "pink",
///   "parameters": { "volume": 0.4, "seed": 42 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    /// Profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Family name (`noise` or `ambient`); inferred from the subtype if absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    /// Subtype name, aliases allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Generator parameters.
    #[serde(default)]
    pub parameters: RawParameters,
}

/// Loosely typed generator parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParameters {
    /// Volume, number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Value>,
    /// Seed, integer or string; empty strings mean "unset".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Value>,
    /// Ambience intensity, number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Value>,
    /// Parameters this crate does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawProfile {
    /// Creates a raw profile with a name, type and subtype.
    pub fn new(name: &str, profile_type: &str, subtype: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            profile_type: Some(profile_type.to_string()),
            subtype: Some(subtype.to_string()),
            parameters: RawParameters::default(),
        }
    }

    /// Sets the raw volume.
    pub fn volume(mut self, volume: f64) -> Self {
        self.parameters.volume = Some(Value::from(volume));
        self
    }

    /// Sets the raw seed.
    pub fn seed(mut self, seed: impl Into<Value>) -> Self {
        self.parameters.seed = Some(seed.into());
        self
    }

    /// Parses a raw profile from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, ProfileError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Reads a number from a loosely typed value.
fn number_param(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Resolves the family and subtype of a raw profile.
fn resolve_kind(raw: &RawProfile) -> Result<(SoundFamily, Subtype), ProfileError> {
    let subtype = raw.subtype.as_deref().and_then(Subtype::lookup);

    let declared = match raw.profile_type.as_deref() {
        Some(name) => match SoundFamily::parse(name) {
            Ok(family) => Some(family),
            Err(_) => {
                tracing::warn!(profile_type = name, "unknown profile type, inferring from subtype");
                None
            }
        },
        None => None,
    };

    let family = declared
        .or_else(|| subtype.map(|s| s.family()))
        .unwrap_or_default();

    match subtype {
        Some(subtype) if subtype.family() == family => Ok((family, subtype)),
        Some(subtype) => Err(ProfileError::SubtypeFamilyMismatch {
            subtype: subtype.as_str().to_string(),
            declared: family.as_str().to_string(),
            actual: subtype.family().as_str().to_string(),
        }),
        None => {
            let fallback = family.default_subtype();
            if let Some(name) = raw.subtype.as_deref() {
                tracing::debug!(subtype = name, fallback = %fallback, "unknown subtype replaced by default");
            }
            Ok((family, fallback))
        }
    }
}

/// Normalizes a raw profile into a validated [`Profile`].
///
/// - volume and intensity are clamped to `[0, 1]` (defaults when absent or
///   unparseable)
/// - a missing or unknown `type` is inferred from the subtype, falling back
///   to the noise family
/// - an unknown subtype is replaced by the family's default subtype
/// - a known subtype that contradicts a declared family is rejected
/// - an empty seed is dropped
pub fn coerce_profile(raw: &RawProfile) -> Result<Profile, ProfileError> {
    let (family, subtype) = resolve_kind(raw)?;
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PROFILE_NAME);

    let params = &raw.parameters;
    let volume = number_param(params.volume.as_ref()).unwrap_or(DEFAULT_VOLUME);
    let intensity = number_param(params.intensity.as_ref()).unwrap_or(DEFAULT_INTENSITY);
    let seed = params.seed.as_ref().and_then(resolve_seed);

    Ok(Profile::with_family(name, family, subtype)?
        .with_volume(volume)
        .with_intensity(intensity)
        .with_seed(seed))
}

/// Normalizes a raw profile but keeps it in document form.
///
/// This is what gets written back to configuration storage: the family and
/// subtype are canonical names, the volume is clamped, an empty seed key is
/// removed and unrecognized parameters are preserved.
pub fn coerce_raw_profile(raw: &RawProfile) -> Result<RawProfile, ProfileError> {
    let profile = coerce_profile(raw)?;
    let mut parameters = raw.parameters.clone();

    parameters.volume = Some(Value::from(profile.volume()));
    if parameters.intensity.is_some() {
        parameters.intensity = Some(Value::from(profile.intensity()));
    }
    if parameters.seed.as_ref().is_some_and(is_empty_seed) {
        parameters.seed = None;
    }

    Ok(RawProfile {
        name: Some(profile.name().to_string()),
        profile_type: Some(profile.family().as_str().to_string()),
        subtype: Some(profile.subtype().as_str().to_string()),
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: Value) -> RawProfile {
        RawProfile::from_value(value).unwrap()
    }

    #[test]
    fn test_bogus_subtype_and_loud_volume() {
        let profile = coerce_profile(&raw(json!({
            "subtype": "bogus",
            "parameters": { "volume": 1.4 }
        })))
        .unwrap();
        assert_eq!(profile.family(), SoundFamily::Noise);
        assert_eq!(profile.subtype(), SoundFamily::Noise.default_subtype());
        assert_eq!(profile.volume(), 1.0);
    }

    #[test]
    fn test_empty_seed_is_dropped() {
        let input = raw(json!({ "parameters": { "seed": "" } }));
        let profile = coerce_profile(&input).unwrap();
        assert_eq!(profile.seed(), None);

        let normalized = coerce_raw_profile(&input).unwrap();
        assert_eq!(normalized.parameters.seed, None);
        let value = serde_json::to_value(&normalized).unwrap();
        assert!(value["parameters"].get("seed").is_none());
    }

    #[test]
    fn test_family_inferred_from_subtype() {
        let profile = coerce_profile(&raw(json!({ "subtype": "Wind" }))).unwrap();
        assert_eq!(profile.family(), SoundFamily::Ambient);
        assert_eq!(profile.subtype(), Subtype::Wind);
        assert_eq!(profile.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn test_unknown_type_is_inferred() {
        let profile = coerce_profile(&raw(json!({ "type": "music", "subtype": "fan" }))).unwrap();
        assert_eq!(profile.family(), SoundFamily::Ambient);
    }

    #[test]
    fn test_ambient_with_unknown_subtype_gets_ambient_default() {
        let profile =
            coerce_profile(&raw(json!({ "type": "ambient", "subtype": "forest" }))).unwrap();
        assert_eq!(profile.subtype(), Subtype::Rain);
    }

    #[test]
    fn test_declared_family_mismatch_is_rejected() {
        let err = coerce_profile(&raw(json!({ "type": "noise", "subtype": "rain" }))).unwrap_err();
        assert!(matches!(err, ProfileError::SubtypeFamilyMismatch { .. }));
    }

    #[test]
    fn test_numeric_strings_and_negative_volume() {
        let profile = coerce_profile(&raw(json!({
            "subtype": "pink",
            "parameters": { "volume": "-0.3", "seed": "7", "intensity": "0.9" }
        })))
        .unwrap();
        assert_eq!(profile.volume(), 0.0);
        assert_eq!(profile.seed(), Some(7));
        assert_eq!(profile.intensity(), 0.9);
    }

    #[test]
    fn test_raw_round_trip_keeps_extra_parameters() {
        let input = raw(json!({
            "name": "Study",
            "subtype": "brown_noise",
            "parameters": { "volume": 2, "seed": 99, "fade_in": 3 }
        }));
        let normalized = coerce_raw_profile(&input).unwrap();
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({
                "name": "Study",
                "type": "noise",
                "subtype": "brown",
                "parameters": { "volume": 1.0, "seed": 99, "fade_in": 3 }
            })
        );
    }

    #[test]
    fn test_default_name() {
        let profile = coerce_profile(&RawProfile::default()).unwrap();
        assert_eq!(profile.name(), DEFAULT_PROFILE_NAME);
        assert_eq!(profile.subtype(), Subtype::White);
    }
}
