//! Synthesizer configuration documents.
//!
//! A configuration is a JSON document holding the stream format and the
//! list of profiles a user has defined:
//!
//! ```json
//! {
//!   "sample_rate": 44100,
//!   "chunk_seconds": 0.5,
//!   "profiles": [
//!     { "name": "Bedroom", "subtype": "pink", "parameters": { "volume": 0.4 } }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coerce::{coerce_profile, RawProfile};
use crate::error::ProfileError;
use crate::profile::Profile;

/// Default stream sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default chunk duration in seconds.
pub const DEFAULT_CHUNK_SECONDS: f64 = 0.5;

/// Lowest accepted sample rate.
pub const MIN_SAMPLE_RATE: u32 = 8_000;

/// Highest accepted sample rate.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Longest accepted chunk duration in seconds.
pub const MAX_CHUNK_SECONDS: f64 = 10.0;

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_chunk_seconds() -> f64 {
    DEFAULT_CHUNK_SECONDS
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Stream sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Duration of one pulled chunk in seconds.
    #[serde(default = "default_chunk_seconds")]
    pub chunk_seconds: f64,
    /// User-defined profiles.
    #[serde(default)]
    pub profiles: Vec<RawProfile>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            chunk_seconds: DEFAULT_CHUNK_SECONDS,
            profiles: Vec::new(),
        }
    }
}

impl SynthConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let config: SynthConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the stream format fields.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(ProfileError::invalid_config(
                "sample_rate",
                format!(
                    "{} Hz is outside {}..={} Hz",
                    self.sample_rate, MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
                ),
            ));
        }
        if !(self.chunk_seconds > 0.0 && self.chunk_seconds <= MAX_CHUNK_SECONDS) {
            return Err(ProfileError::invalid_config(
                "chunk_seconds",
                format!(
                    "{} s is outside (0, {}] s",
                    self.chunk_seconds, MAX_CHUNK_SECONDS
                ),
            ));
        }
        Ok(())
    }

    /// Number of samples in one chunk at this configuration's rate.
    pub fn chunk_samples(&self) -> usize {
        (self.chunk_seconds * self.sample_rate as f64).round().max(1.0) as usize
    }

    /// Coerces every profile, rejecting duplicate names.
    pub fn profiles(&self) -> Result<Vec<Profile>, ProfileError> {
        let mut seen = HashSet::new();
        let mut profiles = Vec::with_capacity(self.profiles.len());
        for raw in &self.profiles {
            let profile = coerce_profile(raw)?;
            if !seen.insert(profile.name().to_string()) {
                return Err(ProfileError::DuplicateProfile(profile.name().to_string()));
            }
            profiles.push(profile);
        }
        Ok(profiles)
    }

    /// Coerces the profile with the given name.
    pub fn profile(&self, name: &str) -> Result<Profile, ProfileError> {
        self.profiles()?
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
    }
}
