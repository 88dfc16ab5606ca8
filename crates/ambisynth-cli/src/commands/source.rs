//! Profile selection shared by `render`, `stream` and `analyze`.
//!
//! A profile comes either from a configuration file (`--config` plus
//! `--profile`) or is built ad hoc from `--type`/`--subtype`. Ad hoc profiles
//! go through the same coercion as configuration documents.

use std::path::Path;

use ambisynth_spec::{
    coerce_profile, resolve_seed, Profile, RawProfile, SynthConfig, DEFAULT_SAMPLE_RATE,
};
use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

/// Name given to profiles built from command-line flags.
pub const AD_HOC_PROFILE_NAME: &str = "ad-hoc";

/// Where to take the profile from.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ProfileArgs {
    /// Path to a configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Name of the profile to use from the configuration file
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Generator family for an ad hoc profile (noise or ambient)
    #[arg(long = "type")]
    pub profile_type: Option<String>,

    /// Subtype for an ad hoc profile (white, pink, brown, rain, wind, fan, ocean)
    #[arg(short, long)]
    pub subtype: Option<String>,

    /// Output volume in [0, 1]; overrides the profile's volume
    #[arg(long)]
    pub volume: Option<f64>,

    /// Seed (integer or any string); overrides the profile's seed
    #[arg(long)]
    pub seed: Option<String>,

    /// Ambience intensity in [0, 1] (ad hoc profiles only)
    #[arg(long)]
    pub intensity: Option<f64>,

    /// Sample rate in Hz; overrides the configuration
    #[arg(long)]
    pub sample_rate: Option<u32>,
}

/// A resolved profile with its stream format.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    /// The normalized profile.
    pub profile: Profile,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Chunk duration in seconds.
    pub chunk_seconds: f64,
}

impl ResolvedProfile {
    /// Samples per chunk.
    pub fn chunk_samples(&self) -> usize {
        (self.chunk_seconds * self.sample_rate as f64).round().max(1.0) as usize
    }
}

impl ProfileArgs {
    /// Resolves the selected profile.
    pub fn resolve(&self) -> Result<ResolvedProfile> {
        match &self.config {
            Some(path) => self.resolve_from_config(path),
            None => self.resolve_ad_hoc(),
        }
    }

    fn resolve_from_config(&self, path: &str) -> Result<ResolvedProfile> {
        let mut config = SynthConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?;

        let profile = match self.profile.as_deref() {
            Some(name) => config
                .profile(name)
                .with_context(|| format!("Failed to select profile '{}'", name))?,
            None => {
                let mut profiles = config.profiles()?;
                if profiles.len() != 1 {
                    bail!(
                        "{} defines {} profiles; choose one with --profile",
                        path,
                        profiles.len()
                    );
                }
                profiles.remove(0)
            }
        };

        let mut profile = match self.seed.as_deref() {
            Some(seed) => profile.with_seed(resolve_seed(&Value::from(seed))),
            None => profile,
        };
        if let Some(volume) = self.volume {
            profile.set_volume(volume);
        }

        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
            config.validate()?;
        }

        Ok(ResolvedProfile {
            profile,
            sample_rate: config.sample_rate,
            chunk_seconds: config.chunk_seconds,
        })
    }

    fn resolve_ad_hoc(&self) -> Result<ResolvedProfile> {
        if self.profile_type.is_none() && self.subtype.is_none() {
            bail!("either --config or --subtype/--type is required");
        }
        if self.profile.is_some() {
            bail!("--profile requires --config");
        }

        let mut raw = RawProfile {
            name: Some(AD_HOC_PROFILE_NAME.to_string()),
            profile_type: self.profile_type.clone(),
            subtype: self.subtype.clone(),
            ..RawProfile::default()
        };
        raw.parameters.volume = self.volume.map(Value::from);
        raw.parameters.seed = self.seed.as_deref().map(Value::from);
        raw.parameters.intensity = self.intensity.map(Value::from);

        let profile = coerce_profile(&raw)?;

        let config = SynthConfig {
            sample_rate: self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            ..SynthConfig::default()
        };
        config.validate()?;

        Ok(ResolvedProfile {
            profile,
            sample_rate: config.sample_rate,
            chunk_seconds: config.chunk_seconds,
        })
    }
}
