//! Validate command implementation
//!
//! Loads a configuration file, coerces every profile and prints the
//! normalized result.

use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use ambisynth_spec::{
    coerce_profile, coerce_raw_profile, Profile, ProfileError, RawProfile, SynthConfig,
};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

/// One profile that failed to normalize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileIssue {
    /// Position in the document's `profiles` array.
    pub index: usize,
    /// Name as written, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stable error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl ProfileIssue {
    fn new(index: usize, raw: &RawProfile, error: &ProfileError) -> Self {
        Self {
            index,
            name: raw.name.clone(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Machine-readable validation report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    /// Whether every profile normalized.
    pub ok: bool,
    /// Stream sample rate.
    pub sample_rate: u32,
    /// Chunk duration in seconds.
    pub chunk_seconds: f64,
    /// Normalized profiles.
    pub profiles: Vec<Profile>,
    /// Normalized documents, in the form written back to storage.
    pub documents: Vec<RawProfile>,
    /// Profiles that failed.
    pub errors: Vec<ProfileIssue>,
}

/// Validates every profile of a loaded configuration.
pub fn validate_config(config: &SynthConfig) -> ValidateOutput {
    let mut profiles = Vec::new();
    let mut documents = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in config.profiles.iter().enumerate() {
        let result = coerce_profile(raw).and_then(|p| coerce_raw_profile(raw).map(|d| (p, d)));
        match result {
            Ok((profile, _)) if !seen.insert(profile.name().to_string()) => {
                let e = ProfileError::DuplicateProfile(profile.name().to_string());
                errors.push(ProfileIssue::new(index, raw, &e));
            }
            Ok((profile, document)) => {
                profiles.push(profile);
                documents.push(document);
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "profile dropped");
                errors.push(ProfileIssue::new(index, raw, &e));
            }
        }
    }

    ValidateOutput {
        ok: errors.is_empty(),
        sample_rate: config.sample_rate,
        chunk_seconds: config.chunk_seconds,
        profiles,
        documents,
        errors,
    }
}

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the configuration file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every profile is valid, 1 otherwise
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    let config = SynthConfig::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let output = validate_config(&config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(config_path, &output);
    }

    Ok(if output.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(config_path: &str, output: &ValidateOutput) {
    println!("{} {}", "Validating:".cyan().bold(), config_path);
    println!(
        "{} {} Hz, {} s chunks",
        "Format:".dimmed(),
        output.sample_rate,
        output.chunk_seconds
    );

    for profile in &output.profiles {
        let seed = profile
            .seed()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string());
        println!(
            "  {} {} {}/{} volume={:.2} intensity={:.2} seed={}",
            "✓".green(),
            profile.name().bold(),
            profile.family(),
            profile.subtype(),
            profile.volume(),
            profile.intensity(),
            seed.dimmed()
        );
    }

    for issue in &output.errors {
        let name = issue.name.as_deref().unwrap_or("<unnamed>");
        println!(
            "  {} {} [{}]: {}",
            "✗".red(),
            name.bold(),
            issue.code.red(),
            issue.message
        );
    }

    if output.ok {
        println!("{} {} profile(s)", "Valid:".green().bold(), output.profiles.len());
    } else {
        println!(
            "{} {} error(s)",
            "Invalid:".red().bold(),
            output.errors.len()
        );
    }
}
