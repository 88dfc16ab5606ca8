//! Render command implementation
//!
//! Writes a finite WAV file for a profile.

use std::path::Path;
use std::process::ExitCode;

use ambisynth_backend_audio::render_to_file;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::source::ProfileArgs;

/// Machine-readable render summary.
#[derive(Debug, Clone, Serialize)]
pub struct RenderOutput {
    /// Written file.
    pub output: String,
    /// Profile name.
    pub profile: String,
    /// Subtype rendered.
    pub subtype: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples written.
    pub num_samples: usize,
    /// BLAKE3 hash of the PCM data.
    pub pcm_hash: String,
}

/// Run the render command
///
/// # Arguments
/// * `source` - Profile selection
/// * `seconds` - Duration to render
/// * `output` - Output WAV path
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(source: &ProfileArgs, seconds: f64, output: &str, json_output: bool) -> Result<ExitCode> {
    let resolved = source.resolve()?;
    let result = render_to_file(
        &resolved.profile,
        seconds,
        resolved.sample_rate,
        Path::new(output),
    )
    .with_context(|| format!("Failed to render {}", output))?;

    let summary = RenderOutput {
        output: output.to_string(),
        profile: resolved.profile.name().to_string(),
        subtype: resolved.profile.subtype().to_string(),
        sample_rate: result.sample_rate,
        num_samples: result.num_samples,
        pcm_hash: result.pcm_hash.clone(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} {} ({}) -> {}",
            "Rendered:".green().bold(),
            summary.profile,
            summary.subtype,
            summary.output
        );
        println!(
            "  {:.3} s at {} Hz, {} samples",
            result.duration_seconds(),
            summary.sample_rate,
            summary.num_samples
        );
        println!("  {} {}", "PCM hash:".dimmed(), &summary.pcm_hash[..16]);
    }

    Ok(ExitCode::SUCCESS)
}
