//! Analyze command implementation
//!
//! Reports the octave-band spectrum and slope of either a few synthesized
//! seconds of a profile or an existing WAV file (a render or a captured
//! stream).

use std::path::Path;
use std::process::ExitCode;

use ambisynth_backend_audio::analysis::{analyze, decode_pcm16, SpectrumReport};
use ambisynth_backend_audio::render::sample_count;
use ambisynth_backend_audio::wav::{compute_pcm_hash, extract_pcm_data, read_format};
use ambisynth_backend_audio::ChunkProducer;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::source::ProfileArgs;

/// Lowest octave-band center reported.
pub const LOW_BAND_HZ: f64 = 62.5;

/// Highest octave-band center reported.
pub const HIGH_BAND_HZ: f64 = 16_000.0;

/// Machine-readable analysis output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutput {
    /// Profile name, or the input path.
    pub source: String,
    /// Family analyzed (synthesized profiles only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Subtype analyzed (synthesized profiles only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Seed used, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// BLAKE3 hash of the file's PCM data (file inputs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// Spectrum summary.
    pub report: SpectrumReport,
}

/// Produces the analysis for a resolved profile.
pub fn analyze_profile(source: &ProfileArgs, seconds: f64) -> Result<AnalyzeOutput> {
    let resolved = source.resolve()?;
    let count = sample_count(seconds, resolved.sample_rate)?;
    let mut producer = ChunkProducer::from_profile(&resolved.profile, resolved.sample_rate)?;
    let samples = producer.next_samples(count);

    let report = analyze(&samples, resolved.sample_rate, LOW_BAND_HZ, HIGH_BAND_HZ);
    Ok(AnalyzeOutput {
        source: resolved.profile.name().to_string(),
        family: Some(resolved.profile.family().to_string()),
        subtype: Some(resolved.profile.subtype().to_string()),
        seed: resolved.profile.seed(),
        pcm_hash: None,
        report,
    })
}

/// Produces the analysis for a 16-bit mono WAV file.
///
/// Finite files and captured streams (unbounded size fields) are both read.
pub fn analyze_file(input_path: &str) -> Result<AnalyzeOutput> {
    let wav_data = std::fs::read(Path::new(input_path))
        .with_context(|| format!("Failed to read input file: {}", input_path))?;

    let Some(format) = read_format(&wav_data) else {
        bail!("{} is not a 16-bit mono PCM WAV file", input_path);
    };
    let Some(pcm) = extract_pcm_data(&wav_data) else {
        bail!("{} has no data chunk", input_path);
    };

    let samples = decode_pcm16(pcm);
    let report = analyze(&samples, format.sample_rate, LOW_BAND_HZ, HIGH_BAND_HZ);
    Ok(AnalyzeOutput {
        source: input_path.to_string(),
        family: None,
        subtype: None,
        seed: None,
        pcm_hash: compute_pcm_hash(&wav_data),
        report,
    })
}

/// Run the analyze command
///
/// # Arguments
/// * `input_path` - Optional WAV file to analyze instead of synthesizing
/// * `source` - Profile selection
/// * `seconds` - Duration to synthesize
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    input_path: Option<&str>,
    source: &ProfileArgs,
    seconds: f64,
    json_output: bool,
) -> Result<ExitCode> {
    let output = match input_path {
        Some(path) => analyze_file(path)?,
        None => analyze_profile(source, seconds)?,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    let report = &output.report;
    match (&output.family, &output.subtype) {
        (Some(family), Some(subtype)) => println!(
            "{} {}/{} ({})",
            "Analyzing:".cyan().bold(),
            family,
            subtype,
            output.source
        ),
        _ => println!("{} {}", "Analyzing:".cyan().bold(), output.source),
    }
    println!(
        "  {} samples at {} Hz, rms {:.4}, peak {:.4}",
        report.num_samples, report.sample_rate, report.rms, report.peak
    );
    if let Some(hash) = &output.pcm_hash {
        println!("  {} {}", "PCM hash:".dimmed(), &hash[..16]);
    }

    let top = report
        .bands
        .iter()
        .map(|b| b.power_db)
        .fold(f64::NEG_INFINITY, f64::max);
    for band in &report.bands {
        let relative = band.power_db - top;
        let width = ((relative + 48.0).max(0.0) / 1.5).round() as usize;
        println!(
            "  {:>8.1} Hz {:>7.1} dB {}",
            band.center_hz,
            relative,
            "#".repeat(width).dimmed()
        );
    }
    println!(
        "{} {:.2} dB/octave",
        "Slope:".green().bold(),
        report.slope_db_per_octave
    );

    Ok(ExitCode::SUCCESS)
}
