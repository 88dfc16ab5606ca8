//! Ambisynth CLI - Command-line interface for ambient noise synthesis
//!
//! This binary provides commands for validating profile configurations,
//! rendering WAV files, streaming unbounded WAV audio, and inspecting the
//! spectrum of a generator.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use ambisynth_cli::commands;
use ambisynth_cli::commands::source::ProfileArgs;
use ambisynth_cli::commands::stream::StreamOptions;
use ambisynth_cli::logging;

/// Ambisynth - Procedural noise and ambience generator
#[derive(Parser)]
#[command(name = "ambisynth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and print its normalized profiles
    Validate {
        /// Path to the configuration file (JSON)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a profile to a WAV file
    Render {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Duration in seconds
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Stream a profile as unbounded WAV audio (stdout by default)
    Stream {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Stop after this many chunks (default: run until interrupted)
        #[arg(long)]
        chunks: Option<u64>,

        /// Pace output at playback speed
        #[arg(long)]
        realtime: bool,
    },

    /// Report the octave-band spectrum and slope of a profile or WAV file
    Analyze {
        /// WAV file to analyze (a render or a captured stream) instead of
        /// synthesizing
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Duration to synthesize, in seconds
        #[arg(long, default_value_t = 5.0)]
        seconds: f64,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Render {
            profile,
            seconds,
            output,
            json,
        } => commands::render::run(&profile, seconds, &output, json),
        Commands::Stream {
            profile,
            output,
            chunks,
            realtime,
        } => commands::stream::run(
            &profile,
            &StreamOptions {
                output,
                chunks,
                realtime,
            },
        ),
        Commands::Analyze {
            input,
            profile,
            seconds,
            json,
        } => commands::analyze::run(input.as_deref(), &profile, seconds, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
