//! Ambisynth CLI library.
//!
//! Command implementations and logging setup for the `ambisynth` binary.

pub mod commands;
pub mod logging;
