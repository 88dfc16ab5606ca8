//! Ambisynth Audio Backend
//!
//! Continuous, stateful synthesis of noise colors and ambiences for streams
//! of unbounded length.
//!
//! # Overview
//!
//! A [`ChunkProducer`] owns one generator and hands out 16-bit PCM chunks on
//! demand. Generators keep their filter taps, phases and in-flight
//! transients between pulls, so there is no seam at chunk boundaries and no
//! master file to loop. The [`wav`] module frames the chunks for transport
//! with a header whose size fields mark the stream as unbounded.
//!
//! - **Noise** - White, pink (multi-pole IIR) and brown (leaky integrator)
//! - **Ambience** - Rain, wind, fan and ocean built on the noise colorers
//!
//! # Determinism
//!
//! All randomness flows through one PCG32 per generator. Given the same
//! profile and seed, output is byte-identical across runs and independent of
//! how the samples are split into chunks. Unseeded profiles draw fresh
//! entropy per stream.
//!
//! # Example
//!
//! ```
//! use ambisynth_backend_audio::{build_header, create_generator};
//!
//! let mut producer = create_generator("ambient", "rain", 0.5, Some(7)).unwrap();
//!
//! let mut response = build_header(44_100);
//! for _ in 0..3 {
//!     response.extend(producer.next_chunk(22_050));
//! }
//! assert_eq!(response.len(), 44 + 3 * 44_100);
//! ```
//!
//! # Crate Structure
//!
//! - [`generator`] - Voice dispatch and the [`create_generator`] factory
//! - [`chunk`] - Volume, clamping and quantization into PCM chunks
//! - [`synthesis`] - Noise colorers and ambience synthesizers
//! - [`stream`] - Concurrent profile registry and listener streams
//! - [`wav`] - Finite and unbounded WAV framing
//! - [`analysis`] - Welch spectra and octave-band slope estimates
//! - [`render`] - Finite renders for offline use
//! - [`rng`] - Deterministic sample source

pub mod analysis;
pub mod chunk;
pub mod error;
pub mod filter;
pub mod generator;
pub mod modulation;
pub mod render;
pub mod rng;
pub mod stream;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use chunk::ChunkProducer;
pub use error::{AudioError, AudioResult};
pub use generator::{create_generator, create_generator_at, Generator, STREAM_SAMPLE_RATE};
pub use render::{render, render_to_file};
pub use stream::{ListenerStream, StreamRegistry};
pub use wav::{build_header, StreamingWavWriter, WavResult, UNBOUNDED_SIZE};
