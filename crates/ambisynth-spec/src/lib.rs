//! Ambisynth Profile Library
//!
//! This crate provides the data model for ambisynth sound profiles: the
//! families and subtypes a listener can select, normalization of loosely
//! typed profile documents, seed derivation, and configuration documents.
//!
//! # Example
//!
//! ```
//! use ambisynth_spec::{coerce_profile, RawProfile, SoundFamily, Subtype};
//!
//! let raw = RawProfile::new("Bedroom", "noise", "pink").volume(1.4).seed(42);
//! let profile = coerce_profile(&raw).unwrap();
//!
//! assert_eq!(profile.family(), SoundFamily::Noise);
//! assert_eq!(profile.subtype(), Subtype::Pink);
//! assert_eq!(profile.volume(), 1.0);
//! assert_eq!(profile.seed(), Some(42));
//! ```
//!
//! # Modules
//!
//! - [`profile`]: Families, subtypes and the normalized [`Profile`]
//! - [`coerce`]: Raw profile documents and their normalization
//! - [`seed`]: Seed resolution and hashing
//! - [`config`]: Configuration documents
//! - [`error`]: Error types

pub mod coerce;
pub mod config;
pub mod error;
pub mod profile;
pub mod seed;

// Re-export commonly used types at the crate root
pub use coerce::{coerce_profile, coerce_raw_profile, RawParameters, RawProfile};
pub use config::{
    SynthConfig, DEFAULT_CHUNK_SECONDS, DEFAULT_SAMPLE_RATE, MAX_CHUNK_SECONDS, MAX_SAMPLE_RATE,
    MIN_SAMPLE_RATE,
};
pub use error::{BackendError, ProfileError};
pub use profile::{
    clamp_unit, normalize_subtype, Profile, SoundFamily, Subtype, DEFAULT_INTENSITY,
    DEFAULT_PROFILE_NAME, DEFAULT_VOLUME,
};
pub use seed::{hash_seed, resolve_seed};
