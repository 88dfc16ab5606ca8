//! Error types for the audio backend.

use ambisynth_spec::{BackendError, ProfileError};
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while creating generators or rendering audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Generator type is not one of the supported families.
    #[error("unknown generator type: {0} (expected noise or ambient)")]
    UnknownType(String),

    /// Subtype is not known for the requested family.
    #[error("unknown {family} subtype: {subtype}")]
    UnknownSubtype {
        /// Family the subtype was looked up in.
        family: String,
        /// The rejected subtype.
        subtype: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Profile could not be normalized or found.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an unknown subtype error.
    pub fn unknown_subtype(family: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self::UnknownSubtype {
            family: family.into(),
            subtype: subtype.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::UnknownType(_) => "AUDIO_001",
            AudioError::UnknownSubtype { .. } => "AUDIO_002",
            AudioError::InvalidSampleRate { .. } => "AUDIO_003",
            AudioError::InvalidDuration { .. } => "AUDIO_004",
            AudioError::Profile(_) => "AUDIO_005",
            AudioError::Io(_) => "AUDIO_006",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_subtype_helper() {
        let err = AudioError::unknown_subtype("noise", "violet");
        assert!(err.to_string().contains("violet"));
        assert!(err.to_string().contains("noise"));
        assert_eq!(err.code(), "AUDIO_002");
        assert_eq!(err.category(), "audio");
    }

    #[test]
    fn test_profile_errors_pass_through() {
        let err: AudioError = ProfileError::UnknownProfile("nap".into()).into();
        assert_eq!(err.to_string(), "no profile named 'nap'");
        assert_eq!(err.code(), "AUDIO_005");
    }
}
