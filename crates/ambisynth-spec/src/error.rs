//! Error types for profile normalization and configuration loading.

use thiserror::Error;

/// Errors raised while turning raw profile documents into [`Profile`]s.
///
/// Range problems (volume or intensity outside `[0, 1]`) are never errors:
/// they are clamped during coercion. Everything here is fatal for the
/// profile it concerns.
///
/// [`Profile`]: crate::profile::Profile
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Family string is not one of the supported families.
    #[error("unknown profile type: {0} (expected noise or ambient)")]
    UnknownType(String),

    /// Subtype string is not recognized for the given family.
    #[error("unknown {family} subtype: {subtype}")]
    UnknownSubtype {
        /// Family the subtype was checked against.
        family: String,
        /// The rejected subtype.
        subtype: String,
    },

    /// Subtype is known but belongs to another family than the declared one.
    #[error("subtype '{subtype}' belongs to the {actual} family, not {declared}")]
    SubtypeFamilyMismatch {
        /// The subtype that was supplied.
        subtype: String,
        /// The family the document declared.
        declared: String,
        /// The family the subtype actually belongs to.
        actual: String,
    },

    /// No profile with the given name is registered.
    #[error("no profile named '{0}'")]
    UnknownProfile(String),

    /// Two profiles in one document share a name.
    #[error("duplicate profile name '{0}'")]
    DuplicateProfile(String),

    /// The configuration document is structurally valid JSON but out of range.
    #[error("invalid config field '{field}': {message}")]
    InvalidConfig {
        /// Field name.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    /// Creates an invalid config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the stable error code (e.g., "P001").
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::UnknownType(_) => "P001",
            ProfileError::UnknownSubtype { .. } => "P002",
            ProfileError::SubtypeFamilyMismatch { .. } => "P003",
            ProfileError::UnknownProfile(_) => "P004",
            ProfileError::DuplicateProfile(_) => "P005",
            ProfileError::InvalidConfig { .. } => "P006",
            ProfileError::Json(_) => "P007",
            ProfileError::Io(_) => "P008",
        }
    }
}

/// Common trait for backend errors.
///
/// Gives every backend error a stable code and a category so callers can
/// report failures uniformly without matching on concrete types.
pub trait BackendError: std::error::Error {
    /// Stable error code such as "AUDIO_001".
    fn code(&self) -> &'static str;

    /// Human-readable message. Defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category, e.g. "audio".
    fn category(&self) -> &'static str;
}
