//! Error types for the SongSplit settings layer.
//!
//! There is a single error type, [`ConfigError`], raised while settings are
//! assembled and validated at startup. It always names the offending field
//! (camelCase, as it appears in settings files) and carries a
//! [`ConfigErrorReason`] describing what is wrong with it.
//!
//! A `ConfigError` is fatal to startup: it is reported to the caller and
//! never retried.

use thiserror::Error;

// =============================================================================
// Reasons
// =============================================================================

/// Why a configuration value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigErrorReason {
    /// A required value was not provided by any source.
    #[error("value is required but was not provided")]
    Missing,

    /// The value is empty or only whitespace.
    #[error("value must not be empty")]
    Empty,

    /// The value contains whitespace where none is allowed.
    #[error("value must not contain whitespace")]
    Whitespace,

    /// The value could not be parsed as an absolute URL.
    #[error("not a valid absolute URL: {0}")]
    InvalidUrl(String),

    /// The URL parsed but uses a scheme the backend client cannot talk to.
    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The value is not a semantic version.
    #[error("'{0}' is not a semantic version (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    /// A number fell outside its inclusive range.
    #[error("{value} is outside the allowed range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// A number with only a lower bound fell below it.
    #[error("{value} is below the minimum of {min}")]
    BelowMinimum { value: i64, min: i64 },

    /// An enumeration contains the same entry twice.
    #[error("duplicate entry '{0}'")]
    Duplicate(String),

    /// An enumeration contains a blank entry.
    #[error("entry at position {0} is blank")]
    BlankEntry(usize),

    /// Two logical storage keys map to the same underlying key name.
    #[error("'{first}' and '{second}' both map to storage key '{name}'")]
    Collision {
        first: String,
        second: String,
        name: String,
    },

    /// A settings file could not be read.
    #[error("cannot read file: {0}")]
    Unreadable(String),

    /// A settings file was read but its content is not valid.
    #[error("malformed settings: {0}")]
    Malformed(String),
}

// =============================================================================
// ConfigError
// =============================================================================

/// A configuration value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration for '{field}': {reason}")]
pub struct ConfigError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub reason: ConfigErrorReason,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, reason: ConfigErrorReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }

    /// Shorthand for a required field that no source provided.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ConfigErrorReason::Missing)
    }

    /// True when the error is a storage key collision.
    pub fn is_collision(&self) -> bool {
        matches!(self.reason, ConfigErrorReason::Collision { .. })
    }
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
