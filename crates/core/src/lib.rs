//! Shared primitives for all Rust crates in Cadence.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Cadence crates.
pub type AuditResult<T> = Result<T, AuditError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AuditResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AuditError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common audit error categories.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frequency string matches none of the supported family patterns.
    #[error("unrecognized frequency: {0}")]
    UnrecognizedFrequency(String),

    /// Malformed window stamp, or window start after window end.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// The observed-data backend could not serve a partition fetch.
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
