use cadence_core::{AuditResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// A named scheduled data-production unit whose executions are recorded as
/// timestamped report events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    name: NonEmptyString,
    frequency_raw: String,
}

impl Job {
    /// Creates a job from its catalog row. The raw frequency string is
    /// normalized to lower case; classification happens at audit time so an
    /// unrecognized frequency surfaces per job instead of failing here.
    pub fn new(name: impl Into<String>, frequency_raw: impl Into<String>) -> AuditResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            frequency_raw: frequency_raw.into().trim().to_ascii_lowercase(),
        })
    }

    /// Returns the job name, unique within a product.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the normalized raw frequency string.
    #[must_use]
    pub fn frequency_raw(&self) -> &str {
        &self.frequency_raw
    }
}
