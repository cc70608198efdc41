use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::observed::ObservedRecord;

/// Outcome category of one job's audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The calendar was generated and diffed against observed reports.
    Audited,
    /// No observed sample exists to anchor this job's calendar; no schedule
    /// can be inferred, so no absence is reported.
    NoHistory,
    /// The job's frequency string matches no supported pattern.
    Unrecognized,
    /// The observed data for this job's partition could not be fetched; the
    /// job's state is unknown rather than healthy or absent.
    Unknown,
}

/// Per-job audit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHealth {
    job_name: String,
    frequency: String,
    status: HealthStatus,
    absent_entries: Vec<String>,
}

impl JobHealth {
    /// Creates an audited report carrying the detected absences.
    #[must_use]
    pub fn audited(
        job_name: impl Into<String>,
        frequency: impl Into<String>,
        absent_entries: Vec<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            frequency: frequency.into(),
            status: HealthStatus::Audited,
            absent_entries,
        }
    }

    /// Creates a report for a job with no observation history to anchor on.
    #[must_use]
    pub fn no_history(job_name: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self::flagged(job_name, frequency, HealthStatus::NoHistory)
    }

    /// Creates a report for a job whose frequency could not be classified.
    #[must_use]
    pub fn unrecognized(job_name: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self::flagged(job_name, frequency, HealthStatus::Unrecognized)
    }

    /// Creates a report for a job whose partition fetch failed.
    #[must_use]
    pub fn unknown(job_name: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self::flagged(job_name, frequency, HealthStatus::Unknown)
    }

    fn flagged(
        job_name: impl Into<String>,
        frequency: impl Into<String>,
        status: HealthStatus,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            frequency: frequency.into(),
            status,
            absent_entries: Vec::new(),
        }
    }

    /// Returns the job name.
    #[must_use]
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Returns the job's raw frequency string.
    #[must_use]
    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    /// Returns the audit outcome category.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    /// Returns the expected stamps with no observed report, in calendar
    /// order.
    #[must_use]
    pub fn absent_entries(&self) -> &[String] {
        &self.absent_entries
    }
}

/// Expected stamps with no observed report, preserving calendar order.
///
/// When the distinct present count already covers every expected slot the
/// diff is skipped. The shortcut holds only while present entries are
/// distinct canonical stamps on the same grid as the calendar; the adapter
/// boundary owns that invariant.
#[must_use]
pub fn absent_entries(expected: &[String], observed: &ObservedRecord) -> Vec<String> {
    if observed.present_count() >= expected.len() {
        return Vec::new();
    }

    let present: HashSet<&str> = observed
        .present_entries()
        .iter()
        .map(String::as_str)
        .collect();

    expected
        .iter()
        .filter(|slot| !present.contains(slot.as_str()))
        .cloned()
        .collect()
}
