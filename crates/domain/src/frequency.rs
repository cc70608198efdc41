use std::str::FromStr;

use cadence_core::{AuditError, AuditResult};
use serde::{Deserialize, Serialize};

/// Base cadence unit of a scheduled job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyFamily {
    /// One expected report per hour step.
    Hourly,
    /// One expected report per day step.
    Daily,
    /// One expected report per seven-day step, anchored at observed history.
    Weekly,
    /// One expected report per calendar month.
    Monthly,
}

impl FrequencyFamily {
    /// Every family, in audit evaluation order.
    pub const ALL: [Self; 4] = [Self::Hourly, Self::Daily, Self::Weekly, Self::Monthly];

    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns the capitalized label used by downstream grouping headers.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl FromStr for FrequencyFamily {
    type Err = AuditError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(AuditError::UnrecognizedFrequency(value.to_owned())),
        }
    }
}

/// Structured cadence derived from a job's raw frequency string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySpec {
    family: FrequencyFamily,
    interval: u32,
}

impl FrequencySpec {
    /// Parses a raw frequency string, case-insensitively.
    ///
    /// Accepts a bare family token (`"daily"`) or an integer-multiple form
    /// (`"3-hourly"`, `"2-weekly"`). The multiplier must be at least one.
    pub fn parse(raw: &str) -> AuditResult<Self> {
        let normalized = raw.trim().to_ascii_lowercase();

        if let Some((multiplier, family)) = normalized.split_once('-')
            && !multiplier.is_empty()
            && multiplier.bytes().all(|byte| byte.is_ascii_digit())
        {
            let interval: u32 = multiplier
                .parse()
                .map_err(|_| AuditError::UnrecognizedFrequency(raw.to_owned()))?;
            if interval == 0 {
                return Err(AuditError::UnrecognizedFrequency(raw.to_owned()));
            }

            return Ok(Self {
                family: family
                    .parse()
                    .map_err(|_: AuditError| AuditError::UnrecognizedFrequency(raw.to_owned()))?,
                interval,
            });
        }

        Ok(Self {
            family: normalized.parse()?,
            interval: 1,
        })
    }

    /// Returns the frequency family.
    #[must_use]
    pub fn family(&self) -> FrequencyFamily {
        self.family
    }

    /// Returns the interval multiplier, always at least one.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the label used by downstream grouping headers, such as
    /// `"Hourly"` or `"3-Hourly"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.interval == 1 {
            self.family.title().to_owned()
        } else {
            format!("{}-{}", self.interval, self.family.title())
        }
    }
}
