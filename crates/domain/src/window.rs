use cadence_core::{AuditError, AuditResult};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::frequency::FrequencyFamily;

/// Parses a canonical hour-granularity report stamp of form `YYYY-MM-DD-HH`.
pub fn parse_report_stamp(value: &str) -> AuditResult<NaiveDateTime> {
    let malformed = || AuditError::Validation(format!("malformed report stamp '{value}'"));

    let (date_part, hour_part) = value.rsplit_once('-').ok_or_else(malformed)?;
    if hour_part.len() != 2 {
        return Err(malformed());
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| malformed())?;
    let hour: u32 = hour_part.parse().map_err(|_| malformed())?;

    date.and_hms_opt(hour, 0, 0).ok_or_else(malformed)
}

/// Formats an hour-granularity report stamp as `YYYY-MM-DD-HH`.
#[must_use]
pub fn format_report_stamp(value: NaiveDateTime) -> String {
    format!(
        "{}-{:02}",
        value.date().format("%Y-%m-%d"),
        value.time().hour()
    )
}

/// Inclusive audit window with hour precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Parses a window from two canonical `YYYY-MM-DD-HH` stamps.
    pub fn parse(start: &str, end: &str) -> AuditResult<Self> {
        let start = parse_report_stamp(start)
            .map_err(|_| AuditError::InvalidWindow(format!("malformed window start '{start}'")))?;
        let end = parse_report_stamp(end)
            .map_err(|_| AuditError::InvalidWindow(format!("malformed window end '{end}'")))?;

        if start > end {
            return Err(AuditError::InvalidWindow(format!(
                "window start {} is after window end {}",
                format_report_stamp(start),
                format_report_stamp(end)
            )));
        }

        Ok(Self { start, end })
    }

    /// Returns the inclusive window start.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the inclusive window end.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the inclusive query bounds at the granularity a family's
    /// observed data is stored with: full stamps for hourly and weekly
    /// reports, `YYYY-MM-DD` for daily, `YYYY-MM` for monthly.
    #[must_use]
    pub fn query_bounds(&self, family: FrequencyFamily) -> (String, String) {
        match family {
            FrequencyFamily::Hourly | FrequencyFamily::Weekly => (
                format_report_stamp(self.start),
                format_report_stamp(self.end),
            ),
            FrequencyFamily::Daily => (
                self.start.date().format("%Y-%m-%d").to_string(),
                self.end.date().format("%Y-%m-%d").to_string(),
            ),
            FrequencyFamily::Monthly => (
                self.start.date().format("%Y-%m").to_string(),
                self.end.date().format("%Y-%m").to_string(),
            ),
        }
    }
}
