//! Domain entities and calendar arithmetic for temporal-completeness audits.

#![forbid(unsafe_code)]

mod calendar;
mod frequency;
mod health;
mod job;
mod observed;
mod window;

pub use calendar::{
    MonthlyGranularity, expected_days, expected_hours, expected_months, expected_weekly_slots,
    infer_monthly_granularity,
};
pub use frequency::{FrequencyFamily, FrequencySpec};
pub use health::{HealthStatus, JobHealth, absent_entries};
pub use job::Job;
pub use observed::ObservedRecord;
pub use window::{TimeWindow, format_report_stamp, parse_report_stamp};
