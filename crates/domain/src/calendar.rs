use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::window::{TimeWindow, format_report_stamp};

/// Stamp shape a monthly job records its reports with, inferred from one
/// observed sample because monthly jobs carry no declared shape metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyGranularity {
    /// Bare `YYYY-MM` stamps.
    YearMonth,
    /// `YYYY-MM-01` month-start stamps.
    MonthStart,
    /// `YYYY-MM-<lastDay>` month-end stamps.
    MonthEnd,
    /// No usable sample; the shape cannot be inferred.
    Unknown,
}

/// Infers the monthly stamp shape from the first observed sample.
#[must_use]
pub fn infer_monthly_granularity(sample: Option<&str>) -> MonthlyGranularity {
    let Some(sample) = sample else {
        return MonthlyGranularity::Unknown;
    };

    if sample.len() == 7 {
        // A bare year-month; pad a day so chrono can validate the shape.
        return if NaiveDate::parse_from_str(&format!("{sample}-01"), "%Y-%m-%d").is_ok() {
            MonthlyGranularity::YearMonth
        } else {
            MonthlyGranularity::Unknown
        };
    }

    match NaiveDate::parse_from_str(sample, "%Y-%m-%d") {
        Ok(date) if date.day() == 1 => MonthlyGranularity::MonthStart,
        Ok(_) => MonthlyGranularity::MonthEnd,
        Err(_) => MonthlyGranularity::Unknown,
    }
}

/// Expected hour slots from the window start to the window end inclusive,
/// stepping `interval` hours. Anchored exactly at the window start; this
/// family never anchors on observed data.
#[must_use]
pub fn expected_hours(window: &TimeWindow, interval: u32) -> Vec<String> {
    // A zero stride would never advance the cursor.
    let step = Duration::hours(i64::from(interval.max(1)));

    let mut slots = Vec::new();
    let mut cursor = window.start();
    while cursor <= window.end() {
        slots.push(format_report_stamp(cursor));
        cursor += step;
    }

    slots
}

/// Expected day slots over the window truncated to whole days, stepping
/// `interval` days from the window's start day.
#[must_use]
pub fn expected_days(window: &TimeWindow, interval: u32) -> Vec<String> {
    let step = Duration::days(i64::from(interval.max(1)));

    let mut slots = Vec::new();
    let mut cursor = window.start().date();
    let end = window.end().date();
    while cursor <= end {
        slots.push(cursor.format("%Y-%m-%d").to_string());
        cursor += step;
    }

    slots
}

/// Expected weekly slots anchored at the job's own observation baseline,
/// stepping `interval × 7` days while the candidate stays inside the window.
/// The baseline's hour-of-day is carried into every slot.
#[must_use]
pub fn expected_weekly_slots(
    window: &TimeWindow,
    interval: u32,
    baseline: NaiveDateTime,
) -> Vec<String> {
    let step = Duration::days(7 * i64::from(interval.max(1)));

    let mut slots = Vec::new();
    let mut cursor = baseline;
    while cursor <= window.end() {
        slots.push(format_report_stamp(cursor));
        cursor += step;
    }

    slots
}

/// Expected month slots from the window's start month to its end month,
/// rendered in the inferred stamp shape. A month is dropped once its
/// month-end date passes the window's end date, so a final partial month
/// never over-shoots. `Unknown` granularity yields an empty calendar.
#[must_use]
pub fn expected_months(window: &TimeWindow, granularity: MonthlyGranularity) -> Vec<String> {
    let end_date = window.end().date();
    let end_cursor = (window.end().year(), window.end().month());

    let mut slots = Vec::new();
    let mut cursor = (window.start().year(), window.start().month());
    while cursor <= end_cursor {
        let (year, month) = cursor;
        let last_day = last_day_of_month(year, month);
        let month_end = NaiveDate::from_ymd_opt(year, month, last_day);
        if month_end.is_none_or(|month_end| month_end > end_date) {
            break;
        }

        let slot = match granularity {
            MonthlyGranularity::YearMonth => format!("{year}-{month:02}"),
            MonthlyGranularity::MonthStart => format!("{year}-{month:02}-01"),
            MonthlyGranularity::MonthEnd => format!("{year}-{month:02}-{last_day:02}"),
            MonthlyGranularity::Unknown => break,
        };
        slots.push(slot);

        cursor = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
    }

    slots
}

/// Returns the last calendar day (28–31) of the given month.
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(28, |last| last.day())
}
