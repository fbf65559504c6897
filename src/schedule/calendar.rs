//! Calendar-date helpers shared by the frequency calculus and the projection code.
//!
//! All arithmetic here works on [`NaiveDate`]; timestamps are reduced to their calendar date
//! at the boundary so time-of-day and daylight-saving shifts never leak into period counts.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone};

use super::frequency::{Frequency, Step};
use crate::errors::ZeptoError;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Values that can be pinned to a calendar date.
pub trait CalendarDate {
    /// Drops the time of day. Idempotent.
    fn normalize(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn normalize(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn normalize(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    /// Keeps the date as written in the value's own offset.
    fn normalize(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Parses `YYYY-MM-DD`, a naive ISO datetime, or an RFC 3339 timestamp into a calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ZeptoError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = trimmed.parse::<NaiveDateTime>() {
        return Ok(timestamp.normalize());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.normalize());
    }
    Err(ZeptoError::InvalidDate(raw.to_string()))
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Calendar-month addition; the day clamps to the end of a shorter target month.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}

/// Most recent occurrence on or before `target` for a schedule beginning at `start`.
///
/// Returns `None` when the schedule has not begun yet.
pub fn most_recent_due_date(
    start: NaiveDate,
    frequency: Frequency,
    target: NaiveDate,
) -> Option<NaiveDate> {
    if start == target {
        return Some(start);
    }
    if let Step::Days(1) = frequency.step() {
        return (start <= target).then_some(target);
    }

    let index = most_recent_index(start, frequency, target)?;
    let due = nth_occurrence(start, frequency, index);
    (due <= target).then_some(due)
}

/// Position of the most recent occurrence on or before `target`, counted from `start` = 0.
pub fn most_recent_index(
    start: NaiveDate,
    frequency: Frequency,
    target: NaiveDate,
) -> Option<u32> {
    if start > target {
        return None;
    }
    let index = match frequency.step() {
        Step::Days(period) => {
            let elapsed = (target - start).num_days() as u64;
            u32::try_from(elapsed / period).unwrap_or(u32::MAX)
        }
        Step::Months(period) => last_period_by_month(start, target, period),
    };
    Some(index)
}

/// The `index`-th occurrence, measured from `start` rather than from the previous occurrence.
///
/// A schedule on the 31st therefore returns to the 31st after passing through shorter months.
pub fn nth_occurrence(start: NaiveDate, frequency: Frequency, index: u32) -> NaiveDate {
    match frequency.step() {
        Step::Days(period) => start
            .checked_add_days(Days::new(period.saturating_mul(index as u64)))
            .unwrap_or(NaiveDate::MAX),
        Step::Months(period) => add_months(start, period.saturating_mul(index)),
    }
}

fn last_period_by_month(start: NaiveDate, target: NaiveDate, period: u32) -> u32 {
    let elapsed = month_index(target) - month_index(start);
    let mut periods = u32::try_from(elapsed).unwrap_or(u32::MAX) / period;
    while periods > 0 && add_months(start, periods * period) > target {
        periods -= 1;
    }
    periods
}

fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// Scans forward from `start` and returns up to `count` occurrences on or after `today`.
///
/// The scan gives up after `count * scan_factor` steps, so a schedule that started long ago
/// at a fine cadence may return fewer dates than requested.
pub fn next_dates(
    start: NaiveDate,
    frequency: Frequency,
    count: usize,
    end: Option<NaiveDate>,
    today: NaiveDate,
    scan_factor: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let max_iterations = count.saturating_mul(scan_factor);
    let mut index = 0u32;

    while dates.len() < count && (index as usize) < max_iterations {
        let current = nth_occurrence(start, frequency, index);
        index += 1;
        if end.is_some_and(|end| current > end) {
            break;
        }
        if current >= today {
            dates.push(current);
        }
    }

    dates
}
