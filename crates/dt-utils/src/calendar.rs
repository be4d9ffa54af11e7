//! Calendar arithmetic: day offsets, weekday names and inclusive date ranges.

use std::iter::FusedIterator;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};

use crate::error::DtError;

/// Add `n` calendar days to `date`. `n` may be negative or zero.
///
/// # Errors
///
/// Returns [`DtError::OutOfRange`] if the result leaves chrono's supported date range.
///
/// # Examples
///
/// ```
/// use dt_utils::{add_days, parse_date};
///
/// let d = add_days(parse_date("2024-05-01").unwrap(), -1).unwrap();
/// assert_eq!(d.to_string(), "2024-04-30");
/// ```
pub fn add_days(date: NaiveDate, n: i64) -> Result<NaiveDate, DtError> {
    Duration::try_days(n)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| DtError::OutOfRange(format!("{date} {n:+} days")))
}

/// Add `n` seconds to an aware datetime. The offset is preserved.
pub fn add_seconds(
    dttz: &DateTime<FixedOffset>,
    n: i64,
) -> Result<DateTime<FixedOffset>, DtError> {
    Duration::try_seconds(n)
        .and_then(|delta| dttz.checked_add_signed(delta))
        .ok_or_else(|| DtError::OutOfRange(format!("{dttz} {n:+} seconds")))
}

/// Abbreviated English weekday name: `"Sun"`, `"Mon"`, … `"Sat"`.
pub fn day_of_week(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

// ── Date ranges ─────────────────────────────────────────────────────────────

/// Ascending, day-by-day iterator over `[start, end]`, both ends included.
///
/// Built by [`date_range`]. Cloning yields an independent cursor, so a range
/// can be walked any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

/// Lazily enumerate every date from `start` through `end`.
///
/// # Errors
///
/// Returns [`DtError::InvalidRange`] if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use dt_utils::{date_range, parse_date};
///
/// let start = parse_date("2024-02-28").unwrap();
/// let end = parse_date("2024-03-01").unwrap();
/// let days: Vec<String> = date_range(start, end).unwrap().map(|d| d.to_string()).collect();
/// assert_eq!(days, ["2024-02-28", "2024-02-29", "2024-03-01"]);
/// ```
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, DtError> {
    if end < start {
        log::debug!("rejecting inverted date range {start}..={end}");
        return Err(DtError::InvalidRange(format!(
            "end {end} is before start {start}"
        )));
    }
    Ok(DateRange {
        next: Some(start),
        end,
    })
}

/// Eagerly collect [`date_range`].
pub fn collect_date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DtError> {
    Ok(date_range(start, end)?.collect())
}

impl DateRange {
    /// Number of dates not yet yielded.
    fn remaining(&self) -> usize {
        self.next
            .map(|next| (self.end - next).num_days() as usize + 1)
            .unwrap_or(0)
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for DateRange {}

impl FusedIterator for DateRange {}
