//! Conversions between epoch seconds, naive datetime strings, offset-aware
//! datetimes and calendar dates.
//!
//! # Host-local timestamps
//!
//! The `timestamp_to_*` family does **not** convert an instant into the
//! requested offset. It first reads the timestamp in the host's local zone
//! ([`chrono::Local`]), keeps only the resulting wall-clock fields, and then
//! labels those fields with the caller's offset. On a host running at
//! UTC+09:00, timestamp `0` with offset `9` yields `1970-01-01 09:00:00+09:00`;
//! on a UTC host the same call yields `1970-01-01 00:00:00+09:00`.
//!
//! The `*_in` variants take the host zone as an argument, which is how tests
//! and callers that need reproducible output pin it.
//!
//! Every other conversion in this module is independent of the host zone.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::DtError;
use crate::format::{fixed_offset, format_date, format_datetime, parse_datetime, TIME_FORMAT};

// ── timestamp → * ───────────────────────────────────────────────────────────

/// Read `ts` in the host's local zone and relabel the wall clock with `offset_hours`.
///
/// See the [module docs](self) for why this is not an instant conversion.
pub fn timestamp_to_aware(ts: i64, offset_hours: i32) -> Result<DateTime<FixedOffset>, DtError> {
    timestamp_to_aware_in(&Local, ts, offset_hours)
}

/// [`timestamp_to_aware`] with an explicit host zone.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dt_utils::{fixed_offset, timestamp_to_aware_in};
///
/// let jst_host = fixed_offset(9).unwrap();
/// let dttz = timestamp_to_aware_in(&jst_host, 0, 9).unwrap();
/// assert_eq!(dttz.to_rfc3339(), "1970-01-01T09:00:00+09:00");
///
/// let dttz = timestamp_to_aware_in(&Utc, 0, 9).unwrap();
/// assert_eq!(dttz.to_rfc3339(), "1970-01-01T00:00:00+09:00");
/// ```
pub fn timestamp_to_aware_in<Tz: TimeZone>(
    host: &Tz,
    ts: i64,
    offset_hours: i32,
) -> Result<DateTime<FixedOffset>, DtError> {
    let offset = fixed_offset(offset_hours)?;
    let wall_clock = host
        .timestamp_opt(ts, 0)
        .single()
        .ok_or_else(|| {
            DtError::InvalidTimestamp(format!("{ts} is outside the supported range"))
        })?
        .naive_local();

    log::debug!("relabeling host wall clock {wall_clock} (ts={ts}) with offset {offset}");
    attach_offset(wall_clock, offset)
}

/// [`timestamp_to_aware`] formatted as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp_to_datetime_string(ts: i64, offset_hours: i32) -> Result<String, DtError> {
    timestamp_to_datetime_string_in(&Local, ts, offset_hours)
}

/// [`timestamp_to_datetime_string`] with an explicit host zone.
pub fn timestamp_to_datetime_string_in<Tz: TimeZone>(
    host: &Tz,
    ts: i64,
    offset_hours: i32,
) -> Result<String, DtError> {
    let dttz = timestamp_to_aware_in(host, ts, offset_hours)?;
    Ok(format_datetime(&dttz.naive_local()))
}

/// Calendar date of `ts` as read in the host's local zone.
pub fn timestamp_to_date(ts: i64) -> Result<NaiveDate, DtError> {
    timestamp_to_date_in(&Local, ts)
}

/// [`timestamp_to_date`] with an explicit host zone.
pub fn timestamp_to_date_in<Tz: TimeZone>(host: &Tz, ts: i64) -> Result<NaiveDate, DtError> {
    let dttz = timestamp_to_aware_in(host, ts, 0)?;
    Ok(dttz.date_naive())
}

// ── naive datetime string → * ───────────────────────────────────────────────

/// Epoch seconds of the naive datetime `dt` taken at `offset_hours`.
///
/// # Examples
///
/// ```
/// use dt_utils::datetime_string_to_timestamp;
///
/// assert_eq!(datetime_string_to_timestamp("1970-01-01 09:00:00", 9).unwrap(), 0);
/// ```
pub fn datetime_string_to_timestamp(dt: &str, offset_hours: i32) -> Result<i64, DtError> {
    let dttz = datetime_string_to_aware(dt, offset_hours)?;
    Ok(aware_to_timestamp(&dttz))
}

/// Attach `offset_hours` to the naive datetime `dt`. The wall-clock fields are kept as-is.
pub fn datetime_string_to_aware(
    dt: &str,
    offset_hours: i32,
) -> Result<DateTime<FixedOffset>, DtError> {
    let naive = parse_datetime(dt)?;
    attach_offset(naive, fixed_offset(offset_hours)?)
}

/// Date part of a naive datetime string.
pub fn datetime_string_to_date(dt: &str) -> Result<NaiveDate, DtError> {
    Ok(parse_datetime(dt)?.date())
}

/// Time-of-day part (`HH:MM:SS`) of a naive datetime string.
pub fn datetime_string_to_time(dt: &str) -> Result<String, DtError> {
    Ok(parse_datetime(dt)?.time().format(TIME_FORMAT).to_string())
}

// ── aware datetime → * ──────────────────────────────────────────────────────

/// Epoch seconds of the instant. A sub-second part is truncated toward zero.
pub fn aware_to_timestamp(dttz: &DateTime<FixedOffset>) -> i64 {
    let secs = dttz.timestamp();
    // timestamp() floors; for instants before the epoch, truncate instead
    if secs < 0 && dttz.timestamp_subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Format as `YYYY-MM-DD HH:MM:SS`.
///
/// With `offset_hours = None` the value's own wall clock is printed. With
/// `Some(hours)` the instant is first moved to that offset.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use dt_utils::aware_to_datetime_string;
///
/// let dttz = DateTime::parse_from_rfc3339("1970-01-01T09:00:00+09:00").unwrap();
/// assert_eq!(aware_to_datetime_string(&dttz, None).unwrap(), "1970-01-01 09:00:00");
/// assert_eq!(aware_to_datetime_string(&dttz, Some(0)).unwrap(), "1970-01-01 00:00:00");
/// ```
pub fn aware_to_datetime_string(
    dttz: &DateTime<FixedOffset>,
    offset_hours: Option<i32>,
) -> Result<String, DtError> {
    Ok(format_datetime(&wall_clock_at(dttz, offset_hours)?))
}

/// Calendar date of the value, optionally after moving it to `offset_hours`.
pub fn aware_to_date(
    dttz: &DateTime<FixedOffset>,
    offset_hours: Option<i32>,
) -> Result<NaiveDate, DtError> {
    Ok(wall_clock_at(dttz, offset_hours)?.date())
}

// ── date → * ────────────────────────────────────────────────────────────────

/// Epoch seconds of midnight on `date` at `offset_hours`.
pub fn date_to_timestamp(date: NaiveDate, offset_hours: i32) -> Result<i64, DtError> {
    let dttz = date_to_aware(date, offset_hours)?;
    Ok(aware_to_timestamp(&dttz))
}

/// Midnight on `date` as a naive datetime string.
pub fn date_to_datetime_string(date: NaiveDate) -> String {
    format!("{} 00:00:00", format_date(date))
}

/// Midnight on `date` at `offset_hours`.
pub fn date_to_aware(
    date: NaiveDate,
    offset_hours: i32,
) -> Result<DateTime<FixedOffset>, DtError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DtError::OutOfRange(format!("midnight on {date}")))?;
    attach_offset(midnight, fixed_offset(offset_hours)?)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn attach_offset(
    naive: NaiveDateTime,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, DtError> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DtError::OutOfRange(format!("{naive} at {offset}")))
}

fn wall_clock_at(
    dttz: &DateTime<FixedOffset>,
    offset_hours: Option<i32>,
) -> Result<NaiveDateTime, DtError> {
    match offset_hours {
        None => Ok(dttz.naive_local()),
        Some(hours) => Ok(dttz.with_timezone(&fixed_offset(hours)?).naive_local()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
