//! # dt-utils
//!
//! Small, deterministic date/time helpers.
//!
//! Converts between five representations: epoch seconds (`i64`), naive
//! datetime strings (`"YYYY-MM-DD HH:MM:SS"`), offset-aware datetimes
//! (`DateTime<FixedOffset>`), calendar dates (`NaiveDate`) and elapsed-time
//! strings (`"H:MM:SS"`). Offsets are whole hours from UTC, never named zones.
//!
//! ## Modules
//!
//! - [`format`] — Wire formats, offset construction, date/datetime string adapters
//! - [`convert`] — Timestamp, datetime string, aware datetime and date conversions
//! - [`calendar`] — Day arithmetic, day of week, inclusive date ranges
//! - [`duration`] — `H:MM:SS` elapsed-time parsing and arithmetic
//! - [`clock`] — Current time at a fixed offset
//! - [`error`] — Error types

pub mod calendar;
pub mod clock;
pub mod convert;
pub mod duration;
pub mod error;
pub mod format;

pub use calendar::{
    add_days, add_seconds, collect_date_range, date_range, day_of_week, DateRange,
};
pub use clock::{now, now_from, now_jst, JST_OFFSET_HOURS};
pub use convert::{
    aware_to_date, aware_to_datetime_string, aware_to_timestamp, date_to_aware,
    date_to_datetime_string, date_to_timestamp, datetime_string_to_aware,
    datetime_string_to_date, datetime_string_to_time, datetime_string_to_timestamp,
    timestamp_to_aware, timestamp_to_aware_in, timestamp_to_date, timestamp_to_date_in,
    timestamp_to_datetime_string, timestamp_to_datetime_string_in,
};
pub use duration::{add_seconds_to_duration, elapsed_duration, sum_durations, ElapsedTime};
pub use error::{DtError, Result};
pub use format::{
    fixed_offset, format_date, parse_date, parse_datetime, DATETIME_FORMAT, DATE_FORMAT,
    TIME_FORMAT,
};
