//! Elapsed-time strings (`H:MM:SS`) and their arithmetic.
//!
//! # Format
//!
//! The hour field has any number of digits and is never padded (`0` for
//! zero hours; leading zeros are accepted on input). Minutes and seconds are
//! exactly two digits each, `00`–`59`. Hours may exceed 23: `"65:43:21"` is a
//! valid duration.
//!
//! Fields are located from the right: the last two characters are seconds,
//! the two before the second-to-last colon are minutes, and everything before
//! that colon is hours. Strings that do not fit this layout are rejected with
//! [`DtError::InvalidDuration`] rather than being read at the wrong offsets.
//!
//! Durations are never negative. Arithmetic that would go below zero returns
//! [`DtError::NegativeDuration`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DtError;

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const SECONDS_PER_DAY: i64 = 86_400;
const HOURS_PER_DAY: u64 = 24;

/// A non-negative elapsed time, displayed as `H:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedTime {
    hours: u64,
    minutes: u8,
    seconds: u8,
}

impl ElapsedTime {
    /// Build from components. `minutes` and `seconds` must be below 60.
    pub fn new(hours: u64, minutes: u8, seconds: u8) -> Result<Self, DtError> {
        if minutes > 59 || seconds > 59 {
            return Err(DtError::InvalidDuration(format!(
                "minutes and seconds must be 0-59, got {minutes}:{seconds}"
            )));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Normalize a count of seconds into hours, minutes and seconds.
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Elapsed time between two instants, comparing them as true instants.
    ///
    /// The difference is split into whole days plus leftover seconds; hours
    /// are `days * 24` plus the leftover hours. Sub-second remainders are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DtError::NegativeDuration`] if `end` is before `start`.
    pub fn between(
        start: &DateTime<FixedOffset>,
        end: &DateTime<FixedOffset>,
    ) -> Result<Self, DtError> {
        let delta = end.signed_duration_since(*start);
        if delta < TimeDelta::zero() {
            return Err(DtError::NegativeDuration(format!(
                "end {end} is before start {start}"
            )));
        }

        let total = delta.num_seconds();
        let days = (total / SECONDS_PER_DAY) as u64;
        let leftover = Self::from_seconds((total % SECONDS_PER_DAY) as u64);
        Ok(Self {
            hours: days * HOURS_PER_DAY + leftover.hours,
            ..leftover
        })
    }

    /// Hour field, unbounded.
    pub fn hours(&self) -> u64 {
        self.hours
    }

    /// Minute field, `0..=59`.
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Second field, `0..=59`.
    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Total length in seconds, or `None` if it does not fit in a `u64`.
    pub fn total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }

    /// Add a signed number of seconds.
    ///
    /// `n` is split into hours, minutes and seconds with floor division, so
    /// `-1` becomes `-1h +59m +59s`. Each field is then added with carry from
    /// seconds into minutes and from minutes into hours.
    ///
    /// # Errors
    ///
    /// Returns [`DtError::NegativeDuration`] if the result is below zero.
    pub fn checked_add_seconds(self, n: i64) -> Result<Self, DtError> {
        let (n_minutes, n_seconds) = floor_div_mod(n, SECONDS_PER_MINUTE);
        let (n_hours, n_minutes) = floor_div_mod(n_minutes, MINUTES_PER_HOUR);
        self.carry_add(i128::from(n_hours), n_minutes, n_seconds)
    }

    /// Add two durations field by field with carry.
    pub fn checked_add(self, other: ElapsedTime) -> Result<Self, DtError> {
        self.carry_add(
            i128::from(other.hours),
            i64::from(other.minutes),
            i64::from(other.seconds),
        )
    }

    fn carry_add(self, hours: i128, minutes: i64, seconds: i64) -> Result<Self, DtError> {
        let (carry, second) =
            floor_div_mod(i64::from(self.seconds) + seconds, SECONDS_PER_MINUTE);
        let (carry, minute) =
            floor_div_mod(i64::from(self.minutes) + minutes + carry, MINUTES_PER_HOUR);
        let hour = i128::from(self.hours) + hours + i128::from(carry);

        log::trace!("{self} + ({hours}h {minutes}m {seconds}s) -> {hour}h {minute}m {second}s");

        if hour < 0 {
            return Err(DtError::NegativeDuration(format!(
                "{self} {:+}h {:+}m {:+}s falls below zero",
                hours, minutes, seconds
            )));
        }
        let hours = u64::try_from(hour)
            .map_err(|_| DtError::OutOfRange(format!("{hour} hours does not fit")))?;
        Ok(Self {
            hours,
            minutes: minute as u8,
            seconds: second as u8,
        })
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for ElapsedTime {
    type Err = DtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DtError::InvalidDuration(format!("'{s}': {reason}"));

        let bytes = s.as_bytes();
        let len = bytes.len();
        if len < 7 || bytes[len - 3] != b':' || bytes[len - 6] != b':' {
            return Err(invalid("expected H:MM:SS"));
        }

        // bytes[len - 6] is ASCII, so this is a char boundary
        let hour_field = &s[..len - 6];
        if !hour_field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("hours must be digits"));
        }
        let hours = hour_field
            .parse::<u64>()
            .map_err(|_| invalid("hours out of range"))?;
        let minutes =
            two_digits(&bytes[len - 5..len - 3]).ok_or_else(|| invalid("bad minutes"))?;
        let seconds = two_digits(&bytes[len - 2..]).ok_or_else(|| invalid("bad seconds"))?;

        Self::new(hours, minutes, seconds)
            .map_err(|_| invalid("minutes and seconds must be 00-59"))
    }
}

impl Serialize for ElapsedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElapsedTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── String-level operations ─────────────────────────────────────────────────

/// Add `n` seconds (possibly negative) to a duration string.
///
/// # Examples
///
/// ```
/// use dt_utils::add_seconds_to_duration;
///
/// assert_eq!(add_seconds_to_duration("9:00:00", 3601).unwrap(), "10:00:01");
/// assert_eq!(add_seconds_to_duration("10:00:00", -3600).unwrap(), "9:00:00");
/// ```
pub fn add_seconds_to_duration(dur: &str, n: i64) -> Result<String, DtError> {
    let elapsed: ElapsedTime = dur.parse()?;
    Ok(elapsed.checked_add_seconds(n)?.to_string())
}

/// Sum two duration strings.
///
/// # Examples
///
/// ```
/// use dt_utils::sum_durations;
///
/// assert_eq!(sum_durations("5:55:55", "4:44:44").unwrap(), "10:40:39");
/// ```
pub fn sum_durations(dur1: &str, dur2: &str) -> Result<String, DtError> {
    let a: ElapsedTime = dur1.parse()?;
    let b: ElapsedTime = dur2.parse()?;
    Ok(a.checked_add(b)?.to_string())
}

/// Elapsed time from `start` to `end` as a duration string.
///
/// Offsets are honored: the two values are compared as instants, not as
/// wall-clock readings.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use dt_utils::elapsed_duration;
///
/// let start = DateTime::parse_from_rfc3339("1970-01-01T00:00:00+00:00").unwrap();
/// let end = DateTime::parse_from_rfc3339("1970-01-02T12:34:56+09:00").unwrap();
/// assert_eq!(elapsed_duration(&start, &end).unwrap(), "27:34:56");
/// ```
pub fn elapsed_duration(
    start: &DateTime<FixedOffset>,
    end: &DateTime<FixedOffset>,
) -> Result<String, DtError> {
    Ok(ElapsedTime::between(start, end)?.to_string())
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Floor division with a non-negative remainder: `(-1, 60)` → `(-1, 59)`.
fn floor_div_mod(n: i64, d: i64) -> (i64, i64) {
    (n.div_euclid(d), n.rem_euclid(d))
}

fn two_digits(field: &[u8]) -> Option<u8> {
    match field {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
