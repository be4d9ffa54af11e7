//! Wire formats and boundary adapters.
//!
//! Every string crossing the crate boundary uses one of three layouts:
//!
//! | Kind     | Layout                | Example               |
//! |----------|-----------------------|-----------------------|
//! | datetime | `YYYY-MM-DD HH:MM:SS` | `2024-04-02 00:00:00` |
//! | date     | `YYYY-MM-DD`          | `2024-04-02`          |
//! | time     | `HH:MM:SS`            | `12:34:56`            |
//!
//! Dates are carried internally as [`NaiveDate`]; [`parse_date`] and
//! [`format_date`] convert at the edges.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Timelike};

use crate::error::DtError;

/// `strftime` layout of a naive datetime string.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `strftime` layout of a date string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `strftime` layout of a time-of-day string.
pub const TIME_FORMAT: &str = "%H:%M:%S";

// `#` stands for one ASCII digit; every other byte must match exactly.
const DATETIME_LAYOUT: &[u8] = b"####-##-## ##:##:##";
const DATE_LAYOUT: &[u8] = b"####-##-##";

const SECONDS_PER_HOUR: i32 = 3600;

/// Build a fixed UTC offset from whole hours.
///
/// # Errors
///
/// Returns [`DtError::InvalidOffset`] unless `-24 < hours < 24`.
///
/// # Examples
///
/// ```
/// use dt_utils::fixed_offset;
///
/// assert_eq!(fixed_offset(9).unwrap().local_minus_utc(), 9 * 3600);
/// assert!(fixed_offset(24).is_err());
/// ```
pub fn fixed_offset(hours: i32) -> Result<FixedOffset, DtError> {
    hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| DtError::InvalidOffset(format!("{hours} hours is outside -23..=23")))
}

/// Parse a naive datetime string (`YYYY-MM-DD HH:MM:SS`).
///
/// The layout is strict: exactly 19 characters, zero-padded digits in every
/// field, a single space between date and time, no sign, no fractional
/// seconds, no offset suffix. A leap second (`:60`) is rejected.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, DtError> {
    if !matches_layout(s.as_bytes(), DATETIME_LAYOUT) {
        return Err(DtError::InvalidDatetime(format!(
            "'{s}': expected YYYY-MM-DD HH:MM:SS"
        )));
    }
    let dt = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|e| DtError::InvalidDatetime(format!("'{s}': {e}")))?;
    // chrono encodes second 60 as nanosecond >= 1_000_000_000
    if dt.nanosecond() >= 1_000_000_000 {
        return Err(DtError::InvalidDatetime(format!(
            "'{s}': leap seconds are not supported"
        )));
    }
    Ok(dt)
}

/// Format a naive datetime as `YYYY-MM-DD HH:MM:SS`. Sub-second digits are dropped.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use dt_utils::parse_date;
///
/// let d = parse_date("2024-02-29").unwrap();
/// assert_eq!(d.to_string(), "2024-02-29");
/// assert!(parse_date("2023-02-29").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate, DtError> {
    if !matches_layout(s.as_bytes(), DATE_LAYOUT) {
        return Err(DtError::InvalidDate(format!("'{s}': expected YYYY-MM-DD")));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DtError::InvalidDate(format!("'{s}': {e}")))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn matches_layout(bytes: &[u8], layout: &[u8]) -> bool {
    bytes.len() == layout.len()
        && bytes.iter().zip(layout).all(|(&b, &l)| match l {
            b'#' => b.is_ascii_digit(),
            _ => b == l,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fixed_offset ────────────────────────────────────────────────────

    #[test]
    fn test_fixed_offset_positive_and_negative() {
        assert_eq!(fixed_offset(9).unwrap().local_minus_utc(), 32400);
        assert_eq!(fixed_offset(-5).unwrap().local_minus_utc(), -18000);
        assert_eq!(fixed_offset(0).unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_fixed_offset_out_of_range() {
        for hours in [24, -24, 100, i32::MAX, i32::MIN] {
            let err = fixed_offset(hours).unwrap_err().to_string();
            assert!(err.contains("Invalid offset"), "got: {err}");
        }
    }

    // ── parse_datetime ──────────────────────────────────────────────────

    #[test]
    fn test_parse_datetime_valid() {
        let dt = parse_datetime("2024-04-02 12:34:56").unwrap();
        assert_eq!(format_datetime(&dt), "2024-04-02 12:34:56");
    }

    #[test]
    fn test_parse_datetime_rejects_other_layouts() {
        for s in [
            "2024-04-02T12:34:56",
            "2024-04-02 12:34:56.5",
            "2024-04-02 12:34:56+09:00",
            "2024-04-02",
            "2024-4-2 12:34:56",
            "",
            "not a datetime at all",
            "2024-01-01 12: 4:56",
            "2024-01-01  1:00:00",
            "+024-01-01 00:00:00",
            "2024- 1-01 00:00:00",
            "2024-01-01 00:00:0a",
        ] {
            let err = parse_datetime(s).unwrap_err().to_string();
            assert!(err.contains("Invalid datetime"), "{s}: {err}");
        }
    }

    #[test]
    fn test_parse_datetime_rejects_leap_second() {
        let err = parse_datetime("2024-01-01 23:59:60").unwrap_err().to_string();
        assert!(err.contains("leap second"), "got: {err}");
        assert!(parse_datetime("2024-01-01 23:59:59").is_ok());
    }

    #[test]
    fn test_parse_datetime_rejects_impossible_fields() {
        assert!(parse_datetime("2024-02-30 00:00:00").is_err());
        assert!(parse_datetime("2024-01-01 24:00:00").is_err());
        assert!(parse_datetime("2024-01-01 00:60:00").is_err());
    }

    // ── dates ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_and_format_date() {
        let d = parse_date("1970-01-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(format_date(d), "1970-01-01");
    }

    #[test]
    fn test_parse_date_rejects_padding_and_sign() {
        for s in ["2024- 1-01", "2024-01- 1", "+024-01-01", " 2024-1-01", "2024-01-1x"] {
            let err = parse_date(s).unwrap_err().to_string();
            assert!(err.contains("Invalid date"), "{s}: {err}");
        }
    }

    #[test]
    fn test_parse_date_rejects_datetime() {
        let err = parse_date("1970-01-01 00:00:00").unwrap_err().to_string();
        assert!(err.contains("Invalid date"), "got: {err}");
    }

    #[test]
    fn test_format_date_matches_display() {
        let d = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        assert_eq!(format_date(d), d.to_string());
    }
}
