//! Current time at a fixed UTC offset.
//!
//! [`now`] and [`now_jst`] read the OS clock through `chrono::Utc::now()`.
//! [`now_from`] does the same truncation and labeling for a caller-supplied
//! instant, which keeps it deterministic.

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};

use crate::error::DtError;
use crate::format::fixed_offset;

/// Offset of Japan Standard Time, UTC+09:00.
pub const JST_OFFSET_HOURS: i32 = 9;

/// The current instant at `offset_hours`, truncated to whole seconds.
pub fn now(offset_hours: i32) -> Result<DateTime<FixedOffset>, DtError> {
    now_from(Utc::now(), offset_hours)
}

/// [`now`] at UTC+09:00.
pub fn now_jst() -> Result<DateTime<FixedOffset>, DtError> {
    now(JST_OFFSET_HOURS)
}

/// Express `anchor` at `offset_hours` and drop its sub-second part.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use dt_utils::now_from;
///
/// let anchor: DateTime<Utc> = "2024-05-12T16:48:20.75Z".parse().unwrap();
/// let jst = now_from(anchor, 9).unwrap();
/// assert_eq!(jst.to_rfc3339(), "2024-05-13T01:48:20+09:00");
/// ```
pub fn now_from(
    anchor: DateTime<Utc>,
    offset_hours: i32,
) -> Result<DateTime<FixedOffset>, DtError> {
    let offset = fixed_offset(offset_hours)?;
    Ok(anchor.with_timezone(&offset).trunc_subsecs(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn anchor() -> DateTime<Utc> {
        "2024-05-12T16:48:20.123456789Z".parse().unwrap()
    }

    #[test]
    fn test_now_from_utc() {
        let result = now_from(anchor(), 0).unwrap();
        assert_eq!(result.to_rfc3339(), "2024-05-12T16:48:20+00:00");
    }

    #[test]
    fn test_now_from_jst_crosses_midnight() {
        let result = now_from(anchor(), JST_OFFSET_HOURS).unwrap();
        assert_eq!(result.to_rfc3339(), "2024-05-13T01:48:20+09:00");
    }

    #[test]
    fn test_now_from_truncates_not_rounds() {
        let late: DateTime<Utc> = "2024-05-12T16:48:20.999999999Z".parse().unwrap();
        let result = now_from(late, 0).unwrap();
        assert_eq!(result.second(), 20);
        assert_eq!(result.nanosecond(), 0);
    }

    #[test]
    fn test_now_from_invalid_offset() {
        let err = now_from(anchor(), 25).unwrap_err().to_string();
        assert!(err.contains("Invalid offset"), "got: {err}");
    }

    #[test]
    fn test_now_has_whole_seconds_and_offset() {
        let before = Utc::now().timestamp();
        let result = now(-3).unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(result.nanosecond(), 0);
        assert_eq!(result.offset().local_minus_utc(), -3 * 3600);
        assert!(before <= result.timestamp() && result.timestamp() <= after);
    }

    #[test]
    fn test_now_jst_offset() {
        let result = now_jst().unwrap();
        assert_eq!(result.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(result.nanosecond(), 0);
    }
}
