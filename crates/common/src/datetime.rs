//! DateTime utilities.

use chrono::{DateTime, Local, TimeZone};

/// Format of the `timestamp` column of the leaderboard file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a time as a leaderboard timestamp.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use leaderboard_common::datetime::format_timestamp;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 1).unwrap();
/// assert_eq!(format_timestamp(&t), "2024-03-05 09:07:01");
/// ```
pub fn format_timestamp<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time as a leaderboard timestamp.
pub fn now_local_timestamp() -> String {
    format_timestamp(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_now_matches_format() {
        let ts = now_local_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}
