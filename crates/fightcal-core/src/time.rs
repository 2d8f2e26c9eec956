//! Fight timing.
//!
//! Providers never report how long a card runs, so every fight event is
//! given the fixed [`fight_duration`]. Provider dates arrive either as RFC 3339
//! timestamps or as naive ISO timestamps; the latter are read as UTC.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Length of every fight event, in minutes.
pub const FIGHT_DURATION_MINUTES: i64 = 120;

/// Naive formats accepted after RFC 3339 fails, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns the fixed duration of a fight event.
pub fn fight_duration() -> Duration {
    Duration::minutes(FIGHT_DURATION_MINUTES)
}

/// Parses a provider date string into a UTC timestamp.
///
/// Returns `None` when no accepted format matches.
pub fn parse_fight_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn duration_is_two_hours() {
        assert_eq!(fight_duration(), Duration::hours(2));
    }

    #[test]
    fn parses_rfc3339_utc() {
        assert_eq!(
            parse_fight_date("2025-05-01T20:00:00Z"),
            Some(utc(2025, 5, 1, 20, 0))
        );
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_fight_date("2025-06-14T22:00:00-04:00"),
            Some(utc(2025, 6, 15, 2, 0))
        );
    }

    #[test]
    fn parses_naive_timestamp_as_utc() {
        assert_eq!(
            parse_fight_date("2025-09-13T22:00:00"),
            Some(utc(2025, 9, 13, 22, 0))
        );
        assert_eq!(
            parse_fight_date("2025-09-13 22:00"),
            Some(utc(2025, 9, 13, 22, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_fight_date(""), None);
        assert_eq!(parse_fight_date("   "), None);
        assert_eq!(parse_fight_date("Sat, Jun 14 / 10:00 PM EDT"), None);
        assert_eq!(parse_fight_date("2025-13-40T25:00:00Z"), None);
    }
}
