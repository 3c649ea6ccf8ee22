// Date utility functions
// Parsing and arithmetic on naive (wall-clock) date-times

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Milliseconds in one calendar day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59 is always representable
    date.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(date))
}

/// Signed, fractional number of days from `start` to `end`.
///
/// Computed from the millisecond difference, so time components produce
/// fractional values and `end < start` produces a negative count.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Parse a date or date-time string as supplied by a data source.
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DDTHH:MM[:SS[.fff]]` (with `T`
/// or a space separator) and RFC 3339. For RFC 3339 the offset is dropped and
/// the wall-clock time kept.
pub fn parse_date_input(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(start_of_day(date));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Serde adapter for date-times that may arrive as plain dates.
pub mod flexible_datetime {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(OUTPUT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_input(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date or date-time '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date_is_midnight() {
        let parsed = parse_date_input("2025-01-11").unwrap();
        assert_eq!(parsed, start_of_day(ymd(2025, 1, 11)));
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = ymd(2025, 1, 11).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(parse_date_input("2025-01-11T09:30:00"), Some(expected));
        assert_eq!(parse_date_input("2025-01-11T09:30"), Some(expected));
        assert_eq!(parse_date_input("2025-01-11 09:30"), Some(expected));
        assert_eq!(parse_date_input("  2025-01-11T09:30:00.000 "), Some(expected));
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let parsed = parse_date_input("2025-01-11T09:30:00+10:00").unwrap();
        assert_eq!(parsed, ymd(2025, 1, 11).and_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_input("not a date"), None);
        assert_eq!(parse_date_input("2025-13-40"), None);
        assert_eq!(parse_date_input("   "), None);
    }

    #[test]
    fn test_days_between_fractional_and_negative() {
        let start = start_of_day(ymd(2025, 1, 1));
        let noon = ymd(2025, 1, 2).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(days_between(start, noon), 1.5);
        assert_eq!(days_between(noon, start), -1.5);
        assert_eq!(days_between(start, start), 0.0);
    }

    #[test]
    fn test_day_boundaries() {
        let date = ymd(2025, 2, 14);
        assert!(is_same_day(start_of_day(date), end_of_day(date)));
        assert_eq!(end_of_day(date).time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }
}
