//! Tolerant date-time parsing for imported rows.
//!
//! Strategies are tried in fixed priority order against the combined
//! "date time" text; the first one that yields a valid point in time wins.

use chrono::{DateTime, NaiveDateTime, Utc};

type Strategy = fn(&str) -> Option<DateTime<Utc>>;

const STRATEGIES: &[Strategy] = &[
    parse_day_month_year,
    parse_rfc3339,
    parse_space_separated_iso,
];

/// Combines a date cell and a time cell and parses the result.
pub fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    parse_datetime(&format!("{} {}", date.trim(), time.trim()))
}

/// Parses a combined date-time string through the strategy list.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    STRATEGIES.iter().find_map(|strategy| strategy(trimmed))
}

/// Day/month/year with colon-separated time, the export format.
fn parse_day_month_year(text: &str) -> Option<DateTime<Utc>> {
    for format in ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Full ISO 8601 with an explicit zone offset.
fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Space-separated ISO variant without a zone, coerced to UTC.
fn parse_space_separated_iso(text: &str) -> Option<DateTime<Utc>> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("valid date")
    }

    #[test]
    fn day_month_year_wins_first() {
        assert_eq!(
            parse_timestamp("17/05/2024", "12:30:45"),
            Some(utc(2024, 5, 17, 12, 30, 45))
        );
        assert_eq!(
            parse_timestamp("17/05/2024", "12:30"),
            Some(utc(2024, 5, 17, 12, 30, 0))
        );
    }

    #[test]
    fn rfc3339_zone_is_converted_to_utc() {
        assert_eq!(
            parse_datetime("2024-05-17T14:30:45+02:00"),
            Some(utc(2024, 5, 17, 12, 30, 45))
        );
    }

    #[test]
    fn space_separated_iso_is_coerced_to_utc() {
        assert_eq!(
            parse_datetime("2024-05-17 12:30:45"),
            Some(utc(2024, 5, 17, 12, 30, 45))
        );
    }

    #[test]
    fn unmatched_text_yields_none() {
        assert_eq!(parse_datetime("May the 17th, noon"), None);
        assert_eq!(parse_timestamp("", ""), None);
        // Month/day/year order is not in the strategy list.
        assert_eq!(parse_datetime("05/45/2024 12:00:00"), None);
    }
}
