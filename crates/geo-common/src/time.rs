//! Timestamp extraction from free-form strings and file names.
//!
//! Raster products usually embed their acquisition time in the file name as
//! one of several underscore-delimited tokens, e.g.
//! `S2A_MSIL1C_20170105T013442_N0204_R031_T53NMJ.tif` or
//! `some_file_name_201201050842_with_timestamp.tif`. The helpers here walk
//! those tokens in order and return the first one that reads as a date/time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::path::Path;

/// Formats carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y%m%dT%H%M%S%z",
];

/// Naive date-time formats, interpreted as UTC wall-clock time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
];

/// Date-only formats, taken as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Conversion of a date-time value into a UTC instant.
///
/// Naive values are *assigned* UTC (wall clock unchanged); values that
/// already carry a zone are *converted* to UTC.
pub trait IntoUtc {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtc for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl<Tz: TimeZone> IntoUtc for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

/// Localize a naive instant to UTC, or convert a zoned instant to UTC.
pub fn utc_timestamp<T: IntoUtc>(ts: T) -> DateTime<Utc> {
    ts.into_utc()
}

/// Try to read a single token as a date/time.
///
/// Accepts RFC 3339 / ISO 8601 (with or without offset), compact
/// `YYYYMMDDTHHMMSS` forms, and all-digit runs of 8, 10, 12 or 14 digits.
/// Bare years and other short digit runs are rejected.
pub fn parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digit_run(token);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(utc_timestamp(dt));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(token, fmt).ok())
    {
        return Some(utc_timestamp(dt));
    }

    // A trailing `Z` marks UTC on an otherwise naive value
    let naive = token.strip_suffix('Z').unwrap_or(token);

    if let Some(ndt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
    {
        return Some(utc_timestamp(ndt));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(naive, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(utc_timestamp)
}

/// Parse a token into a UTC timestamp, failing when no format matches.
pub fn parse_utc_timestamp(token: &str) -> Result<DateTime<Utc>, TimeParseError> {
    parse_timestamp(token).ok_or_else(|| TimeParseError::InvalidFormat(token.to_string()))
}

fn parse_digit_run(digits: &str) -> Option<DateTime<Utc>> {
    let ndt = match digits.len() {
        14 => NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").ok()?,
        12 => NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M").ok()?,
        10 => NaiveDateTime::parse_from_str(&format!("{digits}00"), "%Y%m%d%H%M").ok()?,
        8 => NaiveDate::parse_from_str(digits, "%Y%m%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?,
        _ => return None,
    };
    Some(utc_timestamp(ndt))
}

/// Underscore-delimited substrings of `s`, in order.
pub fn candidate_tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split('_').filter(|t| !t.is_empty())
}

/// First underscore-delimited token of `s` that parses as a timestamp.
pub fn timestamp_from_string(s: &str) -> Option<DateTime<Utc>> {
    candidate_tokens(s).find_map(parse_timestamp)
}

/// Timestamp embedded in a file's base name (extension removed).
pub fn timestamp_from_filename(path: impl AsRef<Path>) -> Option<DateTime<Utc>> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    timestamp_from_string(stem)
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_digit_run_lengths() {
        let expected = Utc.with_ymd_and_hms(2012, 1, 5, 8, 42, 0).unwrap();
        assert_eq!(parse_timestamp("201201050842"), Some(expected));
        assert_eq!(parse_timestamp("20120105084200"), Some(expected));
        assert_eq!(
            parse_timestamp("2012010508"),
            Some(Utc.with_ymd_and_hms(2012, 1, 5, 8, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("20120105"),
            Some(Utc.with_ymd_and_hms(2012, 1, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_rejects_short_and_invalid_digits() {
        assert_eq!(parse_timestamp("2012"), None);
        assert_eq!(parse_timestamp("0001"), None);
        assert_eq!(parse_timestamp("20121305"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_offset_is_converted() {
        let dt = parse_timestamp("2012-01-05T10:42:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2012, 1, 5, 8, 42, 0).unwrap());

        let compact = parse_timestamp("20120105T104200+0200").unwrap();
        assert_eq!(compact, dt);
    }

    #[test]
    fn test_compact_iso_forms() {
        let expected = Utc.with_ymd_and_hms(2017, 1, 5, 1, 34, 42).unwrap();
        assert_eq!(parse_timestamp("20170105T013442"), Some(expected));
        assert_eq!(parse_timestamp("20170105T013442Z"), Some(expected));
        assert_eq!(parse_timestamp("2017-01-05T01:34:42Z"), Some(expected));
    }

    #[test]
    fn test_date_only_forms() {
        let expected = Utc.with_ymd_and_hms(2012, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2012-01-05"), Some(expected));
        assert_eq!(parse_timestamp("2012/01/05"), Some(expected));
        assert_eq!(parse_timestamp("2012.01.05"), Some(expected));
    }

    #[test]
    fn test_utc_timestamp_naive_is_assigned() {
        let naive = NaiveDate::from_ymd_opt(2012, 1, 5)
            .unwrap()
            .and_hms_opt(8, 42, 0)
            .unwrap();
        let ts = utc_timestamp(naive);
        assert_eq!(ts.naive_utc(), naive);
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_utc_timestamp_zoned_is_converted() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2012, 1, 5, 13, 42, 0).unwrap();
        let ts = utc_timestamp(local);
        assert_eq!(ts, Utc.with_ymd_and_hms(2012, 1, 5, 8, 42, 0).unwrap());
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn test_parse_utc_timestamp_error() {
        assert!(parse_utc_timestamp("tif").is_err());
    }
}
