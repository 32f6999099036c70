//! Range bound values: dates (with "now") and decimal quantities

use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Token that stands for the instant a bound is parsed
pub const NOW: &str = "now";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeValueError {
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),
}

/// A date bound, or "now" resolved once when the value is created
///
/// Two "now" values created at different instants are different values;
/// "now" is never re-evaluated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateAndNow {
    instant: DateTime<Utc>,
    is_now: bool,
}

impl DateAndNow {
    pub fn date(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            is_now: false,
        }
    }

    /// Capture the current wall-clock instant
    pub fn now() -> Self {
        Self {
            instant: Utc::now(),
            is_now: true,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn is_now(&self) -> bool {
        self.is_now
    }

    /// `xsd:dateTime` lexical form of the instant
    pub fn to_xsd(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Display for DateAndNow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_now {
            f.write_str(NOW)
        } else {
            write!(f, "{}", self.instant.format(DATE_TIME_FORMAT))
        }
    }
}

/// Parse a date bound in UTC
pub fn parse_date(text: &str) -> Result<DateAndNow, RangeValueError> {
    parse_date_in(text, &Utc)
}

/// Parse a date bound, reading partial dates in the given time zone
///
/// A year (`2014`) becomes its first month, a month (`2014-05`) its first
/// day, and a day (`2014-05-01`) its midnight. `now` is the current instant.
pub fn parse_date_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<DateAndNow, RangeValueError> {
    let text = text.trim();
    if text == NOW {
        return Ok(DateAndNow::now());
    }

    let mut padded = text.to_string();
    if padded.chars().count() == 4 {
        padded.push_str("-01");
    }
    if padded.chars().count() == 7 {
        padded.push_str("-01");
    }
    if padded.chars().count() == 10 {
        padded.push_str(" 00:00:00");
    }

    let invalid = || RangeValueError::InvalidDate(text.to_string());
    let naive = NaiveDateTime::parse_from_str(&padded, DATE_TIME_FORMAT).map_err(|_| invalid())?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) | LocalResult::Ambiguous(local, _) => {
            Ok(DateAndNow::date(local.with_timezone(&Utc)))
        }
        LocalResult::None => Err(invalid()),
    }
}

/// An `xsd:decimal` value kept in its lexical form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    pub fn parse(text: &str) -> Result<Self, RangeValueError> {
        let text = text.trim();
        let unsigned = text.strip_prefix('+').unwrap_or(text);
        let digits = match text.strip_prefix('-') {
            Some(rest) => rest,
            None => unsigned,
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "0"));
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(integer) || !is_digits(fraction) {
            return Err(RangeValueError::InvalidDecimal(text.to_string()));
        }
        Ok(Self(unsigned.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_partial_dates_are_padded() {
        let year = parse_date("2014").unwrap();
        let month = parse_date("2014-01").unwrap();
        let day = parse_date("2014-01-01").unwrap();
        let full = parse_date("2014-01-01 00:00:00").unwrap();
        assert_eq!(year, month);
        assert_eq!(month, day);
        assert_eq!(day, full);
        assert_eq!(year.instant(), Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_now_is_captured_at_parse_time() {
        let before = Utc::now();
        let now = parse_date("now").unwrap();
        let after = Utc::now();
        assert!(now.is_now());
        assert!(now.instant() >= before);
        assert!(now.instant() <= after);
        assert_eq!(now.to_string(), "now");
    }

    #[test]
    fn test_invalid_dates() {
        for bad in ["", "14", "2014-1", "2014-13-01", "yesterday", "NOW"] {
            assert!(parse_date(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_explicit_time_zone() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let date = parse_date_in("2014-01-01", &cet).unwrap();
        assert_eq!(date.instant(), Utc.with_ymd_and_hms(2013, 12, 31, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_xsd_form() {
        assert_eq!(parse_date("1500").unwrap().to_xsd(), "1500-01-01T00:00:00");
        assert_eq!(parse_date("1500").unwrap().to_string(), "1500-01-01 00:00:00");
    }

    #[test]
    fn test_decimal() {
        assert_eq!(Decimal::parse("10").unwrap().as_str(), "10");
        assert_eq!(Decimal::parse("+1.5").unwrap().as_str(), "1.5");
        assert_eq!(Decimal::parse("-273.15").unwrap().as_str(), "-273.15");
        for bad in ["", "1e5", "NaN", "inf", "1.", ".5", "1,5", "--1", "+-1", "-+1", "++1"] {
            assert!(Decimal::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
