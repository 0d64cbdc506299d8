//! Frequency and date helpers for price history requests.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::FrequencyType;
use crate::{Error, Result};

/// Date format used by the API for day-resolution dates.
pub const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a frequency string into a count and unit.
///
/// A missing count means 1.
///
/// ```
/// use tdameritrade_rs::models::FrequencyType;
/// use tdameritrade_rs::util::parse_frequency;
///
/// assert_eq!(parse_frequency("5minute").unwrap(), (5, FrequencyType::Minute));
/// assert_eq!(parse_frequency("daily").unwrap(), (1, FrequencyType::Daily));
/// ```
pub fn parse_frequency(frequency: &str) -> Result<(u32, FrequencyType)> {
    let split = frequency
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(frequency.len());
    let (count, unit) = frequency.split_at(split);

    let count = if count.is_empty() {
        1
    } else {
        count
            .parse::<u32>()
            .map_err(|e| Error::InvalidInput(format!("Invalid frequency count {}: {}", count, e)))?
    };
    if count == 0 {
        return Err(Error::InvalidInput(format!(
            "Frequency count must be positive: {}",
            frequency
        )));
    }

    Ok((count, unit.parse()?))
}

/// Parse a `YYYY-MM-DD` date.
pub fn short_date_to_naive(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, SHORT_DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid date {}: {}", date, e)))
}

/// Format a date as `YYYY-MM-DD`.
pub fn naive_to_short_date(date: NaiveDate) -> String {
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// Convert epoch milliseconds to a UTC timestamp.
pub fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::InvalidInput(format!("Timestamp out of range: {}", millis)))
}

/// Convert epoch milliseconds to a `YYYY-MM-DD` string (UTC).
pub fn millis_to_short_date(millis: i64) -> Result<String> {
    Ok(naive_to_short_date(millis_to_datetime(millis)?.date_naive()))
}

/// A date bound accepted by price history requests.
///
/// Day-resolution dates are taken as midnight UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateArg {
    /// A calendar day
    Date(NaiveDate),
    /// An exact instant
    DateTime(DateTime<Utc>),
    /// A `YYYY-MM-DD` string
    Short(String),
}

impl DateArg {
    /// Epoch milliseconds of this bound.
    pub fn to_millis(&self) -> Result<i64> {
        match self {
            DateArg::Date(date) => Ok(date_to_millis(*date)),
            DateArg::DateTime(dt) => Ok(dt.timestamp_millis()),
            DateArg::Short(s) => Ok(date_to_millis(short_date_to_naive(s)?)),
        }
    }
}

/// Epoch milliseconds of midnight UTC on `date`.
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis()
}

impl From<NaiveDate> for DateArg {
    fn from(date: NaiveDate) -> Self {
        DateArg::Date(date)
    }
}

impl From<DateTime<Utc>> for DateArg {
    fn from(dt: DateTime<Utc>) -> Self {
        DateArg::DateTime(dt)
    }
}

impl From<&str> for DateArg {
    fn from(s: &str) -> Self {
        DateArg::Short(s.to_string())
    }
}

impl From<String> for DateArg {
    fn from(s: String) -> Self {
        DateArg::Short(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("1minute").unwrap(), (1, FrequencyType::Minute));
        assert_eq!(parse_frequency("30minute").unwrap(), (30, FrequencyType::Minute));
        assert_eq!(parse_frequency("weekly").unwrap(), (1, FrequencyType::Weekly));
    }

    #[test]
    fn test_parse_frequency_invalid() {
        assert!(matches!(parse_frequency("5hour"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_frequency("0minute"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_frequency(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_short_dates() {
        let date = short_date_to_naive("2021-06-07").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 6, 7).unwrap());
        assert_eq!(naive_to_short_date(date), "2021-06-07");

        assert!(short_date_to_naive("2021/06/07").is_err());
        assert!(short_date_to_naive("2021-13-45").is_err());
    }

    #[test]
    fn test_date_arg_to_millis() {
        assert_eq!(DateArg::from("2021-06-07").to_millis().unwrap(), 1_623_024_000_000);

        let dt = Utc.with_ymd_and_hms(2021, 6, 7, 13, 0, 0).unwrap();
        assert_eq!(DateArg::from(dt).to_millis().unwrap(), 1_623_070_800_000);
        assert!(DateArg::from("not-a-date").to_millis().is_err());
    }

    #[test]
    fn test_millis_round_trip() {
        assert_eq!(millis_to_short_date(1_623_070_800_000).unwrap(), "2021-06-07");
        assert_eq!(
            millis_to_datetime(1_623_070_800_000).unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 7, 13, 0, 0).unwrap()
        );
    }
}
