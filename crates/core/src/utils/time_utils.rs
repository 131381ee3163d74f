use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{Error, Result, ValidationError};

/// Wire format used for every date-time the API emits.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The "not provided" date-time: 0001-01-01 00:00:00.
///
/// Missing dates read from storage coerce to this value, and the flattening
/// encoder turns it back into an absent value.
pub fn min_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::default())
}

pub fn is_min_date_time(value: &NaiveDateTime) -> bool {
    *value == min_date_time()
}

/// Parses a client supplied date or date-time.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.f]`, the same with a space
/// separator, and RFC 3339 with an offset (the local wall time is kept).
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime> {
    let value = input.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()))
        .map_err(|_| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a valid date",
                value
            )))
        })
}

/// Parses an optional date filter. Blank input means no filter; only the
/// calendar date of a date-time is kept.
pub fn parse_filter_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date_time(value).map(|dt| Some(dt.date())),
    }
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Serde adapter for mandatory date-time fields.
///
/// `null`, a missing value or an empty string deserialize to [`min_date_time`].
pub mod flexible_date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(super::DATE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(super::min_date_time()),
            Some(value) => super::parse_date_time(value).map_err(serde::de::Error::custom),
        }
    }
}

/// Serde adapter for nullable date-time fields.
pub mod flexible_date_time_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(super::DATE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_date_time(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_date_time("2025-03-14T10:30:00").unwrap(), expected);
        assert_eq!(parse_date_time("2025-03-14 10:30:00").unwrap(), expected);
        assert_eq!(parse_date_time("2025-03-14T10:30:00.000").unwrap(), expected);
        assert_eq!(parse_date_time("2025-03-14T10:30:00+05:30").unwrap(), expected);
        assert_eq!(
            parse_date_time("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_date_time("14/03/2025"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn filter_date_truncates_and_treats_blank_as_missing() {
        assert_eq!(parse_filter_date(None).unwrap(), None);
        assert_eq!(parse_filter_date(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_filter_date(Some("2025-01-02T23:59:59")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 2)
        );
    }

    #[test]
    fn min_sentinel_is_year_one() {
        let sentinel = min_date_time();
        assert_eq!(sentinel.format("%Y-%m-%d %H:%M:%S").to_string(), "0001-01-01 00:00:00");
        assert!(is_min_date_time(&sentinel));
    }

    #[test]
    fn days_between_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        assert_eq!(get_days_between(start, end).len(), 4);
        assert!(get_days_between(end, start).is_empty());
    }
}
