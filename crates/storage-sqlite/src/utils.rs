//! Text encodings used for dates and money in SQLite.
//!
//! Date-times are stored as `YYYY-MM-DD HH:MM:SS` so that SQLite's `date()`
//! truncates them to the calendar date. Money is stored as a decimal string
//! with exactly two fractional digits.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use hotelbook_core::constants::MONEY_SCALE;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DB_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn date_time_to_db(value: &NaiveDateTime) -> String {
    value.format(DB_DATE_TIME_FORMAT).to_string()
}

pub fn date_to_db(value: &NaiveDate) -> String {
    value.format(DB_DATE_FORMAT).to_string()
}

/// Lenient parse of a stored date-time; unreadable text is `None`.
pub fn date_time_from_db(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DB_DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub fn opt_date_time_from_db(value: Option<String>) -> Option<NaiveDateTime> {
    value.as_deref().and_then(date_time_from_db)
}

pub fn money_to_db(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded.to_string()
}

/// Lenient parse of stored money; unreadable text is `None`.
pub fn money_from_db(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

pub fn opt_money_from_db(value: Option<String>) -> Option<Decimal> {
    value.as_deref().and_then(money_from_db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_is_stored_with_two_fraction_digits() {
        assert_eq!(money_to_db(dec!(200)), "200.00");
        assert_eq!(money_to_db(dec!(10.005)), "10.01");
        assert_eq!(money_to_db(dec!(-1.5)), "-1.50");
        assert_eq!(money_from_db("200.00"), Some(dec!(200.00)));
        assert_eq!(money_from_db("abc"), None);
    }

    #[test]
    fn stored_dates_parse_in_either_separator() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(date_time_to_db(&expected), "2025-08-01 14:30:00");
        assert_eq!(date_time_from_db("2025-08-01 14:30:00"), Some(expected));
        assert_eq!(date_time_from_db("2025-08-01T14:30:00"), Some(expected));
        assert_eq!(
            date_time_from_db("2025-08-01"),
            Some(expected.date().and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(date_time_from_db(""), None);
    }
}
