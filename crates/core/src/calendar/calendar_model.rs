//! Calendar grid models and the room × day expansion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::{flexible_date_time, flexible_date_time_opt, get_days_between};

/// Which rooms a calendar shows. The wire value is 1 for rooms, 2 for
/// banquet halls; anything else shows both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarType {
    Rooms,
    Banquets,
    All,
}

impl From<i32> for CalendarType {
    fn from(value: i32) -> Self {
        match value {
            1 => CalendarType::Rooms,
            2 => CalendarType::Banquets,
            _ => CalendarType::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub calendar_type: i32,
    pub status_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRoom {
    pub room_id: i64,
    pub room_code: String,
    pub description: String,
    pub room_size: Option<String>,
    pub is_room: bool,
    pub is_banquet: bool,
}

/// A booked room line with its reservation, customer and status columns.
/// Empty calendar cells carry the default (all `None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarBooking {
    pub reservation_no: Option<String>,
    #[serde(with = "flexible_date_time_opt")]
    pub reservation_date: Option<NaiveDateTime>,
    pub reservation_status: Option<String>,
    pub status_id: Option<i32>,
    pub customer_code: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    #[serde(with = "flexible_date_time_opt")]
    pub checkin_date_time: Option<NaiveDateTime>,
    #[serde(with = "flexible_date_time_opt")]
    pub checkout_date_time: Option<NaiveDateTime>,
    pub gross_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub due_amount: Option<Decimal>,
    pub customer_name: Option<String>,
    pub customer_title: Option<String>,
    pub color_code: Option<String>,
    pub status_name: Option<String>,
    pub reserved_room_code: Option<String>,
    #[serde(with = "flexible_date_time_opt")]
    pub checkin_date: Option<NaiveDateTime>,
    #[serde(with = "flexible_date_time_opt")]
    pub checkout_date: Option<NaiveDateTime>,
    pub room_amount: Option<Decimal>,
    pub price: Option<Decimal>,
    pub no_of_days: Option<i32>,
}

impl CalendarBooking {
    /// Stay as calendar dates, falling back to the header stay when the line
    /// has no dates of its own.
    fn stay(&self) -> Option<(NaiveDate, NaiveDate)> {
        let checkin = self.checkin_date.or(self.checkin_date_time)?.date();
        let checkout = self
            .checkout_date
            .or(self.checkout_date_time)
            .map(|dt| dt.date())
            .unwrap_or(checkin);
        Some((checkin, checkout))
    }

    /// Nights are `[checkin, checkout)`; a same-day stay occupies its
    /// check-in day.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        match self.stay() {
            Some((checkin, checkout)) if checkout > checkin => checkin <= day && day < checkout,
            Some((checkin, _)) => day == checkin,
            None => false,
        }
    }
}

/// One calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    #[serde(rename = "roomID")]
    pub room_id: i64,
    pub room_code: String,
    pub description: String,
    pub room_size: Option<String>,
    pub is_room: bool,
    pub is_banquet: bool,
    #[serde(with = "flexible_date_time")]
    pub date_value: NaiveDateTime,
    pub display_date: String,
    pub day_name: String,
    #[serde(flatten)]
    pub booking: CalendarBooking,
}

impl CalendarEntry {
    fn new(room: &CalendarRoom, day: NaiveDate, booking: CalendarBooking) -> Self {
        Self {
            room_id: room.room_id,
            room_code: room.room_code.clone(),
            description: room.description.clone(),
            room_size: room.room_size.clone(),
            is_room: room.is_room,
            is_banquet: room.is_banquet,
            date_value: day.and_time(NaiveTime::default()),
            display_date: day.format("%d-%b").to_string(),
            day_name: day.format("%A").to_string(),
            booking,
        }
    }
}

/// Expands rooms × days in `[start, end]`. Days with several bookings for
/// the same room yield one entry per booking; free days yield one empty
/// entry. Output is grouped by room (input order), then day.
pub fn build_calendar_grid(
    rooms: &[CalendarRoom],
    bookings: &[CalendarBooking],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<CalendarEntry> {
    let days = get_days_between(start, end);
    let mut entries = Vec::with_capacity(rooms.len() * days.len());

    for room in rooms {
        let room_bookings: Vec<&CalendarBooking> = bookings
            .iter()
            .filter(|b| b.reserved_room_code.as_deref() == Some(room.room_code.as_str()))
            .collect();

        for day in &days {
            let mut occupied = false;
            for booking in room_bookings.iter().filter(|b| b.occupies(*day)) {
                occupied = true;
                entries.push(CalendarEntry::new(room, *day, (*booking).clone()));
            }
            if !occupied {
                entries.push(CalendarEntry::new(room, *day, CalendarBooking::default()));
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn room(id: i64, code: &str) -> CalendarRoom {
        CalendarRoom {
            room_id: id,
            room_code: code.to_string(),
            description: format!("Room {code}"),
            room_size: None,
            is_room: true,
            is_banquet: false,
        }
    }

    fn booking(no: &str, room_code: &str, checkin: u32, checkout: u32) -> CalendarBooking {
        CalendarBooking {
            reservation_no: Some(no.to_string()),
            reserved_room_code: Some(room_code.to_string()),
            checkin_date: Some(date(checkin).and_hms_opt(14, 0, 0).unwrap()),
            checkout_date: Some(date(checkout).and_hms_opt(11, 0, 0).unwrap()),
            status_name: Some("Booked".into()),
            ..CalendarBooking::default()
        }
    }

    #[test]
    fn expands_every_room_and_day() {
        let rooms = vec![room(1, "101"), room(2, "102")];
        let grid = build_calendar_grid(&rooms, &[], date(1), date(3));
        assert_eq!(grid.len(), 6);
        assert!(grid.iter().all(|e| e.booking.reservation_no.is_none()));
        assert_eq!(grid[0].room_code, "101");
        assert_eq!(grid[3].room_code, "102");
        assert_eq!(grid[0].display_date, "01-Aug");
        assert_eq!(grid[0].day_name, "Friday");
    }

    #[test]
    fn checkout_day_is_free() {
        let rooms = vec![room(1, "101")];
        let bookings = vec![booking("RES000001", "101", 1, 3)];
        let grid = build_calendar_grid(&rooms, &bookings, date(1), date(4));
        let booked: Vec<_> = grid
            .iter()
            .map(|e| e.booking.reservation_no.is_some())
            .collect();
        assert_eq!(booked, vec![true, true, false, false]);
    }

    #[test]
    fn same_day_stay_occupies_check_in_day() {
        let rooms = vec![room(1, "HALL")];
        let bookings = vec![booking("RES000002", "HALL", 2, 2)];
        let grid = build_calendar_grid(&rooms, &bookings, date(1), date(3));
        assert!(grid[1].booking.reservation_no.is_some());
        assert!(grid[0].booking.reservation_no.is_none());
        assert!(grid[2].booking.reservation_no.is_none());
    }

    #[test]
    fn overlapping_bookings_yield_one_entry_each() {
        let rooms = vec![room(1, "101")];
        let bookings = vec![
            booking("RES000001", "101", 1, 3),
            booking("RES000002", "101", 2, 4),
            booking("RES000003", "999", 1, 4),
        ];
        let grid = build_calendar_grid(&rooms, &bookings, date(2), date(2));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn line_without_dates_uses_header_stay() {
        let b = CalendarBooking {
            reserved_room_code: Some("101".into()),
            checkin_date_time: Some(date(5).and_hms_opt(12, 0, 0).unwrap()),
            checkout_date_time: Some(date(7).and_hms_opt(12, 0, 0).unwrap()),
            ..CalendarBooking::default()
        };
        assert!(b.occupies(date(6)));
        assert!(!b.occupies(date(7)));
        assert!(!CalendarBooking::default().occupies(date(6)));
    }

    #[test]
    fn calendar_type_from_wire_value() {
        assert_eq!(CalendarType::from(1), CalendarType::Rooms);
        assert_eq!(CalendarType::from(2), CalendarType::Banquets);
        assert_eq!(CalendarType::from(0), CalendarType::All);
    }
}
