use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Nullable, Text};
use std::sync::Arc;

use hotelbook_core::calendar::{CalendarBooking, CalendarRepositoryTrait, CalendarRoom, CalendarType};
use hotelbook_core::Result;

use super::model::{CalendarBookingDB, CalendarRoomDB};
use crate::db::{run_blocking, DbPool};
use crate::errors::IntoCore;
use crate::schema::rooms::dsl::*;
use crate::utils::date_to_db;

/// Active room lines overlapping a date window. Line dates fall back to the
/// header stay.
const BOOKINGS_SQL: &str = "\
SELECT h.reservation_no, h.reservation_date, h.reservation_status, h.status_id,
       h.customer_code, h.mobile, h.email, h.checkin_date_time, h.checkout_date_time,
       h.gross_amount, h.paid_amount, h.due_amount,
       c.name AS customer_name, c.title AS customer_title,
       s.color_code, s.status_name,
       rd.room_code AS reserved_room_code, rd.checkin_date, rd.checkout_date,
       rd.amount AS room_amount, rd.price, rd.no_of_days
FROM reservation_room_details_det rd
JOIN reservation_hed h ON h.reservation_no = rd.reservation_no
LEFT JOIN reservation_customer c ON c.customer_code = h.customer_code
LEFT JOIN reservation_status s ON s.status_id = h.status_id
WHERE rd.is_delete = 0
  AND date(COALESCE(rd.checkin_date, h.checkin_date_time)) <= date(?)
  AND date(COALESCE(rd.checkout_date, h.checkout_date_time)) >= date(?)
  AND (? IS NULL OR h.status_id = ?)
ORDER BY rd.room_code, COALESCE(rd.checkin_date, h.checkin_date_time), h.reservation_no";

pub struct CalendarRepository {
    pool: Arc<DbPool>,
}

impl CalendarRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CalendarRepository { pool }
    }
}

#[async_trait]
impl CalendarRepositoryTrait for CalendarRepository {
    async fn load_rooms(&self, calendar_type: CalendarType) -> Result<Vec<CalendarRoom>> {
        run_blocking(&self.pool, move |conn| {
            let mut query = rooms.into_boxed();
            query = match calendar_type {
                CalendarType::Rooms => query.filter(is_room.eq(true)),
                CalendarType::Banquets => query.filter(is_banquet.eq(true)),
                CalendarType::All => query,
            };
            let rows = query
                .order(room_code.asc())
                .select(CalendarRoomDB::as_select())
                .load::<CalendarRoomDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(CalendarRoom::from).collect())
        })
        .await
    }

    async fn load_bookings(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status_id: Option<i32>,
    ) -> Result<Vec<CalendarBooking>> {
        run_blocking(&self.pool, move |conn| {
            let rows = sql_query(BOOKINGS_SQL)
                .bind::<Text, _>(date_to_db(&end))
                .bind::<Text, _>(date_to_db(&start))
                .bind::<Nullable<Integer>, _>(status_id)
                .bind::<Nullable<Integer>, _>(status_id)
                .load::<CalendarBookingDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(CalendarBooking::from).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, get_connection, run_migrations};
    use hotelbook_core::calendar::{CalendarQuery, CalendarService, CalendarServiceTrait};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    const SEED_SQL: &str = "
        INSERT INTO rooms (room_code, description, room_size, is_room, is_banquet) VALUES
            ('101', 'Room 101', 'Double', 1, 0),
            ('102', 'Room 102', NULL, 1, 0),
            ('H1', 'Grand Hall', '300', 0, 1);
        INSERT INTO reservation_customer (customer_code, title, name) VALUES ('C001', 'Mr', 'Perera');
        INSERT INTO reservation_hed (reservation_no, reservation_date, customer_code, status_id,
            checkin_date_time, checkout_date_time, gross_amount, paid_amount, due_amount,
            created_at, updated_at) VALUES
            ('RES000001', '2025-07-20 09:00:00', 'C001', 2, '2025-08-01 14:00:00',
             '2025-08-03 11:00:00', '200.00', '50.00', '150.00',
             '2025-07-20 09:00:00', '2025-07-20 09:00:00'),
            ('RES000002', '2025-07-21 09:00:00', 'C001', 1, '2025-08-02 14:00:00',
             '2025-08-02 18:00:00', '0.00', '0.00', '0.00',
             '2025-07-21 09:00:00', '2025-07-21 09:00:00');
        INSERT INTO reservation_room_details_det (reservation_no, room_code, no_of_days, price,
            amount, checkin_date, checkout_date, is_delete, modified_date) VALUES
            ('RES000001', '101', 2, '100.00', '200.00', NULL, NULL, 0, '2025-07-20 09:00:00'),
            ('RES000001', '102', 2, '100.00', '200.00', NULL, NULL, 1, '2025-07-20 09:00:00'),
            ('RES000002', 'H1', 1, '500.00', '500.00', '2025-08-02 08:00:00',
             '2025-08-02 18:00:00', 0, '2025-07-21 09:00:00');
    ";

    fn create_test_service() -> (CalendarService, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy(), 2).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        {
            use diesel::connection::SimpleConnection;
            let mut conn = get_connection(&pool).expect("Failed to get connection");
            conn.batch_execute(SEED_SQL).expect("Failed to seed calendar data");
        }
        let repo = CalendarRepository::new(pool);
        (CalendarService::new(Arc::new(repo)), temp_dir)
    }

    fn query(calendar_type: i32, status_id: Option<i32>) -> CalendarQuery {
        CalendarQuery {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            calendar_type,
            status_id,
        }
    }

    #[tokio::test]
    async fn test_room_calendar_uses_header_dates_and_skips_deleted_lines() {
        let (service, _temp_dir) = create_test_service();
        let entries = service.get_calendar(query(1, None)).await.unwrap();

        // Two rooms, three days each; no banquet halls.
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.is_room));

        let booked: Vec<_> = entries
            .iter()
            .filter(|e| e.booking.reservation_no.is_some())
            .map(|e| (e.room_code.as_str(), e.display_date.as_str()))
            .collect();
        assert_eq!(booked, vec![("101", "01-Aug"), ("101", "02-Aug")]);

        let first = &entries[0];
        assert_eq!(first.booking.customer_name.as_deref(), Some("Perera"));
        assert_eq!(first.booking.status_name.as_deref(), Some("Confirmed"));
        assert_eq!(first.booking.due_amount, Some(dec!(150.00)));
        assert_eq!(first.day_name, "Friday");
    }

    #[tokio::test]
    async fn test_banquet_calendar_and_status_filter() {
        let (service, _temp_dir) = create_test_service();
        let entries = service.get_calendar(query(2, None)).await.unwrap();
        assert_eq!(entries.len(), 3);
        let booked: Vec<_> = entries
            .iter()
            .filter(|e| e.booking.reservation_no.is_some())
            .map(|e| e.display_date.as_str())
            .collect();
        assert_eq!(booked, vec!["02-Aug"]);

        let confirmed_only = service.get_calendar(query(0, Some(2))).await.unwrap();
        assert_eq!(confirmed_only.len(), 9);
        assert!(confirmed_only
            .iter()
            .filter_map(|e| e.booking.status_id)
            .all(|status| status == 2));
    }
}
