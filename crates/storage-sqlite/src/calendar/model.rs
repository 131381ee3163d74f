use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Text};

use hotelbook_core::calendar::{CalendarBooking, CalendarRoom};

use crate::utils::{opt_date_time_from_db, opt_money_from_db};

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::rooms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CalendarRoomDB {
    pub room_id: i64,
    pub room_code: String,
    pub description: String,
    pub room_size: Option<String>,
    pub is_room: bool,
    pub is_banquet: bool,
}

impl From<CalendarRoomDB> for CalendarRoom {
    fn from(db: CalendarRoomDB) -> Self {
        Self {
            room_id: db.room_id,
            room_code: db.room_code,
            description: db.description,
            room_size: db.room_size,
            is_room: db.is_room,
            is_banquet: db.is_banquet,
        }
    }
}

/// A room line joined with its header, customer and status.
#[derive(QueryableByName, Debug, Clone)]
pub struct CalendarBookingDB {
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_status: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub status_id: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub mobile: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub email: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkin_date_time: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkout_date_time: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub gross_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub paid_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub due_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub color_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub status_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reserved_room_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkin_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkout_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub room_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub price: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub no_of_days: Option<i32>,
}

impl From<CalendarBookingDB> for CalendarBooking {
    fn from(db: CalendarBookingDB) -> Self {
        Self {
            reservation_no: db.reservation_no,
            reservation_date: opt_date_time_from_db(db.reservation_date),
            reservation_status: db.reservation_status,
            status_id: db.status_id,
            customer_code: db.customer_code,
            mobile: db.mobile,
            email: db.email,
            checkin_date_time: opt_date_time_from_db(db.checkin_date_time),
            checkout_date_time: opt_date_time_from_db(db.checkout_date_time),
            gross_amount: opt_money_from_db(db.gross_amount),
            paid_amount: opt_money_from_db(db.paid_amount),
            due_amount: opt_money_from_db(db.due_amount),
            customer_name: db.customer_name,
            customer_title: db.customer_title,
            color_code: db.color_code,
            status_name: db.status_name,
            reserved_room_code: db.reserved_room_code,
            checkin_date: opt_date_time_from_db(db.checkin_date),
            checkout_date: opt_date_time_from_db(db.checkout_date),
            room_amount: opt_money_from_db(db.room_amount),
            price: opt_money_from_db(db.price),
            no_of_days: db.no_of_days,
        }
    }
}
