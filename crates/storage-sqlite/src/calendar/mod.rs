//! SQLite storage for the reservation calendar.

mod model;
mod repository;

pub use model::{CalendarBookingDB, CalendarRoomDB};
pub use repository::CalendarRepository;
