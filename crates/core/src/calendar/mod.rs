//! Reservation calendar - one cell per room and day, filled from bookings.

mod calendar_model;
mod calendar_service;
mod calendar_traits;

pub use calendar_model::{
    build_calendar_grid, CalendarBooking, CalendarEntry, CalendarQuery, CalendarRoom, CalendarType,
};
pub use calendar_service::CalendarService;
pub use calendar_traits::{CalendarRepositoryTrait, CalendarServiceTrait};
