use async_trait::async_trait;
use chrono::NaiveDate;

use super::calendar_model::{CalendarBooking, CalendarEntry, CalendarQuery, CalendarRoom, CalendarType};
use crate::errors::Result;

#[async_trait]
pub trait CalendarRepositoryTrait: Send + Sync {
    /// Rooms shown on a calendar of the given type, ordered by room code.
    async fn load_rooms(&self, calendar_type: CalendarType) -> Result<Vec<CalendarRoom>>;

    /// Active room lines whose stay overlaps `[start, end]`.
    async fn load_bookings(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        status_id: Option<i32>,
    ) -> Result<Vec<CalendarBooking>>;
}

#[async_trait]
pub trait CalendarServiceTrait: Send + Sync {
    async fn get_calendar(&self, query: CalendarQuery) -> Result<Vec<CalendarEntry>>;
}
