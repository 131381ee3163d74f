use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::calendar_model::{build_calendar_grid, CalendarEntry, CalendarQuery, CalendarType};
use super::calendar_traits::{CalendarRepositoryTrait, CalendarServiceTrait};
use crate::errors::{Result, ValidationError};

pub struct CalendarService {
    repository: Arc<dyn CalendarRepositoryTrait>,
}

impl CalendarService {
    pub fn new(repository: Arc<dyn CalendarRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CalendarServiceTrait for CalendarService {
    async fn get_calendar(&self, query: CalendarQuery) -> Result<Vec<CalendarEntry>> {
        if query.start_date > query.end_date {
            return Err(ValidationError::InvalidInput(format!(
                "startDate {} is after endDate {}",
                query.start_date, query.end_date
            ))
            .into());
        }
        let calendar_type = CalendarType::from(query.calendar_type);
        let rooms = self.repository.load_rooms(calendar_type).await?;
        let bookings = self
            .repository
            .load_bookings(query.start_date, query.end_date, query.status_id)
            .await?;
        debug!(
            "Calendar {}..{}: {} rooms, {} bookings",
            query.start_date,
            query.end_date,
            rooms.len(),
            bookings.len()
        );
        Ok(build_calendar_grid(
            &rooms,
            &bookings,
            query.start_date,
            query.end_date,
        ))
    }
}
