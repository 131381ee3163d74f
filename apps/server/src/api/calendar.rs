use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use hotelbook_core::calendar::{CalendarEntry, CalendarQuery};
use hotelbook_core::utils::time_utils::parse_filter_date;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::CalendarParams,
};

async fn get_reservation_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarParams>,
) -> ApiResult<Json<Vec<CalendarEntry>>> {
    let start_date = parse_filter_date(Some(&params.start_date))?
        .ok_or_else(|| ApiError::BadRequest("startDate is required".to_string()))?;
    let end_date = parse_filter_date(Some(&params.end_date))?
        .ok_or_else(|| ApiError::BadRequest("endDate is required".to_string()))?;

    let entries = state
        .calendar_service
        .get_calendar(CalendarQuery {
            start_date,
            end_date,
            calendar_type: params.calendar_type,
            status_id: params.status_id,
        })
        .await?;
    Ok(Json(entries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reservation-calendar", get(get_reservation_calendar))
}
