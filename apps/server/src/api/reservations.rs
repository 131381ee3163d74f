use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use hotelbook_core::reservations::ReservationAggregate;

use crate::{
    error::{ApiError, ApiResult},
    extract::{request_id, ApiJson},
    main_lib::AppState,
    models::{DateRangeQuery, SaveReservationResponse, TopQuery},
};

async fn save_reservation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ApiJson(reservation): ApiJson<ReservationAggregate>,
) -> ApiResult<Json<SaveReservationResponse>> {
    if reservation.customer.is_none() {
        tracing::warn!("Customer object is missing from reservation");
        return Err(ApiError::missing_field("Customer", request_id(&headers)));
    }

    let customer_code = reservation.customer_code.clone();
    tracing::info!("Saving reservation for customer: {}", customer_code);

    let reservation_no = state
        .reservation_service
        .save_or_update(reservation)
        .await
        .map_err(|e| {
            tracing::error!(
                "Error saving reservation for customer {}: {}",
                customer_code,
                e
            );
            ApiError::SaveFailed(e)
        })?;
    let invoice_no = state
        .reservation_service
        .get_invoice_number(&reservation_no)
        .await;

    tracing::info!(
        "Reservation saved: {}, invoice: {}",
        reservation_no,
        invoice_no.as_deref().unwrap_or("NOT GENERATED")
    );
    Ok(Json(SaveReservationResponse::new(reservation_no, invoice_no)))
}

async fn get_reservations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Json<Vec<ReservationAggregate>>> {
    let reservations = state.reservation_service.get_all(query.top).await?;
    Ok(Json(reservations))
}

async fn get_reservations_by_status(
    Path(status_id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<ReservationAggregate>>> {
    let reservations = state
        .reservation_service
        .get_by_status(
            status_id,
            range.from_date.as_deref(),
            range.to_date.as_deref(),
        )
        .await?;
    Ok(Json(reservations))
}

async fn get_invoice_number(
    Path(reservation_no): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<Option<String>> {
    Json(
        state
            .reservation_service
            .get_invoice_number(&reservation_no)
            .await,
    )
}

async fn get_receipt_numbers(
    Path(reservation_no): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<String>> {
    Json(
        state
            .reservation_service
            .get_receipt_numbers(&reservation_no)
            .await,
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", post(save_reservation).get(get_reservations))
        .route(
            "/reservations/byStatus/{status_id}",
            get(get_reservations_by_status),
        )
        .route(
            "/reservations/{reservation_no}/invoice-number",
            get(get_invoice_number),
        )
        .route(
            "/reservations/{reservation_no}/receipts",
            get(get_receipt_numbers),
        )
}
