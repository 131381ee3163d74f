use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use hotelbook_core::reservations::InvoiceDto;

use crate::{error::ApiResult, main_lib::AppState, models::DateRangeQuery};

async fn get_finalized_invoices(
    State(state): State<Arc<AppState>>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<InvoiceDto>>> {
    let invoices = state
        .reservation_service
        .get_finalized_invoices(range.from_date.as_deref(), range.to_date.as_deref())
        .await?;
    Ok(Json(invoices))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/invoices/finalized", get(get_finalized_invoices))
}
