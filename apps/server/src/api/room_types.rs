use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use hotelbook_core::room_types::{NewRoomType, RoomType, RoomTypeUpdate};

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    main_lib::AppState,
    models::{MessageResponse, NextCodeResponse, RoomTypeCreatedResponse},
};

async fn get_next_code(State(state): State<Arc<AppState>>) -> ApiResult<Json<NextCodeResponse>> {
    let next_code = state.room_type_service.get_next_code().await?;
    Ok(Json(NextCodeResponse { next_code }))
}

async fn get_room_types(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RoomType>>> {
    let room_types = state.room_type_service.get_room_types().await?;
    Ok(Json(room_types))
}

async fn create_room_type(
    State(state): State<Arc<AppState>>,
    ApiJson(room_type): ApiJson<NewRoomType>,
) -> ApiResult<Json<RoomTypeCreatedResponse>> {
    let created = state.room_type_service.create_room_type(room_type).await?;
    Ok(Json(RoomTypeCreatedResponse {
        message: "Room type created successfully.".to_string(),
        generated_code: created.room_type_code,
    }))
}

async fn update_room_type(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<RoomTypeUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    if state.room_type_service.update_room_type(id, update).await? {
        Ok(Json(MessageResponse::new("Room type updated successfully.")))
    } else {
        Err(ApiError::NotFound("Room type not found.".to_string()))
    }
}

async fn delete_room_type(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    if state.room_type_service.delete_room_type(&code).await? {
        Ok(Json(MessageResponse::new("RoomType deleted successfully.")))
    } else {
        Err(ApiError::NotFound("RoomType not found.".to_string()))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/room-types/next-code", get(get_next_code))
        .route("/room-types", get(get_room_types).post(create_room_type))
        .route(
            "/room-types/{key}",
            put(update_room_type).delete(delete_room_type),
        )
}
