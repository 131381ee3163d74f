use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use hotelbook_server::{
    api::app_router,
    build_state,
    config::{Config, LogFormat},
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        db_pool_size: 2,
        cors_allow: vec!["http://localhost:3000".to_string()],
        request_timeout: Duration::from_secs(30),
        log_format: LogFormat::Text,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config).unwrap(), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn room_type_lifecycle() {
    let (app, _tmp) = build_test_router().await;

    let (status, next) = send(&app, Method::GET, "/api/v1/room-types/next-code", None).await;
    assert_eq!(status, 200);
    assert_eq!(next["nextCode"], "RT001");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/room-types",
        Some(json!({ "description": "Deluxe" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(created["generatedCode"], "RT001");
    assert_eq!(created["message"], "Room type created successfully.");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/room-types",
        Some(json!({ "roomTypeCode": "RT001", "description": "Again" })),
    )
    .await;
    assert_eq!(status, 400);

    let (_, listed) = send(&app, Method::GET, "/api/v1/room-types", None).await;
    let id = listed[0]["roomTypeId"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/room-types/{id}"),
        Some(json!({ "description": "Deluxe Sea View", "isActive": true })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["message"], "Room type updated successfully.");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/room-types/999",
        Some(json!({ "description": "Ghost" })),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/room-types/RT001", None).await;
    assert_eq!(status, 200);
    let (status, missing) = send(&app, Method::DELETE, "/api/v1/room-types/RT001", None).await;
    assert_eq!(status, 404);
    assert_eq!(missing["message"], "RoomType not found.");
}

#[tokio::test]
async fn calendar_rejects_inverted_range() {
    let (app, _tmp) = build_test_router().await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/reservation-calendar?startDate=2025-08-05&endDate=2025-08-01",
        None,
    )
    .await;
    assert_eq!(status, 400);

    let (status, entries) = send(
        &app,
        Method::GET,
        "/api/v1/reservation-calendar?startDate=2025-08-01&endDate=2025-08-03&calendarType=1",
        None,
    )
    .await;
    assert_eq!(status, 200);
    // No rooms on file yet.
    assert_eq!(entries, json!([]));
}
