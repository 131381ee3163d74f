mod calendar;
mod health;
mod invoices;
mod reservations;
mod room_types;

use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.cors_allow.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }
    let origins = config
        .cors_allow
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{}'", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let api = Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(invoices::router())
        .merge(room_types::router())
        .merge(calendar::router())
        .with_state(state);

    Ok(Router::new()
        .nest("/api/v1", api)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(config)?)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
