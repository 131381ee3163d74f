//! Request extractors that report failures through `ApiError`.

use axum::{
    extract::{FromRequest, Request},
    http::HeaderMap,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id set by the request-id layer, echoed back as `traceId`.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// JSON body whose rejections become a 400 validation problem instead of
/// axum's plain-text response.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let trace_id = request_id(req.headers());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::from_json_rejection(rejection, trace_id)),
        }
    }
}
