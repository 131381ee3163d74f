use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotelbook_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";
const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";
const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving the reservation";
/// Key used for body-level failures that have no field path.
const BODY_ERROR_KEY: &str = "$";
const JSON_DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    /// Field-level validation failures, keyed by field name.
    #[error("One or more validation errors occurred")]
    Validation {
        errors: BTreeMap<String, Vec<String>>,
        trace_id: Option<String>,
    },
    /// A reservation save failed in the persistence layer.
    #[error("{0}")]
    SaveFailed(CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn missing_field(field: &str, trace_id: Option<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(
            field.to_string(),
            vec![format!("The {} field is required.", field)],
        );
        ApiError::Validation { errors, trace_id }
    }

    /// Maps a rejected JSON body to a validation problem keyed by the path of
    /// the failing field, or `$` when the body as a whole is unreadable.
    pub fn from_json_rejection(rejection: JsonRejection, trace_id: Option<String>) -> Self {
        let (field, message) = match &rejection {
            JsonRejection::JsonDataError(_) => split_field_path(&rejection.body_text()),
            _ => (BODY_ERROR_KEY.to_string(), rejection.body_text()),
        };
        tracing::warn!("Rejected request body at '{}': {}", field, message);
        let mut errors = BTreeMap::new();
        errors.insert(field, vec![message]);
        ApiError::Validation { errors, trace_id }
    }
}

/// Splits `"<prefix>roomDetails[0].price: invalid type ..."` into the field
/// path and the serde message.
fn split_field_path(text: &str) -> (String, String) {
    let detail = text.strip_prefix(JSON_DATA_ERROR_PREFIX).unwrap_or(text);
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            (path.to_string(), message.to_string())
        }
        _ => (BODY_ERROR_KEY.to_string(), detail.to_string()),
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationProblem<'a> {
    #[serde(rename = "type")]
    problem_type: &'static str,
    title: &'static str,
    status: u16,
    errors: &'a BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

#[derive(Serialize)]
struct SaveFailedBody {
    message: &'static str,
    error: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) | CoreError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Validation { errors, trace_id } => {
                let status = StatusCode::BAD_REQUEST;
                let body = Json(ValidationProblem {
                    problem_type: VALIDATION_PROBLEM_TYPE,
                    title: VALIDATION_PROBLEM_TITLE,
                    status: status.as_u16(),
                    errors,
                    trace_id: trace_id.as_deref(),
                });
                return (status, body).into_response();
            }
            ApiError::SaveFailed(e) => {
                tracing::error!("Reservation save failed: {}", e);
                let body = Json(SaveFailedBody {
                    message: SAVE_FAILED_MESSAGE,
                    error: e.to_string(),
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
