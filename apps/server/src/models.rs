//! Request and response shapes that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveReservationResponse {
    pub reservation_no: String,
    pub invoice_no: Option<String>,
    pub message: String,
}

impl SaveReservationResponse {
    pub fn new(reservation_no: String, invoice_no: Option<String>) -> Self {
        let message = match &invoice_no {
            Some(invoice) => format!("Reservation finalized with Invoice: {}", invoice),
            None => "Reservation saved successfully".to_string(),
        };
        Self {
            reservation_no,
            invoice_no,
            message,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct TopQuery {
    pub top: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CalendarParams {
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_calendar_type")]
    pub calendar_type: i32,
    pub status_id: Option<i32>,
}

fn default_calendar_type() -> i32 {
    1
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NextCodeResponse {
    pub next_code: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeCreatedResponse {
    pub message: String,
    pub generated_code: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
