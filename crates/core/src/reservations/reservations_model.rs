//! Reservation domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::{flexible_date_time, flexible_date_time_opt, min_date_time};

/// A reservation header with its owned room, service and payment lines.
///
/// `reservation_no` is empty for a reservation that has never been saved;
/// the backing store assigns the number on first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationAggregate {
    pub reservation_no: String,
    #[serde(with = "flexible_date_time")]
    pub reservation_date: NaiveDateTime,
    pub reservation_type: i32,
    pub customer_code: String,
    pub status_id: i32,
    pub mobile: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub travel_agent_code: Option<String>,
    #[serde(with = "flexible_date_time")]
    pub checkin_date_time: NaiveDateTime,
    #[serde(with = "flexible_date_time")]
    pub checkout_date_time: NaiveDateTime,
    pub no_of_vehicles: i32,
    pub no_of_adults: i32,
    pub no_of_kids: i32,
    pub event_type: Option<String>,
    pub setup_style: Option<String>,
    pub sub_total: Decimal,
    pub discount_per: Decimal,
    pub discount: Decimal,
    pub gross_amount: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub reservation_note: Option<String>,
    pub refund_amount: Decimal,
    pub refund_note: Option<String>,
    pub reference_no: Option<String>,
    pub booking_resource_id: i32,
    pub booking_reference_no: Option<String>,
    pub reservation_status: Option<String>,
    pub user: Option<String>,
    pub invoice_no: Option<String>,
    #[serde(with = "flexible_date_time_opt")]
    pub invoice_date: Option<NaiveDateTime>,
    pub customer: Option<Customer>,
    pub room_details: Vec<RoomLine>,
    pub service_details: Vec<ServiceLine>,
    pub room_pay_details: Vec<PaymentLine>,
}

impl Default for ReservationAggregate {
    fn default() -> Self {
        Self {
            reservation_no: String::new(),
            reservation_date: min_date_time(),
            reservation_type: 0,
            customer_code: String::new(),
            status_id: 0,
            mobile: None,
            telephone: None,
            email: None,
            travel_agent_code: None,
            checkin_date_time: min_date_time(),
            checkout_date_time: min_date_time(),
            no_of_vehicles: 0,
            no_of_adults: 0,
            no_of_kids: 0,
            event_type: None,
            setup_style: None,
            sub_total: Decimal::ZERO,
            discount_per: Decimal::ZERO,
            discount: Decimal::ZERO,
            gross_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            due_amount: Decimal::ZERO,
            reservation_note: None,
            refund_amount: Decimal::ZERO,
            refund_note: None,
            reference_no: None,
            booking_resource_id: 0,
            booking_reference_no: None,
            reservation_status: None,
            user: None,
            invoice_no: None,
            invoice_date: None,
            customer: None,
            room_details: Vec::new(),
            service_details: Vec::new(),
            room_pay_details: Vec::new(),
        }
    }
}

/// A room booked under a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomLine {
    pub reservation_room_details_id: i64,
    pub reservation_no: String,
    pub room_code: Option<String>,
    pub package_code: Option<String>,
    pub no_of_days: i32,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(with = "flexible_date_time")]
    pub modified_date: NaiveDateTime,
    #[serde(with = "flexible_date_time")]
    pub checkin_date: NaiveDateTime,
    #[serde(with = "flexible_date_time")]
    pub checkout_date: NaiveDateTime,
}

impl Default for RoomLine {
    fn default() -> Self {
        Self {
            reservation_room_details_id: 0,
            reservation_no: String::new(),
            room_code: None,
            package_code: None,
            no_of_days: 0,
            price: Decimal::ZERO,
            amount: Decimal::ZERO,
            modified_date: min_date_time(),
            checkin_date: min_date_time(),
            checkout_date: min_date_time(),
        }
    }
}

/// An extra service (meal, hall setup, transport...) charged to a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceLine {
    pub service_type_code: Option<String>,
    #[serde(with = "flexible_date_time")]
    pub service_date: NaiveDateTime,
    pub service_quantity: i32,
    pub service_amount: Decimal,
    pub service_total_amount: Decimal,
    pub service_remark: Option<String>,
}

impl Default for ServiceLine {
    fn default() -> Self {
        Self {
            service_type_code: None,
            service_date: min_date_time(),
            service_quantity: 0,
            service_amount: Decimal::ZERO,
            service_total_amount: Decimal::ZERO,
            service_remark: None,
        }
    }
}

/// A payment recorded against a reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentLine {
    pub payment_id: i32,
    pub amount: Decimal,
    pub ref_no: Option<String>,
    #[serde(with = "flexible_date_time_opt")]
    pub ref_date: Option<NaiveDateTime>,
    pub receipt_no: Option<String>,
}

/// Customer snapshot carried with a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub customer_type_code: String,
    pub customer_code: String,
    pub title: String,
    pub name: String,
    #[serde(alias = "nIC_PassportNo", alias = "nic_PassportNo")]
    pub nic_passport_no: String,
    pub nationality_code: String,
    pub country_code: String,
    pub address: String,
    pub credit_limit: Decimal,
    pub mobile: String,
    pub telephone: String,
    pub email: String,
    pub travel_agent_code: String,
    pub whatsapp: String,
    pub remark: String,
    pub is_active: bool,
    pub is_new: bool,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            customer_type_code: String::new(),
            customer_code: String::new(),
            title: String::new(),
            name: String::new(),
            nic_passport_no: String::new(),
            nationality_code: String::new(),
            country_code: String::new(),
            address: String::new(),
            credit_limit: Decimal::ZERO,
            mobile: String::new(),
            telephone: String::new(),
            email: String::new(),
            travel_agent_code: String::new(),
            whatsapp: String::new(),
            remark: String::new(),
            is_active: true,
            is_new: false,
        }
    }
}

/// Identifiers handed back by the save procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveProcedureOutput {
    pub reservation_no: String,
    pub invoice_no: Option<String>,
    /// True when this save assigned `invoice_no`.
    pub invoice_generated: bool,
}

/// Inclusive calendar-date range used by the filtered reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Read-only projection of a finalized reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub invoice_no: String,
    #[serde(with = "flexible_date_time")]
    pub invoice_date: NaiveDateTime,
    pub reservation_no: String,
    pub customer_code: String,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub status: String,
    pub created_by: String,
}

/// Raw finalized-invoice row as returned by storage, before defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizedInvoiceRow {
    pub invoice_no: Option<String>,
    pub invoice_date: Option<NaiveDateTime>,
    pub reservation_no: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub total_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub due_amount: Option<Decimal>,
    pub status: Option<String>,
    pub created_by: Option<String>,
}

impl From<FinalizedInvoiceRow> for InvoiceDto {
    fn from(row: FinalizedInvoiceRow) -> Self {
        Self {
            invoice_no: row.invoice_no.unwrap_or_default(),
            invoice_date: row.invoice_date.unwrap_or_else(min_date_time),
            reservation_no: row.reservation_no.unwrap_or_default(),
            customer_code: row.customer_code.unwrap_or_default(),
            customer_name: row.customer_name.unwrap_or_else(|| "N/A".to_string()),
            total_amount: row.total_amount.unwrap_or_default(),
            paid_amount: row.paid_amount.unwrap_or_default(),
            due_amount: row.due_amount.unwrap_or_default(),
            status: row.status.unwrap_or_else(|| "Finalized".to_string()),
            created_by: row.created_by.unwrap_or_else(|| "System".to_string()),
        }
    }
}
