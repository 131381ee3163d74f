//! Converts a reservation aggregate into the parameter set of the save
//! procedure: header scalars plus three tabular detail sets.
//!
//! Absent values are `None`. The save procedure branches on present versus
//! absent to decide insert, update or no-op per detail row, so:
//! - optional text is trimmed and blank text becomes absent;
//! - the minimum sentinel date becomes absent;
//! - money is rounded to two decimal places.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use super::reservations_model::{
    Customer, PaymentLine, ReservationAggregate, RoomLine, ServiceLine,
};
use crate::constants::{DEFAULT_RESERVATION_STATUS, DEFAULT_STATUS_ID, MONEY_SCALE};
use crate::utils::time_utils::is_min_date_time;

/// Room details set row: `RoomCode, PackageCode, NoOfDays, Price, Amount,
/// CheckinDate, CheckoutDate`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetailsRow {
    pub room_code: Option<String>,
    pub package_code: Option<String>,
    pub no_of_days: i32,
    pub price: Decimal,
    pub amount: Decimal,
    pub checkin_date: Option<NaiveDateTime>,
    pub checkout_date: Option<NaiveDateTime>,
}

/// Service details set row: `ServiceTypeCode, ServiceQuantity, ServiceAmount,
/// ServiceTotalAmount, ServiceDate, ServiceRemark`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetailsRow {
    pub service_type_code: Option<String>,
    pub service_quantity: i32,
    pub service_amount: Decimal,
    pub service_total_amount: Decimal,
    pub service_date: Option<NaiveDateTime>,
    pub service_remark: Option<String>,
}

/// Payment details set row: `ReceiptNo, PaymentId, Amount, RefNo, RefDate`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDetailsRow {
    pub receipt_no: Option<String>,
    pub payment_id: i32,
    pub amount: Decimal,
    pub ref_no: Option<String>,
    pub ref_date: Option<NaiveDateTime>,
}

/// The three detail sets, each in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedDetails {
    pub room_details: Vec<RoomDetailsRow>,
    pub service_details: Vec<ServiceDetailsRow>,
    pub payment_details: Vec<PaymentDetailsRow>,
}

/// Scalar parameters of the save procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationHeaderParams {
    pub reservation_no: String,
    pub reservation_date: NaiveDateTime,
    pub reservation_type: i32,
    pub customer_code: String,
    pub status_id: i32,
    pub mobile: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub travel_agent_code: Option<String>,
    pub checkin_date_time: NaiveDateTime,
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
    pub refund_note: String,
    pub reference_no: Option<String>,
    pub booking_resource_id: i32,
    pub booking_reference_no: Option<String>,
    pub reservation_status: String,
    pub user: Option<String>,
}

/// Everything the save procedure receives for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReservationParams {
    pub header: ReservationHeaderParams,
    pub details: FlattenedDetails,
    pub customer: Option<Customer>,
}

/// Trims text; blank text is absent.
pub fn encode_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The minimum sentinel date is absent.
pub fn encode_date(value: NaiveDateTime) -> Option<NaiveDateTime> {
    if is_min_date_time(&value) {
        None
    } else {
        Some(value)
    }
}

pub fn encode_optional_date(value: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    value.and_then(encode_date)
}

/// Rounds to the scale of a `decimal(18,2)` parameter.
pub fn encode_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

impl From<&RoomLine> for RoomDetailsRow {
    fn from(line: &RoomLine) -> Self {
        Self {
            room_code: encode_text(line.room_code.as_deref()),
            package_code: encode_text(line.package_code.as_deref()),
            no_of_days: line.no_of_days,
            price: encode_money(line.price),
            amount: encode_money(line.amount),
            checkin_date: encode_date(line.checkin_date),
            checkout_date: encode_date(line.checkout_date),
        }
    }
}

impl From<&ServiceLine> for ServiceDetailsRow {
    fn from(line: &ServiceLine) -> Self {
        Self {
            service_type_code: encode_text(line.service_type_code.as_deref()),
            service_quantity: line.service_quantity,
            service_amount: encode_money(line.service_amount),
            service_total_amount: encode_money(line.service_total_amount),
            service_date: encode_date(line.service_date),
            service_remark: encode_text(line.service_remark.as_deref()),
        }
    }
}

impl From<&PaymentLine> for PaymentDetailsRow {
    fn from(line: &PaymentLine) -> Self {
        Self {
            receipt_no: encode_text(line.receipt_no.as_deref()),
            payment_id: line.payment_id,
            amount: encode_money(line.amount),
            ref_no: encode_text(line.ref_no.as_deref()),
            ref_date: encode_optional_date(line.ref_date),
        }
    }
}

impl From<&ReservationAggregate> for ReservationHeaderParams {
    fn from(r: &ReservationAggregate) -> Self {
        Self {
            reservation_no: r.reservation_no.trim().to_string(),
            reservation_date: r.reservation_date,
            reservation_type: r.reservation_type,
            customer_code: r.customer_code.clone(),
            status_id: if r.status_id > 0 {
                r.status_id
            } else {
                DEFAULT_STATUS_ID
            },
            mobile: encode_text(r.mobile.as_deref()),
            telephone: encode_text(r.telephone.as_deref()),
            email: encode_text(r.email.as_deref()),
            travel_agent_code: encode_text(r.travel_agent_code.as_deref()),
            checkin_date_time: r.checkin_date_time,
            checkout_date_time: r.checkout_date_time,
            no_of_vehicles: r.no_of_vehicles,
            no_of_adults: r.no_of_adults,
            no_of_kids: r.no_of_kids,
            event_type: encode_text(r.event_type.as_deref()),
            setup_style: encode_text(r.setup_style.as_deref()),
            sub_total: encode_money(r.sub_total),
            discount_per: encode_money(r.discount_per),
            discount: encode_money(r.discount),
            gross_amount: encode_money(r.gross_amount),
            paid_amount: encode_money(r.paid_amount),
            due_amount: encode_money(r.due_amount),
            reservation_note: encode_text(r.reservation_note.as_deref()),
            refund_amount: encode_money(r.refund_amount),
            // Mandatory parameter: blank is sent as an empty string.
            refund_note: r
                .refund_note
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_default(),
            reference_no: encode_text(r.reference_no.as_deref()),
            booking_resource_id: r.booking_resource_id,
            booking_reference_no: encode_text(r.booking_reference_no.as_deref()),
            reservation_status: r
                .reservation_status
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(DEFAULT_RESERVATION_STATUS)
                .to_string(),
            user: encode_text(r.user.as_deref()),
        }
    }
}

pub fn flatten_details(reservation: &ReservationAggregate) -> FlattenedDetails {
    FlattenedDetails {
        room_details: reservation.room_details.iter().map(RoomDetailsRow::from).collect(),
        service_details: reservation
            .service_details
            .iter()
            .map(ServiceDetailsRow::from)
            .collect(),
        payment_details: reservation
            .room_pay_details
            .iter()
            .map(PaymentDetailsRow::from)
            .collect(),
    }
}

/// Builds the full save parameter set for `reservation`.
pub fn flatten_reservation(reservation: &ReservationAggregate) -> SaveReservationParams {
    SaveReservationParams {
        header: ReservationHeaderParams::from(reservation),
        details: flatten_details(reservation),
        customer: reservation.customer.clone(),
    }
}
