//! Database models for reservations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use hotelbook_core::reservations::{
    Customer, FinalizedInvoiceRow, JoinedReservationRow, PaymentDetailsRow,
    ReservationHeaderParams, RoomDetailsRow, ServiceDetailsRow,
};

use crate::utils::{
    date_time_to_db, money_to_db, opt_date_time_from_db, opt_money_from_db,
};

/// Insert row for the reservation header.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_hed)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewReservationHedDB {
    pub reservation_no: String,
    pub reservation_date: String,
    pub reservation_type: i32,
    pub customer_code: String,
    pub status_id: i32,
    pub mobile: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub travel_agent_code: Option<String>,
    pub checkin_date_time: String,
    pub checkout_date_time: String,
    pub no_of_vehicles: i32,
    pub no_of_adults: i32,
    pub no_of_kids: i32,
    pub event_type: Option<String>,
    pub setup_style: Option<String>,
    pub sub_total: String,
    pub discount_per: String,
    pub discount: String,
    pub gross_amount: String,
    pub paid_amount: String,
    pub due_amount: String,
    pub remark: Option<String>,
    pub refund_amount: String,
    pub refund_note: String,
    pub reference_reservation_no: Option<String>,
    pub booking_resource_id: i32,
    pub booking_reference: Option<String>,
    pub reservation_status: String,
    pub cr_user: Option<String>,
    pub ed_user: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Header columns rewritten when an existing reservation is saved again.
/// Invoice columns, the creating user and the creation stamp are left alone.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_hed)]
#[diesel(treat_none_as_null = true)]
pub struct ReservationHedChangeset {
    pub reservation_date: String,
    pub reservation_type: i32,
    pub customer_code: String,
    pub status_id: i32,
    pub mobile: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub travel_agent_code: Option<String>,
    pub checkin_date_time: String,
    pub checkout_date_time: String,
    pub no_of_vehicles: i32,
    pub no_of_adults: i32,
    pub no_of_kids: i32,
    pub event_type: Option<String>,
    pub setup_style: Option<String>,
    pub sub_total: String,
    pub discount_per: String,
    pub discount: String,
    pub gross_amount: String,
    pub paid_amount: String,
    pub due_amount: String,
    pub remark: Option<String>,
    pub refund_amount: String,
    pub refund_note: String,
    pub reference_reservation_no: Option<String>,
    pub booking_resource_id: i32,
    pub booking_reference: Option<String>,
    pub reservation_status: String,
    pub ed_user: Option<String>,
    pub updated_at: String,
}

impl NewReservationHedDB {
    pub fn from_params(reservation_no: &str, header: &ReservationHeaderParams, now: &NaiveDateTime) -> Self {
        let stamp = date_time_to_db(now);
        Self {
            reservation_no: reservation_no.to_string(),
            reservation_date: date_time_to_db(&header.reservation_date),
            reservation_type: header.reservation_type,
            customer_code: header.customer_code.clone(),
            status_id: header.status_id,
            mobile: header.mobile.clone(),
            telephone: header.telephone.clone(),
            email: header.email.clone(),
            travel_agent_code: header.travel_agent_code.clone(),
            checkin_date_time: date_time_to_db(&header.checkin_date_time),
            checkout_date_time: date_time_to_db(&header.checkout_date_time),
            no_of_vehicles: header.no_of_vehicles,
            no_of_adults: header.no_of_adults,
            no_of_kids: header.no_of_kids,
            event_type: header.event_type.clone(),
            setup_style: header.setup_style.clone(),
            sub_total: money_to_db(header.sub_total),
            discount_per: money_to_db(header.discount_per),
            discount: money_to_db(header.discount),
            gross_amount: money_to_db(header.gross_amount),
            paid_amount: money_to_db(header.paid_amount),
            due_amount: money_to_db(header.due_amount),
            remark: header.reservation_note.clone(),
            refund_amount: money_to_db(header.refund_amount),
            refund_note: header.refund_note.clone(),
            reference_reservation_no: header.reference_no.clone(),
            booking_resource_id: header.booking_resource_id,
            booking_reference: header.booking_reference_no.clone(),
            reservation_status: header.reservation_status.clone(),
            cr_user: header.user.clone(),
            ed_user: header.user.clone(),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

impl From<&NewReservationHedDB> for ReservationHedChangeset {
    fn from(row: &NewReservationHedDB) -> Self {
        Self {
            reservation_date: row.reservation_date.clone(),
            reservation_type: row.reservation_type,
            customer_code: row.customer_code.clone(),
            status_id: row.status_id,
            mobile: row.mobile.clone(),
            telephone: row.telephone.clone(),
            email: row.email.clone(),
            travel_agent_code: row.travel_agent_code.clone(),
            checkin_date_time: row.checkin_date_time.clone(),
            checkout_date_time: row.checkout_date_time.clone(),
            no_of_vehicles: row.no_of_vehicles,
            no_of_adults: row.no_of_adults,
            no_of_kids: row.no_of_kids,
            event_type: row.event_type.clone(),
            setup_style: row.setup_style.clone(),
            sub_total: row.sub_total.clone(),
            discount_per: row.discount_per.clone(),
            discount: row.discount.clone(),
            gross_amount: row.gross_amount.clone(),
            paid_amount: row.paid_amount.clone(),
            due_amount: row.due_amount.clone(),
            remark: row.remark.clone(),
            refund_amount: row.refund_amount.clone(),
            refund_note: row.refund_note.clone(),
            reference_reservation_no: row.reference_reservation_no.clone(),
            booking_resource_id: row.booking_resource_id,
            booking_reference: row.booking_reference.clone(),
            reservation_status: row.reservation_status.clone(),
            ed_user: row.ed_user.clone(),
            updated_at: row.updated_at.clone(),
        }
    }
}

/// Customer master row, insert and update share the same shape.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_customer)]
pub struct ReservationCustomerDB {
    pub customer_code: String,
    pub customer_type_code: String,
    pub title: String,
    pub name: String,
    pub nic_passport_no: String,
    pub nationality_code: String,
    pub country_code: String,
    pub address: String,
    pub credit_limit: String,
    pub mobile: String,
    pub telephone: String,
    pub email: String,
    pub travel_agent_code: String,
    pub whatsapp: String,
    pub remark: String,
    pub is_active: bool,
}

impl ReservationCustomerDB {
    pub fn from_customer(customer_code: String, customer: &Customer) -> Self {
        Self {
            customer_code,
            customer_type_code: customer.customer_type_code.trim().to_string(),
            title: customer.title.trim().to_string(),
            name: customer.name.trim().to_string(),
            nic_passport_no: customer.nic_passport_no.trim().to_string(),
            nationality_code: customer.nationality_code.trim().to_string(),
            country_code: customer.country_code.trim().to_string(),
            address: customer.address.trim().to_string(),
            credit_limit: money_to_db(customer.credit_limit),
            mobile: customer.mobile.trim().to_string(),
            telephone: customer.telephone.trim().to_string(),
            email: customer.email.trim().to_string(),
            travel_agent_code: customer.travel_agent_code.trim().to_string(),
            whatsapp: customer.whatsapp.trim().to_string(),
            remark: customer.remark.trim().to_string(),
            is_active: customer.is_active,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_room_details_det)]
pub struct NewRoomDetailDB {
    pub reservation_no: String,
    pub room_code: String,
    pub package_code: Option<String>,
    pub no_of_days: i32,
    pub price: String,
    pub amount: String,
    pub checkin_date: Option<String>,
    pub checkout_date: Option<String>,
    pub is_delete: bool,
    pub modified_date: String,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_room_details_det)]
#[diesel(treat_none_as_null = true)]
pub struct RoomDetailChangeset {
    pub package_code: Option<String>,
    pub no_of_days: i32,
    pub price: String,
    pub amount: String,
    pub checkin_date: Option<String>,
    pub checkout_date: Option<String>,
    pub is_delete: bool,
    pub modified_date: String,
}

impl NewRoomDetailDB {
    /// `None` for a row without a room code.
    pub fn from_row(reservation_no: &str, row: &RoomDetailsRow, now: &NaiveDateTime) -> Option<Self> {
        Some(Self {
            reservation_no: reservation_no.to_string(),
            room_code: row.room_code.clone()?,
            package_code: row.package_code.clone(),
            no_of_days: row.no_of_days,
            price: money_to_db(row.price),
            amount: money_to_db(row.amount),
            checkin_date: row.checkin_date.as_ref().map(date_time_to_db),
            checkout_date: row.checkout_date.as_ref().map(date_time_to_db),
            is_delete: false,
            modified_date: date_time_to_db(now),
        })
    }

    pub fn changeset(&self) -> RoomDetailChangeset {
        RoomDetailChangeset {
            package_code: self.package_code.clone(),
            no_of_days: self.no_of_days,
            price: self.price.clone(),
            amount: self.amount.clone(),
            checkin_date: self.checkin_date.clone(),
            checkout_date: self.checkout_date.clone(),
            is_delete: false,
            modified_date: self.modified_date.clone(),
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_service_det)]
pub struct NewServiceDetailDB {
    pub reservation_no: String,
    pub service_code: String,
    pub service_date: Option<String>,
    pub service_qty: i32,
    pub amount: String,
    pub total_amount: String,
    pub service_remark: Option<String>,
    pub is_delete: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_service_det)]
#[diesel(treat_none_as_null = true)]
pub struct ServiceDetailChangeset {
    pub service_date: Option<String>,
    pub service_qty: i32,
    pub amount: String,
    pub total_amount: String,
    pub service_remark: Option<String>,
    pub is_delete: bool,
}

impl NewServiceDetailDB {
    /// `None` for a row without a service code.
    pub fn from_row(reservation_no: &str, row: &ServiceDetailsRow) -> Option<Self> {
        Some(Self {
            reservation_no: reservation_no.to_string(),
            service_code: row.service_type_code.clone()?,
            service_date: row.service_date.as_ref().map(date_time_to_db),
            service_qty: row.service_quantity,
            amount: money_to_db(row.service_amount),
            total_amount: money_to_db(row.service_total_amount),
            service_remark: row.service_remark.clone(),
            is_delete: false,
        })
    }

    pub fn changeset(&self) -> ServiceDetailChangeset {
        ServiceDetailChangeset {
            service_date: self.service_date.clone(),
            service_qty: self.service_qty,
            amount: self.amount.clone(),
            total_amount: self.total_amount.clone(),
            service_remark: self.service_remark.clone(),
            is_delete: false,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_payment_det)]
pub struct NewPaymentDetailDB {
    pub reservation_no: String,
    pub receipt_no: Option<String>,
    pub payment_id: i32,
    pub amount: String,
    pub ref_no: Option<String>,
    pub ref_date: Option<String>,
    pub is_delete: bool,
}

impl NewPaymentDetailDB {
    pub fn from_row(reservation_no: &str, row: &PaymentDetailsRow) -> Self {
        Self {
            reservation_no: reservation_no.to_string(),
            receipt_no: row.receipt_no.clone(),
            payment_id: row.payment_id,
            amount: money_to_db(row.amount),
            ref_no: row.ref_no.clone(),
            ref_date: row.ref_date.as_ref().map(date_time_to_db),
            is_delete: false,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::reservation_payment_hed)]
pub struct NewPaymentHedDB {
    pub receipt_no: String,
    pub reservation_no: String,
    pub receipt_date: String,
    pub amount: String,
    pub is_update: bool,
}

/// Shape shared by both fan-out reads. The all-records read selects NULL
/// for the customer columns.
#[derive(QueryableByName, Debug, Clone)]
pub struct JoinedReservationRowDB {
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_date: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub reservation_type: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_code: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub status_id: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub mobile: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub telephone: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub email: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub travel_agent_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkin_date_time: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkout_date_time: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub no_of_vehicles: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub no_of_adults: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub no_of_kids: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub event_type: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub setup_style: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub sub_total: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub discount_per: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub discount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub gross_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub paid_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub due_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub remark: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub refund_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub refund_note: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reference_reservation_no: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub booking_resource_id: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub booking_reference: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_status: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub invoice_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub invoice_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub cr_user: Option<String>,

    #[diesel(sql_type = Nullable<Text>)]
    pub customer_type_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub nic_passport_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub nationality_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub country_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub address: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub credit_limit: Option<String>,

    #[diesel(sql_type = Nullable<BigInt>)]
    pub room_details_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub room_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub package_code: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub no_of_days: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub room_price: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub room_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub room_modified_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkin_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub checkout_date: Option<String>,

    #[diesel(sql_type = Nullable<Text>)]
    pub service_type_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub service_date: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub service_quantity: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub service_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub service_total_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub service_remark: Option<String>,

    #[diesel(sql_type = Nullable<Integer>)]
    pub payment_id: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub pay_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub ref_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub ref_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub receipt_no: Option<String>,
}

impl From<JoinedReservationRowDB> for JoinedReservationRow {
    fn from(db: JoinedReservationRowDB) -> Self {
        Self {
            reservation_no: db.reservation_no,
            reservation_date: opt_date_time_from_db(db.reservation_date),
            reservation_type: db.reservation_type,
            customer_code: db.customer_code,
            status_id: db.status_id,
            mobile: db.mobile,
            telephone: db.telephone,
            email: db.email,
            travel_agent_code: db.travel_agent_code,
            checkin_date_time: opt_date_time_from_db(db.checkin_date_time),
            checkout_date_time: opt_date_time_from_db(db.checkout_date_time),
            no_of_vehicles: db.no_of_vehicles,
            no_of_adults: db.no_of_adults,
            no_of_kids: db.no_of_kids,
            event_type: db.event_type,
            setup_style: db.setup_style,
            sub_total: opt_money_from_db(db.sub_total),
            discount_per: opt_money_from_db(db.discount_per),
            discount: opt_money_from_db(db.discount),
            gross_amount: opt_money_from_db(db.gross_amount),
            paid_amount: opt_money_from_db(db.paid_amount),
            due_amount: opt_money_from_db(db.due_amount),
            remark: db.remark,
            refund_amount: opt_money_from_db(db.refund_amount),
            refund_note: db.refund_note,
            reference_reservation_no: db.reference_reservation_no,
            booking_resource_id: db.booking_resource_id,
            booking_reference: db.booking_reference,
            reservation_status: db.reservation_status,
            invoice_no: db.invoice_no,
            invoice_date: opt_date_time_from_db(db.invoice_date),
            cr_user: db.cr_user,
            customer_type_code: db.customer_type_code,
            customer_title: db.customer_title,
            customer_name: db.customer_name,
            nic_passport_no: db.nic_passport_no,
            nationality_code: db.nationality_code,
            country_code: db.country_code,
            address: db.address,
            credit_limit: opt_money_from_db(db.credit_limit),
            room_details_id: db.room_details_id,
            room_code: db.room_code,
            package_code: db.package_code,
            no_of_days: db.no_of_days,
            room_price: opt_money_from_db(db.room_price),
            room_amount: opt_money_from_db(db.room_amount),
            room_modified_date: opt_date_time_from_db(db.room_modified_date),
            checkin_date: opt_date_time_from_db(db.checkin_date),
            checkout_date: opt_date_time_from_db(db.checkout_date),
            service_type_code: db.service_type_code,
            service_date: opt_date_time_from_db(db.service_date),
            service_quantity: db.service_quantity,
            service_amount: opt_money_from_db(db.service_amount),
            service_total_amount: opt_money_from_db(db.service_total_amount),
            service_remark: db.service_remark,
            payment_id: db.payment_id,
            pay_amount: opt_money_from_db(db.pay_amount),
            ref_no: db.ref_no,
            ref_date: opt_date_time_from_db(db.ref_date),
            receipt_no: db.receipt_no,
        }
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct FinalizedInvoiceRowDB {
    #[diesel(sql_type = Nullable<Text>)]
    pub invoice_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub invoice_date: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub reservation_no: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_code: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub customer_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub total_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub paid_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub due_amount: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub status: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub created_by: Option<String>,
}

impl From<FinalizedInvoiceRowDB> for FinalizedInvoiceRow {
    fn from(db: FinalizedInvoiceRowDB) -> Self {
        Self {
            invoice_no: db.invoice_no,
            invoice_date: opt_date_time_from_db(db.invoice_date),
            reservation_no: db.reservation_no,
            customer_code: db.customer_code,
            customer_name: db.customer_name,
            total_amount: opt_money_from_db(db.total_amount),
            paid_amount: opt_money_from_db(db.paid_amount),
            due_amount: opt_money_from_db(db.due_amount),
            status: db.status,
            created_by: db.created_by,
        }
    }
}

/// Single nullable text column, used for scalar lookups.
#[derive(QueryableByName, Debug)]
pub struct TextValueDB {
    #[diesel(sql_type = Nullable<Text>)]
    pub value: Option<String>,
}

/// Highest numeric suffix of a generated document number.
#[derive(QueryableByName, Debug)]
pub struct LastSequenceDB {
    #[diesel(sql_type = Nullable<BigInt>)]
    pub last_seq: Option<i64>,
}
