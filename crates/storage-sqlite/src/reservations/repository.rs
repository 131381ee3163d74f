use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};
use diesel::sqlite::Sqlite;
use log::debug;
use std::sync::Arc;

use hotelbook_core::constants::{FINALIZED_STATUS_ID, SAVE_RESERVATION_PROCEDURE};
use hotelbook_core::reservations::{
    DateRange, FinalizedInvoiceRow, JoinedReservationRow, ReservationRepositoryTrait,
    SaveProcedureOutput, SaveReservationParams,
};
use hotelbook_core::Result;

use super::model::{FinalizedInvoiceRowDB, JoinedReservationRowDB, TextValueDB};
use super::procedure::sp_reservation_save;
use crate::db::{run_blocking, run_in_transaction, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::utils::date_to_db;

/// Header columns selected by both fan-out reads.
const HEADER_COLUMNS: &str = "\
    h.reservation_no, h.reservation_date, h.reservation_type, h.customer_code, h.status_id, \
    h.mobile, h.telephone, h.email, h.travel_agent_code, h.checkin_date_time, \
    h.checkout_date_time, h.no_of_vehicles, h.no_of_adults, h.no_of_kids, h.event_type, \
    h.setup_style, h.sub_total, h.discount_per, h.discount, h.gross_amount, h.paid_amount, \
    h.due_amount, h.remark, h.refund_amount, h.refund_note, h.reference_reservation_no, \
    h.booking_resource_id, h.booking_reference, h.reservation_status, h.invoice_no, \
    h.invoice_date, h.cr_user";

/// Service and payment line columns selected by both fan-out reads.
const SERVICE_PAYMENT_COLUMNS: &str = "\
    sd.service_code AS service_type_code, sd.service_date, \
    sd.service_qty AS service_quantity, sd.amount AS service_amount, \
    sd.total_amount AS service_total_amount, sd.service_remark, \
    pd.payment_id, pd.amount AS pay_amount, pd.ref_no, pd.ref_date, pd.receipt_no";

/// Active child lines only.
const CHILD_JOINS: &str = "\
    LEFT JOIN reservation_room_details_det rd \
        ON rd.reservation_no = h.reservation_no AND rd.is_delete = 0 \
    LEFT JOIN reservation_service_det sd \
        ON sd.reservation_no = h.reservation_no AND sd.is_delete = 0 \
    LEFT JOIN reservation_payment_det pd \
        ON pd.reservation_no = h.reservation_no AND pd.is_delete = 0";

fn all_records_sql() -> String {
    format!(
        "SELECT {header}, \
            NULL AS customer_type_code, NULL AS customer_title, NULL AS customer_name, \
            NULL AS nic_passport_no, NULL AS nationality_code, NULL AS country_code, \
            NULL AS address, NULL AS credit_limit, \
            rd.id AS room_details_id, rd.room_code, rd.package_code, rd.no_of_days, \
            rd.price AS room_price, rd.amount AS room_amount, \
            rd.modified_date AS room_modified_date, rd.checkin_date, rd.checkout_date, \
            {lines} \
         FROM ( \
            SELECT * FROM reservation_hed \
            ORDER BY reservation_date DESC, reservation_no ASC \
            LIMIT ? \
         ) h \
         {joins} \
         ORDER BY h.reservation_date DESC, h.reservation_no ASC, rd.id, sd.id, pd.id",
        header = HEADER_COLUMNS,
        lines = SERVICE_PAYMENT_COLUMNS,
        joins = CHILD_JOINS,
    )
}

fn by_status_sql() -> String {
    format!(
        "SELECT {header}, \
            c.customer_type_code, c.title AS customer_title, c.name AS customer_name, \
            c.nic_passport_no, c.nationality_code, c.country_code, c.address, c.credit_limit, \
            NULL AS room_details_id, rd.room_code, rd.package_code, rd.no_of_days, \
            rd.price AS room_price, rd.amount AS room_amount, \
            NULL AS room_modified_date, rd.checkin_date, rd.checkout_date, \
            {lines} \
         FROM reservation_hed h \
         LEFT JOIN reservation_customer c ON c.customer_code = h.customer_code \
         {joins} \
         WHERE h.status_id = ? \
           AND (? IS NULL OR date(h.reservation_date) >= date(?)) \
           AND (? IS NULL OR date(h.reservation_date) <= date(?)) \
         ORDER BY h.reservation_date DESC, h.reservation_no ASC, rd.id, sd.id, pd.id",
        header = HEADER_COLUMNS,
        lines = SERVICE_PAYMENT_COLUMNS,
        joins = CHILD_JOINS,
    )
}

const FINALIZED_INVOICES_SQL: &str = "\
    SELECT h.invoice_no, h.invoice_date, h.reservation_no, h.customer_code, \
        c.name AS customer_name, h.gross_amount AS total_amount, h.paid_amount, \
        h.due_amount, s.status_name AS status, h.cr_user AS created_by \
    FROM reservation_hed h \
    LEFT JOIN reservation_customer c ON c.customer_code = h.customer_code \
    LEFT JOIN reservation_status s ON s.status_id = h.status_id \
    WHERE h.status_id = ? \
      AND h.invoice_no IS NOT NULL AND TRIM(h.invoice_no) <> '' \
      AND (? IS NULL OR date(h.invoice_date) >= date(?)) \
      AND (? IS NULL OR date(h.invoice_date) <= date(?)) \
    ORDER BY h.invoice_date DESC, h.invoice_no ASC";

const INVOICE_NUMBER_SQL: &str = "\
    SELECT invoice_no AS value FROM reservation_hed WHERE reservation_no = ?";

const RECEIPT_NUMBERS_SQL: &str = "\
    SELECT DISTINCT receipt_no AS value FROM reservation_payment_hed \
    WHERE reservation_no = ? AND is_update = 1 \
    ORDER BY receipt_no";

pub struct ReservationRepository {
    pool: Arc<DbPool>,
}

impl ReservationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ReservationRepository { pool }
    }
}

#[async_trait]
impl ReservationRepositoryTrait for ReservationRepository {
    async fn execute_save(&self, params: SaveReservationParams) -> Result<SaveProcedureOutput> {
        debug!(
            "Executing {} for customer '{}'",
            SAVE_RESERVATION_PROCEDURE, params.header.customer_code
        );
        run_in_transaction(&self.pool, move |conn| {
            sp_reservation_save(conn, &params)
                .map_err(|e| StorageError::procedure(SAVE_RESERVATION_PROCEDURE, e))
        })
        .await
    }

    async fn load_all_rows(&self, top: Option<i64>) -> Result<Vec<JoinedReservationRow>> {
        // LIMIT -1 is unbounded in SQLite.
        let limit = top.filter(|n| *n >= 0).unwrap_or(-1);
        run_blocking(&self.pool, move |conn| {
            let rows = sql_query(all_records_sql())
                .bind::<BigInt, _>(limit)
                .load::<JoinedReservationRowDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(JoinedReservationRow::from).collect())
        })
        .await
    }

    async fn load_rows_by_status(
        &self,
        status_id: i32,
        range: DateRange,
    ) -> Result<Vec<JoinedReservationRow>> {
        let from = range.from.as_ref().map(date_to_db);
        let to = range.to.as_ref().map(date_to_db);
        run_blocking(&self.pool, move |conn| {
            let rows = sql_query(by_status_sql())
                .into_boxed::<Sqlite>()
                .bind::<Integer, _>(status_id)
                .bind::<Nullable<Text>, _>(from.clone())
                .bind::<Nullable<Text>, _>(from)
                .bind::<Nullable<Text>, _>(to.clone())
                .bind::<Nullable<Text>, _>(to)
                .load::<JoinedReservationRowDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(JoinedReservationRow::from).collect())
        })
        .await
    }

    async fn find_invoice_number(&self, reservation_no: &str) -> Result<Option<String>> {
        let reservation_no = reservation_no.to_string();
        run_blocking(&self.pool, move |conn| {
            let found = sql_query(INVOICE_NUMBER_SQL)
                .bind::<Text, _>(reservation_no)
                .get_result::<TextValueDB>(conn)
                .optional()
                .into_core()?;
            Ok(found.and_then(|row| row.value))
        })
        .await
    }

    async fn find_receipt_numbers(&self, reservation_no: &str) -> Result<Vec<String>> {
        let reservation_no = reservation_no.to_string();
        run_blocking(&self.pool, move |conn| {
            let rows = sql_query(RECEIPT_NUMBERS_SQL)
                .bind::<Text, _>(reservation_no)
                .load::<TextValueDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().filter_map(|row| row.value).collect())
        })
        .await
    }

    async fn load_finalized_invoices(&self, range: DateRange) -> Result<Vec<FinalizedInvoiceRow>> {
        let from = range.from.as_ref().map(date_to_db);
        let to = range.to.as_ref().map(date_to_db);
        run_blocking(&self.pool, move |conn| {
            let rows = sql_query(FINALIZED_INVOICES_SQL)
                .into_boxed::<Sqlite>()
                .bind::<Integer, _>(FINALIZED_STATUS_ID)
                .bind::<Nullable<Text>, _>(from.clone())
                .bind::<Nullable<Text>, _>(from)
                .bind::<Nullable<Text>, _>(to.clone())
                .bind::<Nullable<Text>, _>(to)
                .load::<FinalizedInvoiceRowDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(FinalizedInvoiceRow::from).collect())
        })
        .await
    }
}
