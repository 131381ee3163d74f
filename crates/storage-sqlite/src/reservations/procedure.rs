//! The reservation save procedure.
//!
//! SQLite has no stored procedures, so `sp_reservation_save` lives here: it
//! takes the scalar header parameters plus the three detail sets and merges
//! them into the reservation tables. Callers run it inside one immediate
//! transaction; any error aborts the whole save.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Integer, Text};
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;

use hotelbook_core::constants::{
    DOCUMENT_NO_MAX_DIGITS, DOCUMENT_NO_WIDTH, FINALIZED_STATUS_ID, INVOICE_NO_PREFIX,
    RESERVATION_NO_PREFIX,
};
use hotelbook_core::reservations::flattening::encode_text;
use hotelbook_core::reservations::{
    format_document_number, PaymentDetailsRow, RoomDetailsRow, SaveProcedureOutput,
    SaveReservationParams, ServiceDetailsRow,
};

use super::model::{
    LastSequenceDB, NewPaymentDetailDB, NewPaymentHedDB, NewReservationHedDB, NewRoomDetailDB,
    NewServiceDetailDB, ReservationCustomerDB, ReservationHedChangeset,
};
use crate::schema::{
    reservation_customer, reservation_hed, reservation_payment_det, reservation_payment_hed,
    reservation_room_details_det, reservation_service_det,
};
use crate::utils::{date_time_to_db, money_to_db};

/// Runs the save procedure on `conn` and returns its two output parameters.
pub fn sp_reservation_save(
    conn: &mut SqliteConnection,
    params: &SaveReservationParams,
) -> QueryResult<SaveProcedureOutput> {
    let now = Local::now().naive_local();
    let header = &params.header;

    let reservation_no = match header.reservation_no.trim() {
        "" => next_document_number(conn, "reservation_no", RESERVATION_NO_PREFIX)?,
        existing => existing.to_string(),
    };
    debug!("sp_reservation_save: reservation {}", reservation_no);

    let header_row = NewReservationHedDB::from_params(&reservation_no, header, &now);
    diesel::insert_into(reservation_hed::table)
        .values(&header_row)
        .on_conflict(reservation_hed::reservation_no)
        .do_update()
        .set(&ReservationHedChangeset::from(&header_row))
        .execute(conn)?;

    if let Some(customer) = &params.customer {
        let code = encode_text(Some(&customer.customer_code))
            .or_else(|| encode_text(Some(&header.customer_code)));
        match code {
            Some(code) => {
                let row = ReservationCustomerDB::from_customer(code, customer);
                diesel::insert_into(reservation_customer::table)
                    .values(&row)
                    .on_conflict(reservation_customer::customer_code)
                    .do_update()
                    .set(&row)
                    .execute(conn)?;
            }
            None => debug!("sp_reservation_save: customer snapshot without a code skipped"),
        }
    }

    merge_room_lines(conn, &reservation_no, &params.details.room_details, &now)?;
    merge_service_lines(conn, &reservation_no, &params.details.service_details)?;
    replace_payment_lines(conn, &reservation_no, &params.details.payment_details, &now)?;

    let (invoice_no, invoice_generated) =
        finalize_invoice(conn, &reservation_no, header.status_id, &now)?;

    Ok(SaveProcedureOutput {
        reservation_no,
        invoice_no,
        invoice_generated,
    })
}

/// Next `<prefix>NNNNNN` number after the highest generated one stored in
/// `column`. Numbers whose suffix is not all digits, or is longer than
/// `DOCUMENT_NO_MAX_DIGITS`, are ignored.
fn next_document_number(
    conn: &mut SqliteConnection,
    column: &str,
    prefix: &str,
) -> QueryResult<String> {
    let sql = format!(
        "SELECT MAX(CAST(SUBSTR({column}, {start}) AS INTEGER)) AS last_seq \
         FROM reservation_hed \
         WHERE {column} GLOB ? AND LENGTH({column}) <= ? \
         AND SUBSTR({column}, {start}) NOT GLOB '*[^0-9]*'",
        column = column,
        start = prefix.len() + 1
    );
    let last = sql_query(sql)
        .bind::<Text, _>(format!("{}{}*", prefix, "[0-9]".repeat(DOCUMENT_NO_WIDTH)))
        .bind::<Integer, _>((prefix.len() + DOCUMENT_NO_MAX_DIGITS) as i32)
        .get_result::<LastSequenceDB>(conn)?
        .last_seq
        .unwrap_or(0);
    let max_sequence = 10i64.pow(DOCUMENT_NO_MAX_DIGITS as u32) - 1;
    match last.checked_add(1).filter(|n| *n <= max_sequence) {
        Some(next) => Ok(format_document_number(prefix, next)),
        None => Err(DieselError::DatabaseError(
            DatabaseErrorKind::Unknown,
            Box::new(format!("{} number sequence exhausted at {}", prefix, last)),
        )),
    }
}

/// Upserts by room code and soft-deletes lines missing from `rows`. Rows
/// without a room code are ignored.
fn merge_room_lines(
    conn: &mut SqliteConnection,
    reservation_no: &str,
    rows: &[RoomDetailsRow],
    now: &NaiveDateTime,
) -> QueryResult<()> {
    use reservation_room_details_det::dsl;

    let mut kept = Vec::with_capacity(rows.len());
    for line in rows
        .iter()
        .filter_map(|row| NewRoomDetailDB::from_row(reservation_no, row, now))
    {
        diesel::insert_into(dsl::reservation_room_details_det)
            .values(&line)
            .on_conflict((dsl::reservation_no, dsl::room_code))
            .do_update()
            .set(&line.changeset())
            .execute(conn)?;
        kept.push(line.room_code);
    }

    let removed = diesel::update(
        dsl::reservation_room_details_det
            .filter(dsl::reservation_no.eq(reservation_no))
            .filter(dsl::is_delete.eq(false))
            .filter(dsl::room_code.ne_all(&kept)),
    )
    .set(dsl::is_delete.eq(true))
    .execute(conn)?;
    debug!(
        "sp_reservation_save: {} room line(s) kept, {} removed",
        kept.len(),
        removed
    );
    Ok(())
}

/// Same merge rule as room lines, keyed by service code.
fn merge_service_lines(
    conn: &mut SqliteConnection,
    reservation_no: &str,
    rows: &[ServiceDetailsRow],
) -> QueryResult<()> {
    use reservation_service_det::dsl;

    let mut kept = Vec::with_capacity(rows.len());
    for line in rows
        .iter()
        .filter_map(|row| NewServiceDetailDB::from_row(reservation_no, row))
    {
        diesel::insert_into(dsl::reservation_service_det)
            .values(&line)
            .on_conflict((dsl::reservation_no, dsl::service_code))
            .do_update()
            .set(&line.changeset())
            .execute(conn)?;
        kept.push(line.service_code);
    }

    diesel::update(
        dsl::reservation_service_det
            .filter(dsl::reservation_no.eq(reservation_no))
            .filter(dsl::is_delete.eq(false))
            .filter(dsl::service_code.ne_all(&kept)),
    )
    .set(dsl::is_delete.eq(true))
    .execute(conn)?;
    Ok(())
}

/// A payment row with no receipt, no payment id and no amount carries
/// nothing to record.
fn carries_payment(row: &PaymentDetailsRow) -> bool {
    row.receipt_no.is_some() || row.payment_id > 0 || row.amount > Decimal::ZERO
}

/// Replaces the active payment set and settles one receipt header per
/// distinct receipt number.
fn replace_payment_lines(
    conn: &mut SqliteConnection,
    reservation_no: &str,
    rows: &[PaymentDetailsRow],
    now: &NaiveDateTime,
) -> QueryResult<()> {
    use reservation_payment_det::dsl as det;
    use reservation_payment_hed::dsl as hed;

    diesel::update(
        det::reservation_payment_det
            .filter(det::reservation_no.eq(reservation_no))
            .filter(det::is_delete.eq(false)),
    )
    .set(det::is_delete.eq(true))
    .execute(conn)?;

    let mut receipts: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in rows.iter().filter(|row| carries_payment(row)) {
        diesel::insert_into(det::reservation_payment_det)
            .values(&NewPaymentDetailDB::from_row(reservation_no, row))
            .execute(conn)?;
        if let Some(receipt_no) = &row.receipt_no {
            *receipts.entry(receipt_no.clone()).or_default() += row.amount;
        }
    }

    for (receipt_no, amount) in &receipts {
        let amount = money_to_db(*amount);
        diesel::insert_into(hed::reservation_payment_hed)
            .values(&NewPaymentHedDB {
                receipt_no: receipt_no.clone(),
                reservation_no: reservation_no.to_string(),
                receipt_date: date_time_to_db(now),
                amount: amount.clone(),
                is_update: true,
            })
            .on_conflict(hed::receipt_no)
            .do_update()
            .set((
                hed::reservation_no.eq(reservation_no),
                hed::amount.eq(&amount),
                hed::is_update.eq(true),
            ))
            .execute(conn)?;
    }

    let referenced: Vec<String> = receipts.into_keys().collect();
    diesel::update(
        hed::reservation_payment_hed
            .filter(hed::reservation_no.eq(reservation_no))
            .filter(hed::receipt_no.ne_all(&referenced)),
    )
    .set(hed::is_update.eq(false))
    .execute(conn)?;
    Ok(())
}

/// Assigns an invoice to a finalized reservation that has none yet. Returns
/// the reservation's invoice number, if any, and whether this call assigned it.
fn finalize_invoice(
    conn: &mut SqliteConnection,
    reservation_no: &str,
    status_id: i32,
    now: &NaiveDateTime,
) -> QueryResult<(Option<String>, bool)> {
    use reservation_hed::dsl;

    let current = dsl::reservation_hed
        .find(reservation_no)
        .select(dsl::invoice_no)
        .first::<Option<String>>(conn)?
        .filter(|v| !v.trim().is_empty());

    if current.is_some() || status_id != FINALIZED_STATUS_ID {
        return Ok((current, false));
    }

    let invoice_no = next_document_number(conn, "invoice_no", INVOICE_NO_PREFIX)?;
    diesel::update(dsl::reservation_hed.find(reservation_no))
        .set((
            dsl::invoice_no.eq(&invoice_no),
            dsl::invoice_date.eq(date_time_to_db(now)),
        ))
        .execute(conn)?;
    debug!(
        "sp_reservation_save: reservation {} finalized as {}",
        reservation_no, invoice_no
    );
    Ok((Some(invoice_no), true))
}
