use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::flattening::flatten_reservation;
use super::reservations_model::{DateRange, InvoiceDto, ReservationAggregate};
use super::reservations_traits::{ReservationRepositoryTrait, ReservationServiceTrait};
use super::row_reconstruction::{reconstruct, ReconstructionPolicy};
use crate::constants::DOCUMENT_NO_WIDTH;
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::time_utils::parse_filter_date;

/// Formats a generated reservation or invoice number, e.g. `RES000042`.
pub fn format_document_number(prefix: &str, sequence: i64) -> String {
    format!("{}{:0width$}", prefix, sequence, width = DOCUMENT_NO_WIDTH)
}

fn parse_range(from_date: Option<&str>, to_date: Option<&str>) -> Result<DateRange> {
    Ok(DateRange {
        from: parse_filter_date(from_date)?,
        to: parse_filter_date(to_date)?,
    })
}

/// Persistence gateway for reservations.
pub struct ReservationService {
    repository: Arc<dyn ReservationRepositoryTrait>,
}

impl ReservationService {
    pub fn new(repository: Arc<dyn ReservationRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReservationServiceTrait for ReservationService {
    async fn save_or_update(&self, reservation: ReservationAggregate) -> Result<String> {
        let params = flatten_reservation(&reservation);
        debug!(
            "Saving reservation '{}' with {} room, {} service and {} payment rows",
            params.header.reservation_no,
            params.details.room_details.len(),
            params.details.service_details.len(),
            params.details.payment_details.len()
        );

        match self.repository.execute_save(params).await {
            Ok(output) => {
                match output.invoice_no.as_deref().filter(|v| !v.is_empty()) {
                    Some(invoice_no) if output.invoice_generated => {
                        info!("Invoice generated: {}", invoice_no)
                    }
                    Some(invoice_no) => debug!("Reservation already invoiced: {}", invoice_no),
                    None => {}
                }
                Ok(output.reservation_no)
            }
            Err(Error::Database(DatabaseError::ProcedureFailed {
                procedure,
                kind,
                message,
            })) => {
                error!("SQL Error: {}", message);
                error!("SQL Error kind: {}", kind);
                error!("SQL Procedure: {}", procedure);
                Err(Error::DataAccess(format!(
                    "Database error occurred while saving reservation: {}",
                    message
                )))
            }
            Err(e) => {
                error!("Error: {}", e);
                Err(Error::DataAccess(format!(
                    "An error occurred while saving reservation: {}",
                    e
                )))
            }
        }
    }

    async fn get_all(&self, top: Option<i64>) -> Result<Vec<ReservationAggregate>> {
        let rows = self.repository.load_all_rows(top).await?;
        Ok(reconstruct(rows, ReconstructionPolicy::AllRecords))
    }

    async fn get_by_status(
        &self,
        status_id: i32,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Vec<ReservationAggregate>> {
        let range = parse_range(from_date, to_date)?;
        let rows = self
            .repository
            .load_rows_by_status(status_id, range)
            .await
            .inspect_err(|e| error!("Error fetching reservations: {}", e))?;
        Ok(reconstruct(rows, ReconstructionPolicy::StatusFiltered))
    }

    async fn get_invoice_number(&self, reservation_no: &str) -> Option<String> {
        if reservation_no.trim().is_empty() {
            warn!("Invoice lookup skipped: empty reservation number");
            return None;
        }
        match self.repository.find_invoice_number(reservation_no).await {
            Ok(invoice) => {
                let invoice = invoice.filter(|v| !v.trim().is_empty());
                debug!(
                    "Invoice lookup for {}: {}",
                    reservation_no,
                    invoice.as_deref().unwrap_or("none")
                );
                invoice
            }
            Err(e) => {
                warn!("Error getting invoice number for {}: {}", reservation_no, e);
                None
            }
        }
    }

    async fn get_receipt_numbers(&self, reservation_no: &str) -> Vec<String> {
        match self.repository.find_receipt_numbers(reservation_no).await {
            Ok(receipts) => {
                debug!(
                    "Found {} receipt(s) for reservation {}",
                    receipts.len(),
                    reservation_no
                );
                receipts
            }
            Err(e) => {
                error!(
                    "Error fetching receipt numbers for reservation {}: {}",
                    reservation_no, e
                );
                Vec::new()
            }
        }
    }

    async fn get_finalized_invoices(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Vec<InvoiceDto>> {
        let range = parse_range(from_date, to_date)?;
        let rows = self
            .repository
            .load_finalized_invoices(range)
            .await
            .inspect_err(|e| error!("Error fetching invoices: {}", e))?;
        Ok(rows.into_iter().map(InvoiceDto::from).collect())
    }
}
