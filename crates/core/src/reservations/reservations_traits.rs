use async_trait::async_trait;

use super::flattening::SaveReservationParams;
use super::reservations_model::{
    DateRange, FinalizedInvoiceRow, InvoiceDto, ReservationAggregate, SaveProcedureOutput,
};
use super::row_reconstruction::JoinedReservationRow;
use crate::errors::Result;

/// Persistence contract the reservation service is built on.
///
/// Reads return raw joined rows; folding them into aggregates is the
/// service's job.
#[async_trait]
pub trait ReservationRepositoryTrait: Send + Sync {
    /// Runs the save procedure and returns its two output identifiers.
    async fn execute_save(&self, params: SaveReservationParams) -> Result<SaveProcedureOutput>;

    /// Fan-out join over every reservation, optionally capped to the first
    /// `top` reservations by (date desc, number asc).
    async fn load_all_rows(&self, top: Option<i64>) -> Result<Vec<JoinedReservationRow>>;

    /// Customer-joined fan-out for one status, filtered on the calendar date
    /// of the reservation date.
    async fn load_rows_by_status(
        &self,
        status_id: i32,
        range: DateRange,
    ) -> Result<Vec<JoinedReservationRow>>;

    async fn find_invoice_number(&self, reservation_no: &str) -> Result<Option<String>>;

    /// Distinct, sorted receipt numbers of settled receipt headers.
    async fn find_receipt_numbers(&self, reservation_no: &str) -> Result<Vec<String>>;

    async fn load_finalized_invoices(&self, range: DateRange) -> Result<Vec<FinalizedInvoiceRow>>;
}

/// Reservation read/write operations exposed to the HTTP layer.
#[async_trait]
pub trait ReservationServiceTrait: Send + Sync {
    /// Saves the aggregate and returns the effective reservation number.
    async fn save_or_update(&self, reservation: ReservationAggregate) -> Result<String>;

    async fn get_all(&self, top: Option<i64>) -> Result<Vec<ReservationAggregate>>;

    async fn get_by_status(
        &self,
        status_id: i32,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Vec<ReservationAggregate>>;

    /// Best effort: absent when there is no invoice or the lookup fails.
    async fn get_invoice_number(&self, reservation_no: &str) -> Option<String>;

    /// Best effort: empty when the lookup fails.
    async fn get_receipt_numbers(&self, reservation_no: &str) -> Vec<String>;

    async fn get_finalized_invoices(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Vec<InvoiceDto>>;
}
