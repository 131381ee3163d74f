//! Reservations module - aggregate model, flattening encoder, row
//! reconstruction and the persistence gateway service.

pub mod flattening;
pub mod row_reconstruction;
mod reservations_model;
mod reservations_service;
mod reservations_traits;


pub use flattening::{
    flatten_reservation, FlattenedDetails, PaymentDetailsRow, ReservationHeaderParams,
    RoomDetailsRow, SaveReservationParams, ServiceDetailsRow,
};
pub use reservations_model::{
    Customer, DateRange, FinalizedInvoiceRow, InvoiceDto, PaymentLine, ReservationAggregate,
    RoomLine, SaveProcedureOutput, ServiceLine,
};
pub use reservations_service::{format_document_number, ReservationService};
pub use reservations_traits::{ReservationRepositoryTrait, ReservationServiceTrait};
pub use row_reconstruction::{reconstruct, JoinedReservationRow, ReconstructionPolicy};
