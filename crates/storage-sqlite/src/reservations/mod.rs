//! SQLite storage implementation for reservations.

mod model;
mod procedure;
mod repository;

pub use model::{FinalizedInvoiceRowDB, JoinedReservationRowDB};
pub(crate) use model::TextValueDB;
pub use procedure::sp_reservation_save;
pub use repository::ReservationRepository;
