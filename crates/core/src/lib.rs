//! Hotelbook Core - Domain entities, services, and traits.
//!
//! This crate contains the reservation business logic. It is
//! database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod calendar;
pub mod constants;
pub mod errors;
pub mod reservations;
pub mod room_types;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
