//! SQLite storage implementation for the hotelbook reservation backend.
//!
//! This crate is the only place where Diesel dependencies exist. It
//! implements the repository traits defined in `hotelbook-core` and contains:
//! - Database connection pooling and migrations
//! - The reservation save procedure
//! - Repository implementations for reservations, room types and the calendar
//! - Database-specific model types (with Diesel derives)
//!
//! ```text
//!        core (domain, traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod calendar;
pub mod reservations;
pub mod room_types;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_blocking, run_in_transaction, run_migrations,
    DbConnection, DbPool,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from hotelbook-core for convenience
pub use hotelbook_core::errors::{DatabaseError, Error, Result};
