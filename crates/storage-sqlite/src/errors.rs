//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the
//! database-agnostic error types defined in `hotelbook_core`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use hotelbook_core::errors::{DatabaseError, Error};

const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";
const UNIQUE_FAILED: &str = "UNIQUE constraint failed";

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `hotelbook_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A statement inside a stored save procedure failed; the transaction
    /// has been rolled back.
    #[error("{procedure} failed ({kind}): {message}")]
    Procedure {
        procedure: String,
        kind: String,
        message: String,
    },

    #[error("Core error: {0}")]
    CoreError(String),
}

impl StorageError {
    /// Wraps a Diesel error raised while running `procedure`.
    pub fn procedure(procedure: &str, err: DieselError) -> Self {
        StorageError::Procedure {
            procedure: procedure.to_string(),
            kind: failure_kind(&err),
            message: err.to_string(),
        }
    }
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

fn failure_kind(err: &DieselError) -> String {
    match err {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => "UniqueViolation".to_string(),
            DatabaseErrorKind::ForeignKeyViolation => "ForeignKeyViolation".to_string(),
            DatabaseErrorKind::NotNullViolation => "NotNullViolation".to_string(),
            DatabaseErrorKind::CheckViolation => "CheckViolation".to_string(),
            _ if info.message().contains(FOREIGN_KEY_FAILED) => "ForeignKeyViolation".to_string(),
            other => format!("{:?}", other),
        },
        DieselError::NotFound => "NotFound".to_string(),
        DieselError::RollbackTransaction => "Rollback".to_string(),
        _ => "Query".to_string(),
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            // Older SQLite builds report constraint failures without an
            // extended result code.
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if info.message().contains(FOREIGN_KEY_FAILED) =>
            {
                Error::Database(DatabaseError::ForeignKeyViolation(
                    info.message().to_string(),
                ))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if info.message().contains(UNIQUE_FAILED) =>
            {
                Error::Database(DatabaseError::UniqueViolation(info.message().to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Procedure {
                procedure,
                kind,
                message,
            } => Error::Database(DatabaseError::ProcedureFailed {
                procedure,
                kind,
                message,
            }),
            StorageError::CoreError(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> hotelbook_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> hotelbook_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> hotelbook_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_database_not_found() {
        let err: Error = StorageError::QueryFailed(DieselError::NotFound).into();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[test]
    fn procedure_failure_keeps_its_name_and_kind() {
        let err: Error =
            StorageError::procedure("sp_reservation_save", DieselError::RollbackTransaction).into();
        match err {
            Error::Database(DatabaseError::ProcedureFailed {
                procedure, kind, ..
            }) => {
                assert_eq!(procedure, "sp_reservation_save");
                assert_eq!(kind, "Rollback");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
