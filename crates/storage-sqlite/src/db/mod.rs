//! Connection pool, migrations and blocking execution helpers.

use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use hotelbook_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Creates the database file (and its directory) if missing and switches it
/// to WAL mode. Returns the path unchanged.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .map_err(StorageError::from)?;

    Ok(db_path.to_string())
}

pub fn create_pool(db_path: &str, max_size: u32) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .min_idle(Some(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer {}))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        StorageError::MigrationFailed(e.to_string())
    })?;

    if applied.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &applied {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

/// Gets a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    Ok(pool.get().map_err(StorageError::from)?)
}

/// Runs `job` on a pooled connection on the blocking thread pool. The
/// connection goes back to the pool when `job` returns, on every path.
pub async fn run_blocking<F, T>(pool: &Arc<DbPool>, job: F) -> Result<T>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || {
        let mut conn = get_connection(&pool)?;
        job(&mut *conn)
    })
    .await
    .map_err(|e| Error::Unexpected(format!("Database task did not complete: {}", e)))?
}

/// Like [`run_blocking`], inside an immediate transaction. Any error rolls
/// the transaction back.
pub async fn run_in_transaction<F, T>(pool: &Arc<DbPool>, job: F) -> Result<T>
where
    F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    run_blocking(pool, move |conn| {
        conn.immediate_transaction::<_, StorageError, _>(job)
            .map_err(Error::from)
    })
    .await
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous = NORMAL;
        ",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::RunQueryDsl;
    use tempfile::tempdir;

    #[derive(diesel::QueryableByName)]
    struct Count {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        total: i64,
    }

    #[tokio::test]
    async fn migrations_seed_reservation_statuses() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("nested").join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");
        let pool = create_pool(&db_path, 2).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        // Second run is a no-op.
        run_migrations(&pool).expect("Failed to rerun migrations");

        let count = run_blocking(&pool, |conn| {
            diesel::sql_query("SELECT COUNT(*) AS total FROM reservation_status")
                .get_result::<Count>(conn)
                .map_err(|e| StorageError::from(e).into())
        })
        .await
        .expect("Failed to count statuses");
        assert_eq!(count.total, 6);
    }

    #[tokio::test]
    async fn failed_transaction_rolls_back() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy(), 2).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let result: Result<()> = run_in_transaction(&pool, |conn| {
            diesel::sql_query(
                "INSERT INTO room_types (room_type_code, description, is_active, created_at) \
                 VALUES ('RT001', 'Deluxe', 1, '2025-01-01 00:00:00')",
            )
            .execute(conn)?;
            Err(StorageError::CoreError("abort".into()))
        })
        .await;
        assert!(result.is_err());

        let count = run_blocking(&pool, |conn| {
            diesel::sql_query("SELECT COUNT(*) AS total FROM room_types")
                .get_result::<Count>(conn)
                .map_err(|e| StorageError::from(e).into())
        })
        .await
        .expect("Failed to count room types");
        assert_eq!(count.total, 0);
    }
}
