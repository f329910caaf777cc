//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! session setup for PostgreSQL.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a PostgreSQL connection pool.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Pins every pooled session to UTC so `NOW()` windows line up with
/// kline timestamps.
#[derive(Debug, Clone, Copy)]
struct UtcSession;

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for UtcSession {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query("SET timezone = 'UTC'")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given connection string.
///
/// Accepts either a `postgres://` URL or a libpq `key=value` string.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(UtcSession))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    debug!(count = applied.len(), "Applied pending migrations");
    Ok(())
}

/// Round-trip a trivial query.
///
/// # Errors
/// Returns an error if no connection can be checked out or the query fails.
pub fn ping(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    diesel::sql_query("SELECT 1")
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Ping the database, logging a failure instead of returning it.
pub fn warm_up(pool: &DbPool) {
    if let Err(e) = ping(pool) {
        warn!(error = %e, "Database ping failed");
    }
}
