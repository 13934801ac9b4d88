//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, migrate::MigrateError, postgres::PgRow};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// Dropping the returned transaction without committing rolls back every
    /// statement executed on it.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the
    /// transaction cannot be started.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative `INTEGER` column as `u32`.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get(col)?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a quantity into the `INTEGER` the schema stores.
pub(crate) fn quantity_param(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
