// PostgreSQL connection setup
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::TenderRepositoryError;

/// Connect to PostgreSQL and return a connection pool.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, TenderRepositoryError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| TenderRepositoryError::connection(format!("Failed to connect to PostgreSQL: {}", e)))
}
