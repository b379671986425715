//! Error types for reading tenders from the relational store.
use thiserror::Error;

/// Represents errors that can occur while reading from the tender store.
///
/// Any of these is fatal to a sync run.
#[derive(Debug, Error)]
pub enum TenderRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl TenderRepositoryError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}
