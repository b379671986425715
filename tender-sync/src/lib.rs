//! # Tender Sync
//!
//! Re-synchronizes procurement tenders from PostgreSQL into an OpenSearch
//! index, one full pass per trigger.
//!
//! ## Architecture
//!
//! The sync follows a Reader-Processor-Loader pattern:
//!
//! 1. **Reader**: Loads tenders, tags, supporting documents and the five subtype tables
//! 2. **Processor**: Flattens each tender into one search document
//! 3. **Batcher**: Splits documents into fixed-size groups
//! 4. **Loader**: Bulk upserts each group into OpenSearch
//! 5. **Orchestrator**: Runs the pass and stops at the first failing batch
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`reader`]: Reads the tender store
//! - [`processor`]: Transforms tenders into documents
//! - [`batcher`]: Partitions documents into batches
//! - [`loader`]: Upserts batches into OpenSearch
//! - [`orchestrator`]: Coordinates a sync pass
//! - [`server`]: HTTP trigger
//! - [`errors`]: Error types for a sync pass

pub mod batcher;
pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod reader;
pub mod server;

pub use config::Dependencies;
pub use errors::SyncError;

use thiserror::Error;

/// Errors that can occur during service initialization or while serving.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server error.
    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
