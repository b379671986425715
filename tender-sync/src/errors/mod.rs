//! Error types for a sync pass.

use serde::Serialize;
use tender_sync_repository::{BulkItemFailure, SearchIndexError, TenderRepositoryError};
use thiserror::Error;

/// Errors that abort a sync pass.
///
/// Batch numbers are 1-based, matching the log output.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Reading from the tender store failed.
    #[error("Data access error: {0}")]
    DataAccess(#[from] TenderRepositoryError),

    /// A batch could not be submitted to the search index.
    #[error("Upload of batch {batch} failed: {source}")]
    Transport {
        batch: usize,
        #[source]
        source: SearchIndexError,
    },

    /// A batch was submitted but the index rejected some of its documents.
    #[error("Batch {batch} had {} failed document(s)", .failures.len())]
    PartialBatch {
        batch: usize,
        failures: Vec<BulkItemFailure>,
    },
}

/// Coarse classification of a failed pass, as reported to the trigger caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    DataAccess,
    Upload,
    PartialBatch,
}

impl SyncError {
    /// Create a transport error for a batch.
    pub fn transport(batch: usize, source: SearchIndexError) -> Self {
        Self::Transport { batch, source }
    }

    /// Create a partial batch error.
    pub fn partial_batch(batch: usize, failures: Vec<BulkItemFailure>) -> Self {
        Self::PartialBatch { batch, failures }
    }

    pub fn category(&self) -> FaultCategory {
        match self {
            Self::DataAccess(_) => FaultCategory::DataAccess,
            Self::Transport { .. } => FaultCategory::Upload,
            Self::PartialBatch { .. } => FaultCategory::PartialBatch,
        }
    }

    /// The failing batch, if the pass got as far as uploading.
    pub fn batch(&self) -> Option<usize> {
        match self {
            Self::DataAccess(_) => None,
            Self::Transport { batch, .. } | Self::PartialBatch { batch, .. } => Some(*batch),
        }
    }
}
