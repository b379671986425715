//! Loader module for the tender sync.
//!
//! Upserts batches of documents into the search index.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::batcher::DEFAULT_BATCH_SIZE;
use crate::errors::SyncError;
use tender_sync_repository::{SearchIndexError, SearchIndexProvider};
use tender_sync_shared::TenderSearchDocument;

/// Configuration for the search loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Largest batch accepted in one bulk request.
    pub max_batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_BATCH_SIZE.get(),
        }
    }
}

/// Loader that writes document batches to the search index.
///
/// Each batch is one bulk request. A batch fails if the request cannot be
/// delivered or if any document in it is rejected; documents the index did
/// apply stay applied.
pub struct SearchLoader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl SearchLoader {
    /// Create a new search loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: LoaderConfig::default(),
        }
    }

    /// Create a new search loader with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self { provider, config }
    }

    /// Upload one batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - 1-based batch number, used in errors and logs
    /// * `documents` - The documents to upsert
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of documents applied
    /// * `Err(SyncError::Transport)` - The request was refused or not delivered
    /// * `Err(SyncError::PartialBatch)` - One or more documents were rejected
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn upload_batch(
        &self,
        batch: usize,
        documents: &[TenderSearchDocument],
    ) -> Result<usize, SyncError> {
        if documents.len() > self.config.max_batch_size {
            return Err(SyncError::transport(
                batch,
                SearchIndexError::batch_size_exceeded(documents.len(), self.config.max_batch_size),
            ));
        }

        let summary = match self.provider.bulk_upsert_documents(documents).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(batch = batch, error = %e, "Failed to submit batch");
                return Err(SyncError::transport(batch, e));
            }
        };

        if !summary.is_success() {
            warn!(
                batch = batch,
                succeeded = summary.succeeded,
                failed = summary.failed(),
                "Bulk upsert completed with failures"
            );
            for failure in &summary.failures {
                error!(
                    batch = batch,
                    tender_id = %failure.document_id,
                    error = %failure.error,
                    "Failed to upsert document"
                );
            }
            return Err(SyncError::partial_batch(batch, summary.failures));
        }

        debug!(batch = batch, count = summary.succeeded, "Uploaded batch");
        Ok(summary.succeeded)
    }
}
