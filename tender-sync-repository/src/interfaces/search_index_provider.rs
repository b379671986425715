//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use tender_sync_shared::TenderSearchDocument;

use crate::errors::SearchIndexError;
use crate::types::BulkUpsertSummary;

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the sync loader so the pipeline can be
/// exercised against mock backends.
///
/// # Upsert semantics
///
/// Every document is written under its tender ID with create-or-replace
/// semantics. Writing the same document twice leaves one copy in the index,
/// identical to the second write. Fields absent from the new document are
/// absent from the stored one; nothing is merged.
///
/// # Index Initialization
///
/// Implementations should call `ensure_index_exists` during application startup
/// so the index and its alias are configured before any document is written.
/// Startup calls `ping` first to find out whether the server is reachable at all.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Send one request to the server and check that it answers.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The server answered with a success status
    /// * `Err(SearchIndexError)` - The server could not be reached or refused the request
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Ensure the search index and any required aliases exist, creating them if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If initialization fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Upsert a batch of documents in a single bulk request.
    ///
    /// # Arguments
    ///
    /// * `documents` - The documents to write, each keyed by its tender ID
    ///
    /// # Returns
    ///
    /// * `Ok(BulkUpsertSummary)` - The request was delivered; the summary lists
    ///   every document the index did not apply
    /// * `Err(SearchIndexError)` - The request could not be delivered at all, so
    ///   no per-document outcome is known
    async fn bulk_upsert_documents(
        &self,
        documents: &[TenderSearchDocument],
    ) -> Result<BulkUpsertSummary, SearchIndexError>;
}
