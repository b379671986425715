//! Response types for search index operations.

/// A single document the search index refused to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// The document ID (tender ID) the write was keyed by.
    pub document_id: String,
    /// HTTP status reported for the item, if any.
    pub status: Option<u16>,
    /// Error detail reported by the index.
    pub error: String,
}

/// Summary of a bulk upsert containing aggregate counts and every failed item.
///
/// A bulk request is delivered as a whole, but the index applies each
/// document independently. Documents not listed in `failures` were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUpsertSummary {
    /// Total number of documents in the request.
    pub total: usize,
    /// Number of documents applied.
    pub succeeded: usize,
    /// Documents that were not applied.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkUpsertSummary {
    /// A summary in which all `total` documents were applied.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failures: Vec::new(),
        }
    }

    /// Whether every document in the request was applied.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of documents that were not applied.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
