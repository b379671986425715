//! Error types for the tender sync repository.
//!
//! One error type per collaborator: the search index and the tender store.

mod search_index_error;
mod tender_repository_error;

pub use search_index_error::SearchIndexError;
pub use tender_repository_error::TenderRepositoryError;
