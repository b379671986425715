//! Interface definitions for the sync's two collaborators.
//!
//! `TenderRepository` abstracts the relational source and
//! `SearchIndexProvider` abstracts the search backend, allowing dependency
//! injection and mock implementations in tests.

mod search_index_provider;
mod tender_repository;

pub use search_index_provider::SearchIndexProvider;
pub use tender_repository::TenderRepository;
