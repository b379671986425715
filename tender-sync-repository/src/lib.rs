//! # Tender Sync Repository
//!
//! This crate provides the two collaborators the sync core talks to: the
//! relational source of tender records and the search index they are written
//! to. It includes error definitions, the `TenderRepository` and
//! `SearchIndexProvider` interfaces, and concrete implementations for
//! PostgreSQL and OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod postgres;
pub mod types;

pub use errors::{SearchIndexError, TenderRepositoryError};
pub use interfaces::{SearchIndexProvider, TenderRepository};
pub use opensearch::{OpenSearchAuth, OpenSearchConnection, OpenSearchProvider};
pub use postgres::PostgresTenderRepository;
pub use types::{BulkItemFailure, BulkUpsertSummary};
