//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend.

mod bulk_response;
mod connection;
mod index_config;
mod provider;

pub use bulk_response::parse_bulk_response;
pub use connection::{OpenSearchAuth, OpenSearchConnection, AWS_SERVICE_NAME, DEFAULT_REQUEST_TIMEOUT};
pub use index_config::{get_index_settings, get_versioned_index_name, IndexConfig, INDEX_NAME};
pub use provider::OpenSearchProvider;
