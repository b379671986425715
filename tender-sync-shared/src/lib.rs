//! # Tender Sync Shared
//!
//! This crate defines the data structures shared across the tender sync system:
//! the relational source records as they are read from the database, and the
//! flattened document that is written to the search index.

pub mod types;

pub use types::source_system::SourceSystem;
pub use types::subtype::{
    EskomTender, SanralTender, SarsTender, SubtypeRecord, SubtypeTables, TransnetTender, ETender,
};
pub use types::tender::{BaseTender, SupportingDoc, Tag};
pub use types::tender_document::{SupportingDocSearchDocument, TenderSearchDocument};
