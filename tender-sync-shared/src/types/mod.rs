//! This module defines the core data structures used across the tender sync.
//! It re-exports the source records, the subtype tables and the search document.

pub mod source_system;
pub mod subtype;
pub mod tender;
pub mod tender_document;

pub use source_system::SourceSystem;
pub use subtype::{SubtypeRecord, SubtypeTables};
pub use tender::{BaseTender, SupportingDoc, Tag};
pub use tender_document::{SupportingDocSearchDocument, TenderSearchDocument};
