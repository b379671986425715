//! Processor module for the tender sync.
//!
//! Transforms tender records into search documents.

mod tender_processor;

pub use tender_processor::TenderProcessor;
