//! Flattened tender document as stored in the search index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document representation for the search index.
///
/// Combines the base tender, its subtype row, tag names and supporting
/// documents into one flat record. Subtype slots are populated only from the
/// row matching the tender's discriminator and are omitted from the JSON when
/// unset. The document carries no timestamp of its own, so re-indexing
/// unchanged data produces an identical `_source`.
///
/// `tender_id` doubles as the index document ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenderSearchDocument {
    pub tender_id: Uuid,
    pub title: String,
    pub status: String,
    pub published_date: DateTime<Utc>,
    pub closing_date: DateTime<Utc>,
    pub date_appended: DateTime<Utc>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,

    pub tags: Vec<String>,
    pub supporting_docs: Vec<SupportingDocSearchDocument>,

    // Shared by every source system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_number: Option<String>,
    // SANRAL, Transnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    // eTender, Eskom, SANRAL, Transnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    // eTender, Eskom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    // Eskom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    // SANRAL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_notice: Option<String>,

    // SARS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub briefing_session: Option<String>,

    // Transnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tender_type: Option<String>,
}

/// A supporting document reference, stripped of ownership metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportingDocSearchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TenderSearchDocument {
    /// Create a document with base fields only; all subtype slots unset.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use tender_sync_shared::TenderSearchDocument;
    /// use uuid::Uuid;
    ///
    /// let doc = TenderSearchDocument::new(Uuid::new_v4(), "Bridge works", "Open", "SANRAL", Utc::now());
    /// assert!(doc.category.is_none());
    /// ```
    pub fn new(
        tender_id: Uuid,
        title: impl Into<String>,
        status: impl Into<String>,
        source: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            tender_id,
            title: title.into(),
            status: status.into(),
            published_date: at,
            closing_date: at,
            date_appended: at,
            source: source.into(),
            description: None,
            ai_summary: None,
            tags: Vec::new(),
            supporting_docs: Vec::new(),
            tender_number: None,
            category: None,
            email: None,
            audience: None,
            office_location: None,
            address: None,
            province: None,
            reference: None,
            location: None,
            full_text_notice: None,
            briefing_session: None,
            region: None,
            contact_person: None,
            institution: None,
            tender_type: None,
        }
    }

    /// The ID this document is written under in the search index.
    pub fn document_id(&self) -> String {
        self.tender_id.to_string()
    }
}
