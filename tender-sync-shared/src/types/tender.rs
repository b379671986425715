//! Base tender records as they are stored in the relational database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A procurement tender as stored in the `BaseTender` table.
///
/// Tags and supporting documents are loaded eagerly and attached to the
/// tender they belong to. The `source` field is the discriminator naming
/// which subtype table holds the tender's extended attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseTender {
    pub tender_id: Uuid,
    pub title: String,
    pub status: String,
    pub published_date: DateTime<Utc>,
    pub closing_date: DateTime<Utc>,
    pub date_appended: DateTime<Utc>,
    /// Source-system discriminator, e.g. "eTender" or "SANRAL".
    pub source: String,
    pub description: Option<String>,
    pub ai_summary: Option<String>,
    pub tags: Vec<Tag>,
    pub supporting_docs: Vec<SupportingDoc>,
}

/// A category label shared by many tenders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub tag_id: Uuid,
    pub tag_name: String,
}

/// A document attached to exactly one tender.
///
/// The owning tender is implied by the `BaseTender::supporting_docs` list the
/// document lives in; there is no back-reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportingDoc {
    pub supporting_doc_id: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl BaseTender {
    /// Create a tender with no description, summary, tags or documents.
    ///
    /// All three dates are set to `at`.
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
        }
    }
}

impl Tag {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_id: Uuid::new_v4(),
            tag_name: tag_name.into(),
        }
    }
}

impl SupportingDoc {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            supporting_doc_id: Uuid::new_v4(),
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }
}
