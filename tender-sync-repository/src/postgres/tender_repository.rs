//! PostgreSQL implementation of the `TenderRepository` trait.
//!
//! Reads the tender store table by table:
//!
//! - `BaseTender`: one row per tender, carrying the `Source` discriminator
//! - `Tag` / `Tender_Tag`: tags shared many-to-many across tenders
//! - `SupportingDoc`: documents owned by one tender
//! - `eTender`, `EskomTender`, `SanralTender`, `SarsTender`, `TransnetTender`:
//!   source-system subtype rows keyed by `TenderID`
//!
//! Every read is ordered so repeated runs over unchanged data return the same
//! sequence.
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tender_sync_shared::{
    BaseTender, EskomTender, ETender, SanralTender, SarsTender, SupportingDoc, Tag,
    TransnetTender,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::TenderRepositoryError;
use crate::interfaces::TenderRepository;

/// PostgreSQL implementation of the tender repository.
pub struct PostgresTenderRepository {
    pool: PgPool,
}

impl PostgresTenderRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reads `(tender_id, tag)` pairs for every tagged tender.
    async fn fetch_tender_tags(&self) -> Result<Vec<(Uuid, Tag)>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT tt."TenderID", t."TagID", t."TagName"
               FROM "Tender_Tag" tt
               JOIN "Tag" t ON t."TagID" = tt."TagID"
               ORDER BY tt."TenderID", t."TagName", t."TagID""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut pairs = Vec::with_capacity(rows.len());
        for row in &rows {
            let tender_id: Uuid = row.try_get("TenderID")?;
            let tag = Tag {
                tag_id: row.try_get("TagID")?,
                tag_name: row.try_get("TagName")?,
            };
            pairs.push((tender_id, tag));
        }
        Ok(pairs)
    }

    /// Reads `(tender_id, document)` pairs for every supporting document.
    async fn fetch_supporting_docs(
        &self,
    ) -> Result<Vec<(Uuid, SupportingDoc)>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "SupportingDocID", "TenderID", "Name", "URL"
               FROM "SupportingDoc"
               ORDER BY "TenderID", "Name", "SupportingDocID""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut pairs = Vec::with_capacity(rows.len());
        for row in &rows {
            let tender_id: Uuid = row.try_get("TenderID")?;
            let doc = SupportingDoc {
                supporting_doc_id: row.try_get("SupportingDocID")?,
                name: row.try_get("Name")?,
                url: row.try_get("URL")?,
            };
            pairs.push((tender_id, doc));
        }
        Ok(pairs)
    }
}

fn base_tender_from_row(row: &PgRow) -> Result<BaseTender, sqlx::Error> {
    Ok(BaseTender {
        tender_id: row.try_get("TenderID")?,
        title: row.try_get("Title")?,
        status: row.try_get("Status")?,
        published_date: row.try_get("PublishedDate")?,
        closing_date: row.try_get("ClosingDate")?,
        date_appended: row.try_get("DateAppended")?,
        source: row.try_get("Source")?,
        description: row.try_get("Description")?,
        ai_summary: row.try_get("AISummary")?,
        tags: Vec::new(),
        supporting_docs: Vec::new(),
    })
}

/// Attach tags and documents to their tenders. Children of unknown tenders are dropped.
fn attach_children(
    tenders: &mut [BaseTender],
    tags: Vec<(Uuid, Tag)>,
    docs: Vec<(Uuid, SupportingDoc)>,
) {
    let positions: HashMap<Uuid, usize> = tenders
        .iter()
        .enumerate()
        .map(|(i, t)| (t.tender_id, i))
        .collect();

    for (tender_id, tag) in tags {
        if let Some(&i) = positions.get(&tender_id) {
            tenders[i].tags.push(tag);
        }
    }
    for (tender_id, doc) in docs {
        if let Some(&i) = positions.get(&tender_id) {
            tenders[i].supporting_docs.push(doc);
        }
    }
}

#[async_trait]
impl TenderRepository for PostgresTenderRepository {
    #[instrument(skip(self))]
    async fn fetch_tenders(&self) -> Result<Vec<BaseTender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "Title", "Status", "PublishedDate", "ClosingDate",
                      "DateAppended", "Source", "Description", "AISummary"
               FROM "BaseTender"
               ORDER BY "TenderID""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = rows
            .iter()
            .map(base_tender_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let tags = self.fetch_tender_tags().await?;
        let docs = self.fetch_supporting_docs().await?;
        debug!(
            tenders = tenders.len(),
            tag_links = tags.len(),
            supporting_docs = docs.len(),
            "Read base tenders and child collections"
        );

        attach_children(&mut tenders, tags, docs);
        Ok(tenders)
    }

    async fn fetch_etenders(&self) -> Result<HashMap<Uuid, ETender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "TenderNumber", "Audience", "Email", "OfficeLocation",
                      "Address", "Province"
               FROM "eTender""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tender = ETender {
                tender_id: row.try_get("TenderID")?,
                tender_number: row.try_get("TenderNumber")?,
                audience: row.try_get("Audience")?,
                email: row.try_get("Email")?,
                office_location: row.try_get("OfficeLocation")?,
                address: row.try_get("Address")?,
                province: row.try_get("Province")?,
            };
            tenders.insert(tender.tender_id, tender);
        }
        Ok(tenders)
    }

    async fn fetch_eskom_tenders(
        &self,
    ) -> Result<HashMap<Uuid, EskomTender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "TenderNumber", "Reference", "Audience", "OfficeLocation",
                      "Email", "Address", "Province"
               FROM "EskomTender""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tender = EskomTender {
                tender_id: row.try_get("TenderID")?,
                tender_number: row.try_get("TenderNumber")?,
                reference: row.try_get("Reference")?,
                audience: row.try_get("Audience")?,
                office_location: row.try_get("OfficeLocation")?,
                email: row.try_get("Email")?,
                address: row.try_get("Address")?,
                province: row.try_get("Province")?,
            };
            tenders.insert(tender.tender_id, tender);
        }
        Ok(tenders)
    }

    async fn fetch_sanral_tenders(
        &self,
    ) -> Result<HashMap<Uuid, SanralTender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "TenderNumber", "Category", "Location", "Email",
                      "FullTextNotice"
               FROM "SanralTender""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tender = SanralTender {
                tender_id: row.try_get("TenderID")?,
                tender_number: row.try_get("TenderNumber")?,
                category: row.try_get("Category")?,
                location: row.try_get("Location")?,
                email: row.try_get("Email")?,
                full_text_notice: row.try_get("FullTextNotice")?,
            };
            tenders.insert(tender.tender_id, tender);
        }
        Ok(tenders)
    }

    async fn fetch_sars_tenders(&self) -> Result<HashMap<Uuid, SarsTender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "TenderNumber", "BriefingSession" FROM "SarsTender""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tender = SarsTender {
                tender_id: row.try_get("TenderID")?,
                tender_number: row.try_get("TenderNumber")?,
                briefing_session: row.try_get("BriefingSession")?,
            };
            tenders.insert(tender.tender_id, tender);
        }
        Ok(tenders)
    }

    async fn fetch_transnet_tenders(
        &self,
    ) -> Result<HashMap<Uuid, TransnetTender>, TenderRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT "TenderID", "TenderNumber", "Category", "Region", "ContactPerson",
                      "Email", "Institution", "TenderType"
               FROM "TransnetTender""#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tenders = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tender = TransnetTender {
                tender_id: row.try_get("TenderID")?,
                tender_number: row.try_get("TenderNumber")?,
                category: row.try_get("Category")?,
                region: row.try_get("Region")?,
                contact_person: row.try_get("ContactPerson")?,
                email: row.try_get("Email")?,
                institution: row.try_get("Institution")?,
                tender_type: row.try_get("TenderType")?,
            };
            tenders.insert(tender.tender_id, tender);
        }
        Ok(tenders)
    }
}
