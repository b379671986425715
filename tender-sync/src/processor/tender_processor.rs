//! Tender processor implementation.
//!
//! Flattens base tenders and their subtype rows into `TenderSearchDocument`s.

use tracing::{debug, instrument, trace};

use tender_sync_shared::{
    BaseTender, SourceSystem, SubtypeRecord, SubtypeTables, SupportingDocSearchDocument,
    TenderSearchDocument,
};

/// Processor that turns tender records into search documents.
///
/// Flattening never fails: a tender whose discriminator is unknown, or whose
/// subtype row is missing, still yields a document with every subtype slot
/// left unset.
#[derive(Debug, Default)]
pub struct TenderProcessor {}

impl TenderProcessor {
    /// Create a new tender processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Flatten every tender, preserving input order.
    ///
    /// # Arguments
    ///
    /// * `tenders` - Base tenders with tags and supporting documents attached
    /// * `subtypes` - The five subtype tables
    ///
    /// # Returns
    ///
    /// Exactly one document per tender.
    #[instrument(skip(self, tenders, subtypes), fields(tender_count = tenders.len()))]
    pub fn process_all(
        &self,
        tenders: &[BaseTender],
        subtypes: &SubtypeTables,
    ) -> Vec<TenderSearchDocument> {
        let mut documents = Vec::with_capacity(tenders.len());
        let mut unknown_source = 0usize;
        let mut missing_subtype = 0usize;

        for tender in tenders {
            match SourceSystem::from_discriminator(&tender.source) {
                None => unknown_source += 1,
                Some(system) if subtypes.lookup(system, &tender.tender_id).is_none() => {
                    missing_subtype += 1
                }
                Some(_) => {}
            }
            documents.push(self.flatten(tender, subtypes));
        }

        debug!(
            documents = documents.len(),
            unknown_source = unknown_source,
            missing_subtype = missing_subtype,
            "Flattened tenders"
        );
        documents
    }

    /// Flatten one tender into a search document.
    pub fn flatten(&self, tender: &BaseTender, subtypes: &SubtypeTables) -> TenderSearchDocument {
        let mut doc = TenderSearchDocument::new(
            tender.tender_id,
            tender.title.clone(),
            tender.status.clone(),
            tender.source.clone(),
            tender.published_date,
        );
        doc.closing_date = tender.closing_date;
        doc.date_appended = tender.date_appended;
        doc.description = tender.description.clone();
        doc.ai_summary = tender.ai_summary.clone();

        doc.tags = tender.tags.iter().map(|t| t.tag_name.clone()).collect();
        doc.supporting_docs = tender
            .supporting_docs
            .iter()
            .map(|d| SupportingDocSearchDocument {
                name: d.name.clone(),
                url: d.url.clone(),
            })
            .collect();

        let record = SourceSystem::from_discriminator(&tender.source)
            .and_then(|system| subtypes.lookup(system, &tender.tender_id));
        if let Some(record) = record {
            trace!(
                tender_id = %tender.tender_id,
                source_system = %record.source_system(),
                "Merging subtype row"
            );
            merge_subtype(&mut doc, record);
        }

        doc
    }
}

/// Copy one subtype row's attributes into the matching document slots.
fn merge_subtype(doc: &mut TenderSearchDocument, record: SubtypeRecord<'_>) {
    match record {
        SubtypeRecord::ETender(row) => {
            doc.tender_number = row.tender_number.clone();
            doc.audience = row.audience.clone();
            doc.email = row.email.clone();
            doc.office_location = row.office_location.clone();
            doc.address = row.address.clone();
            doc.province = row.province.clone();
        }
        SubtypeRecord::Eskom(row) => {
            doc.tender_number = row.tender_number.clone();
            doc.reference = row.reference.clone();
            doc.audience = row.audience.clone();
            doc.office_location = row.office_location.clone();
            doc.email = row.email.clone();
            doc.address = row.address.clone();
            doc.province = row.province.clone();
        }
        SubtypeRecord::Sanral(row) => {
            doc.tender_number = row.tender_number.clone();
            doc.category = row.category.clone();
            doc.location = row.location.clone();
            doc.email = row.email.clone();
            doc.full_text_notice = row.full_text_notice.clone();
        }
        SubtypeRecord::Sars(row) => {
            doc.tender_number = row.tender_number.clone();
            doc.briefing_session = row.briefing_session.clone();
        }
        SubtypeRecord::Transnet(row) => {
            doc.tender_number = row.tender_number.clone();
            doc.category = row.category.clone();
            doc.region = row.region.clone();
            doc.contact_person = row.contact_person.clone();
            doc.email = row.email.clone();
            doc.institution = row.institution.clone();
            doc.tender_type = row.tender_type.clone();
        }
    }
}
