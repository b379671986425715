//! Source-system specific subtype rows.
//!
//! Every tender has at most one row in the subtype table named by its
//! discriminator. The five row types share nothing beyond `tender_number`;
//! overlapping field names (e.g. `category`) are mapped independently.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::source_system::SourceSystem;

/// Row from the `eTender` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ETender {
    pub tender_id: Uuid,
    pub tender_number: Option<String>,
    pub audience: Option<String>,
    pub email: Option<String>,
    pub office_location: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
}

/// Row from the `EskomTender` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EskomTender {
    pub tender_id: Uuid,
    pub tender_number: Option<String>,
    pub reference: Option<String>,
    pub audience: Option<String>,
    pub office_location: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
}

/// Row from the `SanralTender` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SanralTender {
    pub tender_id: Uuid,
    pub tender_number: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub full_text_notice: Option<String>,
}

/// Row from the `SarsTender` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SarsTender {
    pub tender_id: Uuid,
    pub tender_number: Option<String>,
    pub briefing_session: Option<String>,
}

/// Row from the `TransnetTender` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransnetTender {
    pub tender_id: Uuid,
    pub tender_number: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub institution: Option<String>,
    pub tender_type: Option<String>,
}

/// A borrowed subtype row, tagged by the source system it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtypeRecord<'a> {
    ETender(&'a ETender),
    Eskom(&'a EskomTender),
    Sanral(&'a SanralTender),
    Sars(&'a SarsTender),
    Transnet(&'a TransnetTender),
}

impl SubtypeRecord<'_> {
    pub fn source_system(&self) -> SourceSystem {
        match self {
            Self::ETender(_) => SourceSystem::ETender,
            Self::Eskom(_) => SourceSystem::Eskom,
            Self::Sanral(_) => SourceSystem::Sanral,
            Self::Sars(_) => SourceSystem::Sars,
            Self::Transnet(_) => SourceSystem::Transnet,
        }
    }
}

/// All five subtype tables, each keyed by tender ID.
///
/// Tables are always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtypeTables {
    pub etenders: HashMap<Uuid, ETender>,
    pub eskom: HashMap<Uuid, EskomTender>,
    pub sanral: HashMap<Uuid, SanralTender>,
    pub sars: HashMap<Uuid, SarsTender>,
    pub transnet: HashMap<Uuid, TransnetTender>,
}

impl SubtypeTables {
    /// Look up a tender's row in the one table owned by `system`.
    ///
    /// Rows for the same tender ID in other tables are never consulted.
    pub fn lookup(&self, system: SourceSystem, tender_id: &Uuid) -> Option<SubtypeRecord<'_>> {
        match system {
            SourceSystem::ETender => self.etenders.get(tender_id).map(SubtypeRecord::ETender),
            SourceSystem::Eskom => self.eskom.get(tender_id).map(SubtypeRecord::Eskom),
            SourceSystem::Sanral => self.sanral.get(tender_id).map(SubtypeRecord::Sanral),
            SourceSystem::Sars => self.sars.get(tender_id).map(SubtypeRecord::Sars),
            SourceSystem::Transnet => self.transnet.get(tender_id).map(SubtypeRecord::Transnet),
        }
    }

    /// Number of rows in the table owned by `system`.
    pub fn len_of(&self, system: SourceSystem) -> usize {
        match system {
            SourceSystem::ETender => self.etenders.len(),
            SourceSystem::Eskom => self.eskom.len(),
            SourceSystem::Sanral => self.sanral.len(),
            SourceSystem::Sars => self.sars.len(),
            SourceSystem::Transnet => self.transnet.len(),
        }
    }

    /// Total rows across all five tables.
    pub fn total_rows(&self) -> usize {
        SourceSystem::ALL.iter().map(|s| self.len_of(*s)).sum()
    }
}
