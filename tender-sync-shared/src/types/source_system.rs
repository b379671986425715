//! The closed set of source systems a tender can come from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source system named by a tender's discriminator field.
///
/// Each variant owns one subtype table. Matching against the stored
/// discriminator is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    #[serde(rename = "eTender")]
    ETender,
    #[serde(rename = "Eskom")]
    Eskom,
    #[serde(rename = "SANRAL")]
    Sanral,
    #[serde(rename = "SARS")]
    Sars,
    #[serde(rename = "Transnet")]
    Transnet,
}

impl SourceSystem {
    /// All source systems, in a fixed order.
    pub const ALL: [SourceSystem; 5] = [
        SourceSystem::ETender,
        SourceSystem::Eskom,
        SourceSystem::Sanral,
        SourceSystem::Sars,
        SourceSystem::Transnet,
    ];

    /// Parse a stored discriminator. Returns `None` for unknown values.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "eTender" => Some(Self::ETender),
            "Eskom" => Some(Self::Eskom),
            "SANRAL" => Some(Self::Sanral),
            "SARS" => Some(Self::Sars),
            "Transnet" => Some(Self::Transnet),
            _ => None,
        }
    }

    /// The discriminator value as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ETender => "eTender",
            Self::Eskom => "Eskom",
            Self::Sanral => "SANRAL",
            Self::Sars => "SARS",
            Self::Transnet => "Transnet",
        }
    }

    /// Name of the subtype table holding this system's extended rows.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::ETender => "eTender",
            Self::Eskom => "EskomTender",
            Self::Sanral => "SanralTender",
            Self::Sars => "SarsTender",
            Self::Transnet => "TransnetTender",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
