//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the tender search index.

use serde_json::{json, Value};

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The alias name for the search index (used for all operations).
    pub alias: String,
    /// The version number for the index (e.g., 0 for "tenders_v0").
    pub version: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `alias` - The index alias name
    /// * `version` - The version number
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }

    /// Name of the concrete index the alias points at.
    pub fn versioned_index_name(&self) -> String {
        get_versioned_index_name(&self.alias, Some(self.version))
    }
}

/// The base name of the search index (without version).
pub const INDEX_NAME: &str = "tenders";

/// Get the versioned index name for a base name.
///
/// # Arguments
///
/// * `base` - The base index name
/// * `version` - The version number (defaults to 0 if None)
///
/// # Returns
///
/// The versioned index name (e.g., "tenders_v0")
pub fn get_versioned_index_name(base: &str, version: Option<u32>) -> String {
    let v = version.unwrap_or(0);
    format!("{}_v{}", base, v)
}

/// Get the index settings and mappings for the tender search index.
///
/// - **text** with a `raw` keyword subfield for the title, so it can be both
///   searched and sorted
/// - **keyword** for identifiers, status, discriminator, tags and the short
///   subtype attributes used as filters
/// - **date** for the three tender dates
/// - **nested** supporting documents, so name and URL stay paired
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "tender_id": { "type": "keyword" },
                "title": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" }
                    }
                },
                "status": { "type": "keyword" },
                "published_date": { "type": "date" },
                "closing_date": { "type": "date" },
                "date_appended": { "type": "date" },
                "source": { "type": "keyword" },
                "description": { "type": "text" },
                "ai_summary": { "type": "text" },
                "tags": { "type": "keyword" },
                "supporting_docs": {
                    "type": "nested",
                    "properties": {
                        "name": { "type": "text" },
                        "url": { "type": "keyword", "index": false }
                    }
                },
                "tender_number": { "type": "keyword" },
                "category": { "type": "keyword" },
                "email": { "type": "keyword" },
                "audience": { "type": "keyword" },
                "office_location": { "type": "text" },
                "address": { "type": "text" },
                "province": { "type": "keyword" },
                "reference": { "type": "keyword" },
                "location": { "type": "text" },
                "full_text_notice": { "type": "text" },
                "briefing_session": { "type": "text" },
                "region": { "type": "keyword" },
                "contact_person": { "type": "text" },
                "institution": { "type": "keyword" },
                "tender_type": { "type": "keyword" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(properties["tender_id"]["type"], "keyword");
        assert_eq!(properties["tags"]["type"], "keyword");
        assert_eq!(properties["closing_date"]["type"], "date");
        assert_eq!(properties["supporting_docs"]["type"], "nested");
        assert_eq!(properties["title"]["fields"]["raw"]["type"], "keyword");
    }

    #[test]
    fn test_every_document_field_is_mapped() {
        let settings = get_index_settings();
        let properties = settings["mappings"]["properties"].as_object().unwrap();

        for field in [
            "tender_number",
            "category",
            "email",
            "audience",
            "office_location",
            "address",
            "province",
            "reference",
            "location",
            "full_text_notice",
            "briefing_session",
            "region",
            "contact_person",
            "institution",
            "tender_type",
        ] {
            assert!(properties.contains_key(field), "missing mapping for {}", field);
        }
    }

    #[test]
    fn test_versioned_index_name() {
        assert_eq!(get_versioned_index_name(INDEX_NAME, None), "tenders_v0");
        assert_eq!(get_versioned_index_name(INDEX_NAME, Some(3)), "tenders_v3");
        assert_eq!(IndexConfig::new("tenders", 2).versioned_index_name(), "tenders_v2");
    }
}
