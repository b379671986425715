//! Interpretation of OpenSearch `_bulk` responses.
//!
//! A bulk response has a top-level `errors` flag and one entry per submitted
//! action in `items`, in submission order. Each entry is an object keyed by
//! the action name (`index` here) holding `_id`, `status` and, on failure,
//! an `error` object.

use serde_json::Value;
use tracing::warn;

use crate::errors::SearchIndexError;
use crate::types::{BulkItemFailure, BulkUpsertSummary};

/// Build a `BulkUpsertSummary` from a parsed `_bulk` response body.
///
/// Items are matched to documents by position. A document with no matching
/// item is reported as failed, since the index never confirmed it.
///
/// # Arguments
///
/// * `body` - The JSON response body
/// * `document_ids` - IDs of the submitted documents, in request order
///
/// # Returns
///
/// * `Ok(BulkUpsertSummary)` - Per-document outcome
/// * `Err(SearchIndexError::ParseError)` - If the body has no `items` array or
///   more items than documents were sent
pub fn parse_bulk_response(
    body: &Value,
    document_ids: &[String],
) -> Result<BulkUpsertSummary, SearchIndexError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::parse("bulk response has no items array"))?;

    if items.len() > document_ids.len() {
        return Err(SearchIndexError::parse(format!(
            "bulk response has {} items for {} submitted documents",
            items.len(),
            document_ids.len()
        )));
    }

    let mut failures: Vec<BulkItemFailure> = items
        .iter()
        .zip(document_ids)
        .filter_map(|(item, id)| item_failure(item, id))
        .collect();

    // A flag without any failing item still means the request did not fully apply.
    let flagged = body.get("errors").and_then(Value::as_bool).unwrap_or(false);
    if flagged && failures.is_empty() {
        return Err(SearchIndexError::parse(
            "bulk response reports errors but no failing item could be identified",
        ));
    }

    if items.len() < document_ids.len() {
        warn!(
            submitted = document_ids.len(),
            returned = items.len(),
            "Bulk response is missing items; unconfirmed documents count as failed"
        );
        failures.extend(document_ids[items.len()..].iter().map(|id| BulkItemFailure {
            document_id: id.clone(),
            status: None,
            error: "no result returned for document".to_string(),
        }));
    }

    let total = document_ids.len();
    Ok(BulkUpsertSummary {
        total,
        succeeded: total - failures.len(),
        failures,
    })
}

/// Extract the failure from one bulk item, if it failed.
///
/// `submitted_id` stands in when the item carries no `_id`.
fn item_failure(item: &Value, submitted_id: &str) -> Option<BulkItemFailure> {
    let action = item.as_object()?.values().next()?;

    let document_id = action
        .get("_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .unwrap_or(submitted_id)
        .to_string();
    let status = action
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok());

    match action.get("error") {
        Some(error) => Some(BulkItemFailure {
            document_id,
            status,
            error: describe_error(error),
        }),
        None if status.is_some_and(|s| !(200..300).contains(&s)) => Some(BulkItemFailure {
            document_id,
            status,
            error: format!("item rejected with status {}", status.unwrap_or_default()),
        }),
        None => None,
    }
}

/// Render a bulk item error as `type: reason`.
fn describe_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str);
            let reason = obj.get("reason").and_then(Value::as_str);
            match (kind, reason) {
                (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                (Some(kind), None) => kind.to_string(),
                (None, Some(reason)) => reason.to_string(),
                (None, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}
