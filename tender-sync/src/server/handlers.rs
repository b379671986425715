//! HTTP request handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::SyncError;
use crate::server::state::AppState;

/// Welcome endpoint
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "Tender sync service. POST /sync/start to run a full sync.")
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Sync endpoint - runs one full pass and reports its outcome.
///
/// Returns `409 Conflict` without waiting if a pass is already running.
/// The pass runs on its own task and holds the lock until it ends, so a
/// caller that disconnects early does not cut it short.
pub async fn start_sync(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let Ok(mut orchestrator) = Arc::clone(&state.orchestrator).try_lock_owned() else {
        warn!("Sync requested while another sync is running");
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "status": "error",
                "message": "A sync is already running"
            })),
        );
    };

    info!("Sync requested");

    let pass = tokio::spawn(async move { orchestrator.run().await });

    match pass.await {
        Ok(Ok(report)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": format!(
                    "Sync successful. {} documents created/updated.",
                    report.documents_processed
                ),
                "documents_processed": report.documents_processed,
                "batches_uploaded": report.batches_uploaded,
                "elapsed_ms": report.elapsed.as_millis() as u64
            })),
        ),
        Ok(Err(e)) => (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body(&e))),
        Err(e) => {
            error!(error = %e, "Sync task did not complete");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": format!("Sync task failed: {}", e)
                })),
            )
        }
    }
}

/// Render a failed pass as the JSON error body.
fn error_body(error: &SyncError) -> Value {
    let mut body = json!({
        "status": "error",
        "message": error.to_string(),
        "category": error.category(),
    });

    if let Some(batch) = error.batch() {
        body["batch"] = json!(batch);
    }
    if let SyncError::PartialBatch { failures, .. } = error {
        body["failures"] = failures
            .iter()
            .map(|f| json!({ "id": f.document_id, "error": f.error }))
            .collect();
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_sync_repository::{BulkItemFailure, SearchIndexError, TenderRepositoryError};

    #[test]
    fn test_error_body_for_partial_batch() {
        let error = SyncError::partial_batch(
            3,
            vec![BulkItemFailure {
                document_id: "7f1c".to_string(),
                status: Some(400),
                error: "mapper_parsing_exception: bad date".to_string(),
            }],
        );

        let body = error_body(&error);

        assert_eq!(body["status"], "error");
        assert_eq!(body["category"], "partial_batch");
        assert_eq!(body["batch"], 3);
        assert_eq!(body["failures"][0]["id"], "7f1c");
        assert_eq!(body["failures"][0]["error"], "mapper_parsing_exception: bad date");
    }

    #[test]
    fn test_error_body_for_upload_and_data_access() {
        let upload = error_body(&SyncError::transport(1, SearchIndexError::bulk_index("timeout")));
        assert_eq!(upload["category"], "upload");
        assert_eq!(upload["batch"], 1);
        assert!(upload.get("failures").is_none());

        let data = error_body(&SyncError::from(TenderRepositoryError::connection("refused")));
        assert_eq!(data["category"], "data_access");
        assert!(data.get("batch").is_none());
    }
}
