use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domains::jobs::{ingest_external_jobs, IngestResponse};
use crate::server::app::AppState;

/// Header carrying the operator token for the manual trigger
pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

/// Manual external ingestion (`GET /api/v1/jobs/fetch-external`)
///
/// Answers 404 unless an operator token is configured, 401 unless the request
/// carries it.
pub async fn fetch_external_jobs_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    let Some(expected) = state.ingest_trigger_token.as_deref() else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response();
    };

    let provided = headers
        .get(INGEST_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !tokens_match(provided, expected) {
        tracing::warn!("Rejected manual ingestion trigger without a valid token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Not Authorized" })),
        )
            .into_response();
    }

    match ingest_external_jobs(state.deps.job_source.as_ref(), state.deps.jobs.as_ref()).await {
        Ok(report) => (StatusCode::OK, Json(IngestResponse::saved(report.inserted))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": "Server Error",
                "error": e.to_string(),
                "saved": e.inserted(),
            })),
        )
            .into_response(),
    }
}

/// Compare without short-circuiting on the first differing byte
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
