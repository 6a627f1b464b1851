// HTTP route handlers for the Runbox API
//
// The handlers own only the wire contract. Authentication, persistence of
// execution metadata, and rate limiting are the caller's responsibility.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use runbox_core::{ExecutionRequest, Language};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub language: Language,
    pub code: String,
}

/// POST /execute - Run code and block until the attempt finishes
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecuteRequest>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let request = ExecutionRequest::new(payload.language, payload.code)
        .with_stdin(payload.input);

    info!(
        request_id = %request_id,
        language = %request.language,
        source_len = request.source_code.len(),
        stdin_len = request.stdin.len(),
        "Execution request received"
    );

    let start = std::time::Instant::now();
    let result = state.executor.execute(&request).await;

    info!(
        request_id = %request_id,
        success = result.success,
        output_len = result.output.len(),
        execution_ms = start.elapsed().as_millis() as u64,
        "Execution request finished"
    );

    (StatusCode::OK, Json(result))
}

/// POST /validate - Static screen only, no execution
pub async fn validate_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValidateRequest>,
) -> impl IntoResponse {
    let request = ExecutionRequest::new(payload.language, payload.code);
    let report = state.executor.validate(&request);

    info!(
        language = %request.language,
        valid = report.valid,
        issues = report.issues.len(),
        "Validation request handled"
    );

    (StatusCode::OK, Json(report))
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
