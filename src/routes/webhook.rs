//! Webhook ingestion route for CI scan events.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::WebhookAuth;
use crate::models::event::ScanEvent;
use crate::services::ingestion::{self, IngestResponse};
use crate::services::normalizer::ScanDefaults;
use crate::AppState;

/// POST /api/v1/security/webhook — ingest one scan event (bearer-authenticated).
///
/// The body is decoded after auth; an unrecognized or missing `ci_provider`
/// discriminant rejects with a validation error before any write.
pub async fn ingest(
    State(state): State<AppState>,
    _auth: WebhookAuth,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<IngestResponse>>, AppError> {
    let event: ScanEvent = serde_json::from_value(payload)
        .map_err(|e| AppError::Validation(format!("Unrecognized scan event: {e}")))?;

    let defaults = ScanDefaults {
        repository_name: state.config.default_repository.clone(),
        branch_name: state.config.default_branch.clone(),
    };

    let result = ingestion::ingest(&state.db, event, &defaults).await?;
    Ok(ApiResponse::success(result))
}
