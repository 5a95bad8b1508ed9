//! Compliance report route.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::errors::{ApiResponse, AppError};
use crate::services::compliance::{self, ComplianceReport};
use crate::services::scan;
use crate::AppState;

/// GET /api/v1/security/compliance/{scan_id} — compliance report for one scan.
pub async fn report(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> Result<Json<ApiResponse<ComplianceReport>>, AppError> {
    let record = scan::get(&state.db, &scan_id).await?;
    let report = compliance::generate_report(record, Utc::now());
    Ok(ApiResponse::success(report))
}
