//! Metrics routes: rolling overview and daily trends.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::metrics::DailyMetrics;
use crate::services::aggregate::{self, SecurityOverview};
use crate::AppState;

const DEFAULT_TREND_DAYS: i32 = 30;
const MAX_TREND_DAYS: i32 = 365;

/// GET /api/v1/security/metrics — rolling 24-hour overview.
pub async fn overview(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SecurityOverview>>, AppError> {
    let stats = aggregate::overview(&state.db).await?;
    Ok(ApiResponse::success(stats))
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub days: Option<i32>,
}

impl TrendsQuery {
    fn days(&self) -> i32 {
        self.days.unwrap_or(DEFAULT_TREND_DAYS).clamp(1, MAX_TREND_DAYS)
    }
}

/// GET /api/v1/security/trends — daily metrics for the trailing window.
pub async fn trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<Vec<DailyMetrics>>>, AppError> {
    let rows = aggregate::trends(&state.db, query.days()).await?;
    Ok(ApiResponse::success(rows))
}
