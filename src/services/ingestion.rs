//! Ingestion gateway orchestrating normalize, score, persist, and aggregate.
//!
//! Ordering matters for the failure contract: the scan and its findings are
//! persisted before the daily metrics merge, and a merge failure surfaces as
//! `AggregateMergeFailed` so a caller can re-drive only the aggregate step
//! without re-ingesting findings.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::event::ScanEvent;
use crate::models::metrics::MetricsDelta;
use crate::services::normalizer::{self, NormalizedScan, ScanDefaults};
use crate::services::{aggregate, scan};

/// Outcome of one ingestion call.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub scan_id: String,
    pub scan_score: i32,
    pub duplicate: bool,
    pub message: String,
}

/// Run the full ingestion pipeline for one authenticated scan event.
///
/// Per successful non-duplicate call: exactly one scan insert, zero or more
/// finding inserts, exactly one daily metrics merge. A redelivered `scan_id`
/// returns the prior result without touching the aggregate.
pub async fn ingest(
    pool: &PgPool,
    event: ScanEvent,
    defaults: &ScanDefaults,
) -> Result<IngestResponse, AppError> {
    let NormalizedScan { record, findings } = normalizer::normalize(event, defaults, Utc::now());

    let inserted = scan::insert_scan(pool, &record).await?;
    if !inserted {
        let existing = scan::find_existing(pool, &record.scan_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Scan '{}' hit the dedup gate but was not found",
                record.scan_id
            ))
        })?;
        tracing::info!(scan_id = %existing.scan_id, "Duplicate delivery ignored");
        return Ok(IngestResponse {
            success: true,
            scan_id: existing.scan_id,
            scan_score: existing.scan_score,
            duplicate: true,
            message: "Scan already ingested; returning prior result".to_string(),
        });
    }

    scan::insert_findings(pool, &record, &findings).await?;

    let delta = MetricsDelta::from(&record);
    aggregate::merge(pool, record.created_at.date_naive(), &delta)
        .await
        .map_err(|e| AppError::AggregateMergeFailed(e.to_string()))?;

    tracing::info!(
        scan_id = %record.scan_id,
        ci_provider = ?record.ci_provider,
        total_issues = record.total_issues,
        scan_score = record.scan_score,
        "Scan ingested"
    );

    Ok(IngestResponse {
        success: true,
        scan_id: record.scan_id,
        scan_score: record.scan_score,
        duplicate: false,
        message: "Scan results stored successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_response_serialization() {
        let response = IngestResponse {
            success: true,
            scan_id: "scan_42".to_string(),
            scan_score: 80,
            duplicate: false,
            message: "Scan results stored successfully".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["scan_id"], "scan_42");
        assert_eq!(json["scan_score"], 80);
        assert_eq!(json["duplicate"], false);
    }
}
