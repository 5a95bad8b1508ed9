//! Daily metrics aggregate store.
//!
//! The merge is a single conditional insert-or-increment statement, so the
//! store enforces atomicity on the contended per-date row and concurrent
//! ingestions never lose counter updates. The merge itself is additive, not
//! idempotent per scan; the ingestion gateway's dedup gate is what protects
//! the totals from webhook redelivery.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::metrics::{DailyMetrics, MetricsDelta};

/// Merge one scan's contribution into its date row and return the updated
/// aggregate.
///
/// Counter columns accumulate; `average_scan_score` is overwritten by the
/// latest contribution (last write wins), matching the historical reporting
/// contract.
pub async fn merge(
    pool: &PgPool,
    metric_date: NaiveDate,
    delta: &MetricsDelta,
) -> Result<DailyMetrics, AppError> {
    let row = sqlx::query_as::<_, DailyMetrics>(
        r#"
        INSERT INTO daily_metrics (
            metric_date, total_vulnerabilities,
            critical_count, high_count, medium_count, low_count,
            average_scan_score, scans_performed
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, 1)
        ON CONFLICT (metric_date) DO UPDATE SET
            total_vulnerabilities = daily_metrics.total_vulnerabilities + EXCLUDED.total_vulnerabilities,
            critical_count = daily_metrics.critical_count + EXCLUDED.critical_count,
            high_count = daily_metrics.high_count + EXCLUDED.high_count,
            medium_count = daily_metrics.medium_count + EXCLUDED.medium_count,
            low_count = daily_metrics.low_count + EXCLUDED.low_count,
            average_scan_score = EXCLUDED.average_scan_score,
            scans_performed = daily_metrics.scans_performed + 1
        RETURNING metric_date, total_vulnerabilities,
                  critical_count, high_count, medium_count, low_count,
                  average_scan_score, scans_performed
        "#,
    )
    .bind(metric_date)
    .bind(delta.total)
    .bind(delta.critical)
    .bind(delta.high)
    .bind(delta.medium)
    .bind(delta.low)
    .bind(delta.score as f32)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Daily metric rows for the trailing window, oldest first.
pub async fn trends(pool: &PgPool, days: i32) -> Result<Vec<DailyMetrics>, AppError> {
    let rows = sqlx::query_as::<_, DailyMetrics>(
        r#"
        SELECT metric_date, total_vulnerabilities,
               critical_count, high_count, medium_count, low_count,
               average_scan_score, scans_performed
        FROM daily_metrics
        WHERE metric_date >= CURRENT_DATE - $1
        ORDER BY metric_date ASC
        "#,
    )
    .bind(days)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Rolling 24-hour overview for the dashboard landing page.
#[derive(Debug, Serialize)]
pub struct SecurityOverview {
    pub critical_issues: i64,
    pub high_issues: i64,
    pub medium_issues: i64,
    pub low_issues: i64,
    pub scans_24h: i64,
    pub security_score: f64,
    pub latest_scan: Option<DateTime<Utc>>,
}

/// Compute the rolling 24-hour overview from findings and scans.
pub async fn overview(pool: &PgPool) -> Result<SecurityOverview, AppError> {
    let (findings, scans) = tokio::try_join!(fetch_finding_counts(pool), fetch_scan_stats(pool))?;

    Ok(SecurityOverview {
        critical_issues: findings.critical,
        high_issues: findings.high,
        medium_issues: findings.medium,
        low_issues: findings.low,
        scans_24h: scans.scans_24h,
        security_score: scans.security_score,
        latest_scan: scans.latest_scan,
    })
}

/// Intermediate row for severity conditional aggregation.
#[derive(Debug, sqlx::FromRow)]
struct FindingCountsRow {
    critical: i64,
    high: i64,
    medium: i64,
    low: i64,
}

async fn fetch_finding_counts(pool: &PgPool) -> Result<FindingCountsRow, AppError> {
    // Conditional aggregation in a single query.
    let row = sqlx::query_as::<_, FindingCountsRow>(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN severity = 'CRITICAL' THEN 1 ELSE 0 END), 0) AS critical,
            COALESCE(SUM(CASE WHEN severity = 'HIGH'     THEN 1 ELSE 0 END), 0) AS high,
            COALESCE(SUM(CASE WHEN severity = 'MEDIUM'   THEN 1 ELSE 0 END), 0) AS medium,
            COALESCE(SUM(CASE WHEN severity IN ('LOW', 'INFO') THEN 1 ELSE 0 END), 0) AS low
        FROM scan_findings
        WHERE created_at > NOW() - INTERVAL '24 hours'
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

#[derive(Debug, sqlx::FromRow)]
struct ScanStatsRow {
    scans_24h: i64,
    security_score: f64,
    latest_scan: Option<DateTime<Utc>>,
}

async fn fetch_scan_stats(pool: &PgPool) -> Result<ScanStatsRow, AppError> {
    let row = sqlx::query_as::<_, ScanStatsRow>(
        r#"
        SELECT
            COUNT(*) AS scans_24h,
            COALESCE(AVG(scan_score)::float8, 0) AS security_score,
            MAX(created_at) AS latest_scan
        FROM security_scans
        WHERE created_at > NOW() - INTERVAL '24 hours'
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}
