//! Scan and finding persistence against the PostgreSQL store.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::finding::{Finding, NewFinding};
use crate::models::scan::{ScanRecord, ScanSummary};

/// Insert a scan record. Returns `false` when a record with the same
/// `scan_id` already exists.
///
/// The unique constraint makes the duplicate check and the insert one atomic
/// store operation, so two concurrent deliveries of the same scan cannot both
/// pass the gate.
pub async fn insert_scan(pool: &PgPool, record: &ScanRecord) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO security_scans (
            scan_id, repository_name, branch_name, scan_type,
            ci_provider, scan_status,
            total_issues, critical_issues, high_issues, medium_issues, low_issues,
            scan_score, metadata, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (scan_id) DO NOTHING
        "#,
    )
    .bind(&record.scan_id)
    .bind(&record.repository_name)
    .bind(&record.branch_name)
    .bind(&record.scan_type)
    .bind(record.ci_provider)
    .bind(record.scan_status)
    .bind(record.total_issues)
    .bind(record.critical_issues)
    .bind(record.high_issues)
    .bind(record.medium_issues)
    .bind(record.low_issues)
    .bind(record.scan_score)
    .bind(&record.metadata)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Look up a previously ingested scan by id.
pub async fn find_existing(pool: &PgPool, scan_id: &str) -> Result<Option<ScanRecord>, AppError> {
    let record = sqlx::query_as::<_, ScanRecord>(
        "SELECT * FROM security_scans WHERE scan_id = $1",
    )
    .bind(scan_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Get a scan by id, or fail with `NotFound`.
pub async fn get(pool: &PgPool, scan_id: &str) -> Result<ScanRecord, AppError> {
    find_existing(pool, scan_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Scan '{scan_id}' not found")))
}

/// Insert the findings of one scan. New findings are always OPEN.
pub async fn insert_findings(
    pool: &PgPool,
    record: &ScanRecord,
    findings: &[NewFinding],
) -> Result<(), AppError> {
    for finding in findings {
        sqlx::query(
            r#"
            INSERT INTO scan_findings (
                scan_id, finding_id, title, description, severity,
                file_path, line_number, cwe_id, cvss_score, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'OPEN', $10)
            ON CONFLICT (scan_id, finding_id) DO NOTHING
            "#,
        )
        .bind(&record.scan_id)
        .bind(&finding.finding_id)
        .bind(&finding.title)
        .bind(&finding.description)
        .bind(finding.severity)
        .bind(&finding.file_path)
        .bind(finding.line_number)
        .bind(&finding.cwe_id)
        .bind(finding.cvss_score)
        .bind(record.created_at)
        .execute(pool)
        .await?;
    }
    Ok(())
}

/// List the most recent scans, newest first.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ScanSummary>, AppError> {
    let scans = sqlx::query_as::<_, ScanSummary>(
        r#"
        SELECT scan_id, repository_name, branch_name, scan_type,
               ci_provider, scan_status, total_issues, scan_score, created_at
        FROM security_scans
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(scans)
}

/// List open findings, most severe by CVSS first.
pub async fn list_open_findings(pool: &PgPool, limit: i64) -> Result<Vec<Finding>, AppError> {
    let findings = sqlx::query_as::<_, Finding>(
        r#"
        SELECT id, scan_id, finding_id, title, description, severity,
               file_path, line_number, cwe_id, cvss_score, status, created_at
        FROM scan_findings
        WHERE status = 'OPEN'
        ORDER BY cvss_score DESC NULLS LAST, created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(findings)
}
