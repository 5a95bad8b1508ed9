//! Canonical scan record: the immutable-after-creation representation of one
//! security scan event from any CI source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Originating automation system for a scan event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "ci_provider", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CiProvider {
    GithubActions,
    AwsCodepipeline,
    Manual,
}

/// Scan lifecycle status as reported by the source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "scan_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// Severity counts derived once from a findings sequence and frozen on the
/// record. `low` absorbs both LOW and INFO findings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: i32,
    pub high: i32,
    pub medium: i32,
    pub low: i32,
}

/// Persisted scan record. Counts and score are pure functions of the findings
/// sequence, computed at normalization time and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanRecord {
    pub scan_id: String,
    pub repository_name: String,
    pub branch_name: String,
    pub scan_type: String,
    pub ci_provider: CiProvider,
    pub scan_status: ScanStatus,
    pub total_issues: i32,
    pub critical_issues: i32,
    pub high_issues: i32,
    pub medium_issues: i32,
    pub low_issues: i32,
    pub scan_score: i32,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ScanRecord {
    /// The frozen severity counts of this record.
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts {
            critical: self.critical_issues,
            high: self.high_issues,
            medium: self.medium_issues,
            low: self.low_issues,
        }
    }
}

/// Response DTO for scan list views, excluding metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanSummary {
    pub scan_id: String,
    pub repository_name: String,
    pub branch_name: String,
    pub scan_type: String,
    pub ci_provider: CiProvider,
    pub scan_status: ScanStatus,
    pub total_issues: i32,
    pub scan_score: i32,
    pub created_at: DateTime<Utc>,
}
