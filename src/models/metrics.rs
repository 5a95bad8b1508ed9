//! Daily security metrics aggregate, one row per calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::scan::ScanRecord;

/// Running per-date aggregate of severity counts and scan activity.
///
/// Counter fields accumulate across all scans ingested for the date.
/// `average_scan_score` holds the last-written score contribution, not a true
/// running average.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyMetrics {
    pub metric_date: NaiveDate,
    pub total_vulnerabilities: i32,
    pub critical_count: i32,
    pub high_count: i32,
    pub medium_count: i32,
    pub low_count: i32,
    pub average_scan_score: f32,
    pub scans_performed: i32,
}

/// One scan's contribution to the daily aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsDelta {
    pub total: i32,
    pub critical: i32,
    pub high: i32,
    pub medium: i32,
    pub low: i32,
    pub score: i32,
}

impl From<&ScanRecord> for MetricsDelta {
    fn from(record: &ScanRecord) -> Self {
        Self {
            total: record.total_issues,
            critical: record.critical_issues,
            high: record.high_issues,
            medium: record.medium_issues,
            low: record.low_issues,
            score: record.scan_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan::{CiProvider, ScanStatus};
    use chrono::Utc;

    #[test]
    fn delta_from_scan_record() {
        let record = ScanRecord {
            scan_id: "scan_42".to_string(),
            repository_name: "repo".to_string(),
            branch_name: "main".to_string(),
            scan_type: "COMPREHENSIVE".to_string(),
            ci_provider: CiProvider::Manual,
            scan_status: ScanStatus::Completed,
            total_issues: 3,
            critical_issues: 1,
            high_issues: 2,
            medium_issues: 0,
            low_issues: 0,
            scan_score: 80,
            metadata: serde_json::json!({}),
            created_at: Utc::now(),
        };

        let delta = MetricsDelta::from(&record);
        assert_eq!(delta.total, 3);
        assert_eq!(delta.critical, 1);
        assert_eq!(delta.high, 2);
        assert_eq!(delta.medium, 0);
        assert_eq!(delta.low, 0);
        assert_eq!(delta.score, 80);
    }
}
