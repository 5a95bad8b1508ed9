//! Compliance framework evaluation derived mechanically from scan counts.
//!
//! Framework rules:
//! - HIPAA: PASS iff no critical findings, else FAIL.
//! - SOC2: PASS iff no high findings, else WARNING (advisory, never FAIL).
//! - GDPR: PASS iff no criticals and fewer than 5 highs, else WARNING.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::scan::{ScanRecord, SeverityCounts};

/// Named compliance framework tracked by the reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Framework {
    Hipaa,
    Soc2,
    Gdpr,
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hipaa => write!(f, "HIPAA"),
            Self::Soc2 => write!(f, "SOC2"),
            Self::Gdpr => write!(f, "GDPR"),
        }
    }
}

/// Pass/fail status of one framework check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// One framework's evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceCheck {
    pub framework: Framework,
    pub status: CheckStatus,
    pub details: String,
}

/// Read-only compliance projection for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub timestamp: DateTime<Utc>,
    pub scan_results: ScanRecord,
    pub compliance_checks: Vec<ComplianceCheck>,
    pub recommendations: Vec<String>,
}

/// Evaluate all framework statuses from severity counts. Pure and ordered.
pub fn evaluate(counts: &SeverityCounts) -> Vec<ComplianceCheck> {
    vec![
        ComplianceCheck {
            framework: Framework::Hipaa,
            status: if counts.critical == 0 {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            },
            details: "Protected health information safeguards".to_string(),
        },
        ComplianceCheck {
            framework: Framework::Soc2,
            status: if counts.high == 0 {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            details: "Security and operational controls".to_string(),
        },
        ComplianceCheck {
            framework: Framework::Gdpr,
            status: if counts.critical == 0 && counts.high < 5 {
                CheckStatus::Pass
            } else {
                CheckStatus::Warning
            },
            details: "Data protection regulations compliance".to_string(),
        },
    ]
}

/// Advisory recommendation strings appended to every report.
///
/// The two fixed trailing advisories are kept for continuity with historical
/// reports.
pub fn recommendations(counts: &SeverityCounts) -> Vec<String> {
    let mut recs = Vec::new();
    if counts.critical > 0 {
        recs.push("Address all critical vulnerabilities immediately".to_string());
    }
    if counts.high > 5 {
        recs.push("Review and remediate high-severity findings".to_string());
    }
    recs.push("Enable runtime security monitoring".to_string());
    recs.push("Implement automated remediation workflows".to_string());
    recs
}

/// Build the full compliance report projection for one scan record.
pub fn generate_report(record: ScanRecord, now: DateTime<Utc>) -> ComplianceReport {
    let counts = record.counts();
    ComplianceReport {
        timestamp: now,
        compliance_checks: evaluate(&counts),
        recommendations: recommendations(&counts),
        scan_results: record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan::{CiProvider, ScanStatus};

    fn counts(critical: i32, high: i32) -> SeverityCounts {
        SeverityCounts {
            critical,
            high,
            medium: 0,
            low: 0,
        }
    }

    fn status_of(checks: &[ComplianceCheck], framework: Framework) -> CheckStatus {
        checks
            .iter()
            .find(|c| c.framework == framework)
            .map(|c| c.status)
            .unwrap()
    }

    #[test]
    fn clean_scan_passes_all_frameworks() {
        let checks = evaluate(&counts(0, 0));
        assert_eq!(status_of(&checks, Framework::Hipaa), CheckStatus::Pass);
        assert_eq!(status_of(&checks, Framework::Soc2), CheckStatus::Pass);
        assert_eq!(status_of(&checks, Framework::Gdpr), CheckStatus::Pass);
    }

    #[test]
    fn critical_fails_hipaa_and_warns_gdpr() {
        let checks = evaluate(&counts(1, 0));
        assert_eq!(status_of(&checks, Framework::Hipaa), CheckStatus::Fail);
        assert_eq!(status_of(&checks, Framework::Soc2), CheckStatus::Pass);
        assert_eq!(status_of(&checks, Framework::Gdpr), CheckStatus::Warning);
    }

    #[test]
    fn high_findings_warn_soc2_but_never_fail_it() {
        let checks = evaluate(&counts(0, 50));
        assert_eq!(status_of(&checks, Framework::Soc2), CheckStatus::Warning);
    }

    #[test]
    fn gdpr_high_threshold_is_five() {
        assert_eq!(
            status_of(&evaluate(&counts(0, 4)), Framework::Gdpr),
            CheckStatus::Pass
        );
        assert_eq!(
            status_of(&evaluate(&counts(0, 5)), Framework::Gdpr),
            CheckStatus::Warning
        );
    }

    #[test]
    fn scenario_one_critical_two_high() {
        // counts {critical:1, high:2} -> HIPAA FAIL, SOC2 WARNING, GDPR WARNING
        let checks = evaluate(&counts(1, 2));
        assert_eq!(status_of(&checks, Framework::Hipaa), CheckStatus::Fail);
        assert_eq!(status_of(&checks, Framework::Soc2), CheckStatus::Warning);
        assert_eq!(status_of(&checks, Framework::Gdpr), CheckStatus::Warning);
    }

    #[test]
    fn evaluation_is_pure() {
        let c = counts(2, 7);
        assert_eq!(evaluate(&c), evaluate(&c));
        assert_eq!(recommendations(&c), recommendations(&c));
    }

    #[test]
    fn recommendations_are_conditional_plus_fixed_tail() {
        let clean = recommendations(&counts(0, 0));
        assert_eq!(
            clean,
            vec![
                "Enable runtime security monitoring".to_string(),
                "Implement automated remediation workflows".to_string(),
            ]
        );

        let bad = recommendations(&counts(1, 6));
        assert_eq!(bad.len(), 4);
        assert_eq!(bad[0], "Address all critical vulnerabilities immediately");
        assert_eq!(bad[1], "Review and remediate high-severity findings");
    }

    #[test]
    fn high_advisory_requires_more_than_five() {
        let recs = recommendations(&counts(0, 5));
        assert!(!recs
            .iter()
            .any(|r| r.contains("high-severity")));
        let recs = recommendations(&counts(0, 6));
        assert!(recs.iter().any(|r| r.contains("high-severity")));
    }

    #[test]
    fn report_projection_carries_record_and_checks() {
        let record = ScanRecord {
            scan_id: "scan_9".to_string(),
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
        let now = Utc::now();
        let report = generate_report(record, now);
        assert_eq!(report.timestamp, now);
        assert_eq!(report.scan_results.scan_id, "scan_9");
        assert_eq!(report.compliance_checks.len(), 3);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn framework_serialization() {
        assert_eq!(serde_json::to_string(&Framework::Hipaa).unwrap(), "\"HIPAA\"");
        assert_eq!(
            serde_json::to_string(&CheckStatus::Warning).unwrap(),
            "\"WARNING\""
        );
        assert_eq!(Framework::Soc2.to_string(), "SOC2");
    }
}
