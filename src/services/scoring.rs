//! Scan risk scoring: a simple, auditable deduction model.
//!
//! The score starts at 100 and loses a fixed amount per finding by severity.
//! Low and info findings never affect the score. Deliberately not a CVSS
//! aggregate; the weights are part of the reporting contract.

use crate::models::finding::{NewFinding, Severity};
use crate::models::scan::SeverityCounts;

/// Deduction per critical finding.
const CRITICAL_WEIGHT: i32 = 10;
/// Deduction per high finding.
const HIGH_WEIGHT: i32 = 5;
/// Deduction per medium finding.
const MEDIUM_WEIGHT: i32 = 2;

/// Tally severity counts for a findings sequence.
///
/// The `low` bucket absorbs both LOW and INFO findings; both count toward the
/// total but neither affects the score.
pub fn count_severities(findings: &[NewFinding]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for finding in findings {
        match finding.severity {
            Severity::Critical => counts.critical += 1,
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low | Severity::Info => counts.low += 1,
        }
    }
    counts
}

/// Compute the 0-100 scan score from severity counts.
pub fn score(counts: &SeverityCounts) -> i32 {
    let deduction = counts.critical * CRITICAL_WEIGHT
        + counts.high * HIGH_WEIGHT
        + counts.medium * MEDIUM_WEIGHT;
    (100 - deduction).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(critical: i32, high: i32, medium: i32, low: i32) -> SeverityCounts {
        SeverityCounts {
            critical,
            high,
            medium,
            low,
        }
    }

    fn finding(severity: Severity) -> NewFinding {
        NewFinding {
            finding_id: "f".to_string(),
            title: "t".to_string(),
            description: None,
            severity,
            file_path: None,
            line_number: None,
            cwe_id: None,
            cvss_score: None,
        }
    }

    #[test]
    fn clean_scan_scores_100() {
        assert_eq!(score(&counts(0, 0, 0, 0)), 100);
    }

    #[test]
    fn one_critical_two_high_scores_80() {
        // 100 - (1*10 + 2*5) = 80
        assert_eq!(score(&counts(1, 2, 0, 0)), 80);
    }

    #[test]
    fn score_floors_at_zero() {
        assert_eq!(score(&counts(20, 0, 0, 0)), 0);
        assert_eq!(score(&counts(9, 3, 0, 0)), 0);
    }

    #[test]
    fn low_findings_do_not_affect_score() {
        assert_eq!(score(&counts(0, 0, 0, 500)), 100);
        assert_eq!(score(&counts(1, 0, 0, 500)), score(&counts(1, 0, 0, 0)));
    }

    #[test]
    fn formula_holds_for_arbitrary_counts() {
        for critical in 0..12 {
            for high in 0..12 {
                for medium in 0..12 {
                    let expected = (100 - (critical * 10 + high * 5 + medium * 2)).max(0);
                    assert_eq!(score(&counts(critical, high, medium, 7)), expected);
                }
            }
        }
    }

    #[test]
    fn count_severities_buckets_low_and_info_together() {
        let findings = vec![
            finding(Severity::Critical),
            finding(Severity::High),
            finding(Severity::High),
            finding(Severity::Medium),
            finding(Severity::Low),
            finding(Severity::Info),
        ];
        let c = count_severities(&findings);
        assert_eq!(c.critical, 1);
        assert_eq!(c.high, 2);
        assert_eq!(c.medium, 1);
        assert_eq!(c.low, 2);
    }

    #[test]
    fn counting_is_reproducible() {
        let findings = vec![finding(Severity::Critical), finding(Severity::High)];
        assert_eq!(count_severities(&findings), count_severities(&findings));
    }
}
