//! Event normalization: one canonical scan record per source event shape.
//!
//! Provider webhook events (GitHub Actions, AWS CodePipeline) report only
//! run-level pass/fail and normalize to a zero-finding record; direct tool
//! submissions carry itemized findings. Counts and score are computed here
//! once and frozen on the record.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::models::event::{
    AwsPipelineEvent, FindingInput, GithubActionsEvent, RawFindingSubmission, ScanEvent,
};
use crate::models::finding::NewFinding;
use crate::models::scan::{CiProvider, ScanRecord, ScanStatus, SeverityCounts};
use crate::services::{identifier, scoring};

/// Fallbacks applied when a source event omits repository or branch.
#[derive(Debug, Clone)]
pub struct ScanDefaults {
    pub repository_name: String,
    pub branch_name: String,
}

/// A canonical record plus its normalized findings, ready for persistence.
#[derive(Debug, Clone)]
pub struct NormalizedScan {
    pub record: ScanRecord,
    pub findings: Vec<NewFinding>,
}

/// Normalize a source event into a canonical scan record.
pub fn normalize(event: ScanEvent, defaults: &ScanDefaults, now: DateTime<Utc>) -> NormalizedScan {
    match event {
        ScanEvent::GithubActions(gh) => normalize_github(gh, defaults, now),
        ScanEvent::AwsCodepipeline(aws) => normalize_aws(aws, defaults, now),
        ScanEvent::Manual(sub) => normalize_submission(sub, defaults, now),
    }
}

fn normalize_github(
    event: GithubActionsEvent,
    defaults: &ScanDefaults,
    now: DateTime<Utc>,
) -> NormalizedScan {
    let run = event.workflow_run;
    let scan_status = if run.conclusion.as_deref() == Some("success") {
        ScanStatus::Completed
    } else {
        ScanStatus::Failed
    };

    let counts = SeverityCounts::default();
    let record = ScanRecord {
        scan_id: identifier::scan_id_for_run(run.id),
        repository_name: event
            .repository
            .map(|r| r.name)
            .unwrap_or_else(|| defaults.repository_name.clone()),
        branch_name: run
            .head_branch
            .unwrap_or_else(|| defaults.branch_name.clone()),
        scan_type: "GITHUB_ACTIONS_SECURITY".to_string(),
        ci_provider: CiProvider::GithubActions,
        scan_status,
        total_issues: 0,
        critical_issues: counts.critical,
        high_issues: counts.high,
        medium_issues: counts.medium,
        low_issues: counts.low,
        scan_score: scoring::score(&counts),
        metadata: json!({
            "workflow_id": run.id,
            "head_sha": run.head_sha,
            "run_number": run.run_number,
            "created_at": run.created_at,
            "updated_at": run.updated_at,
        }),
        created_at: now,
    };

    NormalizedScan {
        record,
        findings: Vec::new(),
    }
}

fn normalize_aws(
    event: AwsPipelineEvent,
    defaults: &ScanDefaults,
    now: DateTime<Utc>,
) -> NormalizedScan {
    let detail = event.detail;
    let scan_status = if detail.state == "SUCCEEDED" {
        ScanStatus::Completed
    } else {
        ScanStatus::Failed
    };

    let counts = SeverityCounts::default();
    let record = ScanRecord {
        scan_id: identifier::scan_id_for_pipeline(&detail.pipeline, &detail.execution_id),
        repository_name: defaults.repository_name.clone(),
        branch_name: defaults.branch_name.clone(),
        scan_type: "AWS_CODEPIPELINE_SECURITY".to_string(),
        ci_provider: CiProvider::AwsCodepipeline,
        scan_status,
        total_issues: 0,
        critical_issues: counts.critical,
        high_issues: counts.high,
        medium_issues: counts.medium,
        low_issues: counts.low,
        scan_score: scoring::score(&counts),
        metadata: json!({
            "pipeline": detail.pipeline,
            "execution_id": detail.execution_id,
            "state": detail.state,
            "timestamp": now.to_rfc3339(),
        }),
        created_at: now,
    };

    NormalizedScan {
        record,
        findings: Vec::new(),
    }
}

fn normalize_submission(
    submission: RawFindingSubmission,
    defaults: &ScanDefaults,
    now: DateTime<Utc>,
) -> NormalizedScan {
    let repository_name = submission
        .repository_name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| defaults.repository_name.clone());
    let branch_name = submission
        .branch_name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| defaults.branch_name.clone());
    let scan_type = submission
        .scan_type
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "COMPREHENSIVE".to_string());

    let scan_id = submission.scan_id.filter(|s| !s.is_empty()).unwrap_or_else(|| {
        identifier::scan_id_for_submission(
            &repository_name,
            &branch_name,
            &scan_type,
            &submission.findings,
        )
    });

    let findings: Vec<NewFinding> = submission
        .findings
        .iter()
        .enumerate()
        .map(|(index, input)| normalize_finding(&scan_id, index, input))
        .collect();

    let counts = scoring::count_severities(&findings);
    let record = ScanRecord {
        scan_id,
        repository_name,
        branch_name,
        scan_type,
        ci_provider: CiProvider::Manual,
        scan_status: submission.status.unwrap_or(ScanStatus::Completed),
        total_issues: findings.len() as i32,
        critical_issues: counts.critical,
        high_issues: counts.high,
        medium_issues: counts.medium,
        low_issues: counts.low,
        scan_score: scoring::score(&counts),
        metadata: submission.metadata.unwrap_or_else(|| json!({})),
        created_at: now,
    };

    NormalizedScan { record, findings }
}

fn normalize_finding(scan_id: &str, index: usize, input: &FindingInput) -> NewFinding {
    NewFinding {
        finding_id: input
            .finding_id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| identifier::finding_id(scan_id, index, &input.title)),
        title: input.title.clone(),
        description: input.description.clone(),
        severity: input.severity,
        file_path: input.file_path.clone(),
        line_number: input.line_number,
        cwe_id: input.cwe_id.clone(),
        cvss_score: input.cvss_score,
    }
}
