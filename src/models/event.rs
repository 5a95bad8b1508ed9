//! Inbound scan event shapes, one per CI provider.
//!
//! Dispatch is by the explicit `ci_provider` discriminant field; an
//! unrecognized provider fails decoding rather than being coerced.

use serde::Deserialize;

use super::finding::Severity;
use super::scan::ScanStatus;

/// Tagged union over the three supported event sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "ci_provider")]
pub enum ScanEvent {
    #[serde(rename = "GITHUB_ACTIONS")]
    GithubActions(GithubActionsEvent),
    #[serde(rename = "AWS_CODEPIPELINE")]
    AwsCodepipeline(AwsPipelineEvent),
    #[serde(rename = "MANUAL")]
    Manual(RawFindingSubmission),
}

// -- GitHub Actions --

/// Workflow-run webhook event. Carries only run-level pass/fail, never
/// itemized findings.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubActionsEvent {
    pub workflow_run: WorkflowRun,
    #[serde(default)]
    pub repository: Option<GithubRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub id: i64,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub run_number: Option<i64>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepository {
    pub name: String,
}

// -- AWS CodePipeline --

/// Pipeline state-change event as delivered by EventBridge.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsPipelineEvent {
    pub detail: AwsPipelineDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsPipelineDetail {
    pub pipeline: String,
    #[serde(rename = "execution-id")]
    pub execution_id: String,
    pub state: String,
}

// -- Direct tool submission --

/// Already-itemized findings posted directly by a scan tool wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFindingSubmission {
    #[serde(default)]
    pub scan_id: Option<String>,
    #[serde(default)]
    pub repository_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub scan_type: Option<String>,
    #[serde(default)]
    pub status: Option<ScanStatus>,
    #[serde(default)]
    pub findings: Vec<FindingInput>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// One itemized finding in a direct submission.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingInput {
    #[serde(default, alias = "vulnerability_id")]
    pub finding_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub severity: Severity,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub line_number: Option<i32>,
    #[serde(default)]
    pub cwe_id: Option<String>,
    #[serde(default)]
    pub cvss_score: Option<f32>,
}
