//! Deterministic identifier generation for scans and findings.
//!
//! Every generated id is a pure function of the event content, so an
//! at-least-once webhook redelivery produces the same ids and lands on the
//! dedup gate instead of double-counting.

use sha2::{Digest, Sha256};

use crate::models::event::FindingInput;

/// Hex digest length used in generated ids.
const DIGEST_PREFIX_LEN: usize = 16;

/// Scan id for a GitHub Actions workflow run. Run ids are already unique and
/// stable across redelivery.
pub fn scan_id_for_run(run_id: i64) -> String {
    format!("scan_{run_id}")
}

/// Scan id for an AWS CodePipeline execution. The execution id is stable
/// across redelivery, unlike an ingestion timestamp.
pub fn scan_id_for_pipeline(pipeline: &str, execution_id: &str) -> String {
    format!("scan_{pipeline}_{execution_id}")
}

/// Scan id for a direct submission that did not supply one: a content digest
/// over the normalized inputs.
pub fn scan_id_for_submission(
    repository: &str,
    branch: &str,
    scan_type: &str,
    findings: &[FindingInput],
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(repository.as_bytes());
    hasher.update(b"\0");
    hasher.update(branch.as_bytes());
    hasher.update(b"\0");
    hasher.update(scan_type.as_bytes());
    for finding in findings {
        hasher.update(b"\0");
        hasher.update(finding.title.as_bytes());
        hasher.update(b"\0");
        hasher.update(finding.severity.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(finding.file_path.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"\0");
        hasher.update(
            finding
                .line_number
                .map(|n| n.to_string())
                .unwrap_or_default()
                .as_bytes(),
        );
    }
    let digest = hex::encode(hasher.finalize());
    format!("scan_{}", &digest[..DIGEST_PREFIX_LEN])
}

/// Finding id for an itemized finding that did not supply one, derived from
/// its position and title within the parent scan.
pub fn finding_id(scan_id: &str, index: usize, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scan_id.as_bytes());
    hasher.update(b"\0");
    hasher.update(index.to_string().as_bytes());
    hasher.update(b"\0");
    hasher.update(title.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("vuln_{}", &digest[..DIGEST_PREFIX_LEN])
}
