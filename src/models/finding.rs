//! Finding model: one detected security issue with severity and location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// -- Enums matching PostgreSQL --

/// Normalized severity. Ordinal: CRITICAL > HIGH > MEDIUM > LOW > INFO.
///
/// Input is case-insensitive; unrecognized values normalize to `Info` so a
/// scanner emitting a vendor-specific level never fails the whole submission.
#[derive(Debug, Clone, Copy, Serialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "severity_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Parse a raw severity string case-insensitively. Unknown values map to `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "CRITICAL" => Self::Critical,
            "HIGH" => Self::High,
            "MEDIUM" => Self::Medium,
            "LOW" => Self::Low,
            _ => Self::Info,
        }
    }

    /// Canonical wire label for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Info => "INFO",
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Finding lifecycle status. New findings are always `Open`; transitions to
/// `Resolved`/`Suppressed` belong to a separate triage workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "finding_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingStatus {
    Open,
    Resolved,
    Suppressed,
}

// -- Core Finding --

/// Persisted finding row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Finding {
    pub id: Uuid,
    pub scan_id: String,
    pub finding_id: String,
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub file_path: Option<String>,
    pub line_number: Option<i32>,
    pub cwe_id: Option<String>,
    pub cvss_score: Option<f32>,
    pub status: FindingStatus,
    pub created_at: DateTime<Utc>,
}

/// Normalized finding ready for insertion, before a row id exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFinding {
    pub finding_id: String,
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    pub file_path: Option<String>,
    pub line_number: Option<i32>,
    pub cwe_id: Option<String>,
    pub cvss_score: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("critical"), Severity::Critical);
        assert_eq!(Severity::parse("Critical"), Severity::Critical);
        assert_eq!(Severity::parse("HIGH"), Severity::High);
        assert_eq!(Severity::parse("medium"), Severity::Medium);
        assert_eq!(Severity::parse("low"), Severity::Low);
        assert_eq!(Severity::parse("info"), Severity::Info);
    }

    #[test]
    fn severity_unknown_values_map_to_info() {
        assert_eq!(Severity::parse("MODERATE"), Severity::Info);
        assert_eq!(Severity::parse("blocker"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
    }

    #[test]
    fn severity_deserializes_case_insensitively() {
        let sev: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(sev, Severity::Critical);

        let sev: Severity = serde_json::from_str("\"WHATEVER\"").unwrap();
        assert_eq!(sev, Severity::Info);
    }

    #[test]
    fn severity_serializes_screaming_snake() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        let json = serde_json::to_string(&Severity::Info).unwrap();
        assert_eq!(json, "\"INFO\"");
    }

    #[test]
    fn severity_as_str_matches_wire_labels() {
        for sev in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
            Severity::Info,
        ] {
            assert_eq!(Severity::parse(sev.as_str()), sev);
        }
    }

    #[test]
    fn finding_status_serialization() {
        let json = serde_json::to_string(&FindingStatus::Open).unwrap();
        assert_eq!(json, "\"OPEN\"");
        let status: FindingStatus = serde_json::from_str("\"SUPPRESSED\"").unwrap();
        assert_eq!(status, FindingStatus::Suppressed);
    }
}
