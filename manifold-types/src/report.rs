use crate::validation::{ValidationResult, ValidationSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one generate run, written as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifoldReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub verdict: ReportVerdict,

    #[serde(default)]
    pub findings: Vec<ValidationResult>,

    #[serde(default)]
    pub platforms: Vec<PlatformRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub id: Uuid,
    pub started_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportVerdict {
    pub status: ReportStatus,
    pub counts: ValidationSummary,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pass,
    Warn,
    Fail,
}

/// What happened to one requested platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub platform: String,
    pub format: String,
    pub status: PlatformStatus,

    /// Artifact path relative to the app directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    Converted,
    Failed,
    Skipped,
}

/// Reason tokens used in `verdict.reasons`.
pub mod reason_tokens {
    pub const INVALID_MANIFEST: &str = "invalid_manifest";
    pub const PLATFORM_FAILED: &str = "platform_failed";
    pub const ADVISORY_FINDINGS: &str = "advisory_findings";
}

impl ManifoldReport {
    pub fn new(tool: ToolInfo, run: RunInfo, verdict: ReportVerdict) -> Self {
        Self {
            schema: crate::schema::MANIFOLD_REPORT_V1.to_string(),
            tool,
            run,
            verdict,
            findings: Vec::new(),
            platforms: Vec::new(),
            data: None,
        }
    }
}
