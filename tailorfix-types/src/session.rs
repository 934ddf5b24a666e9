use crate::suggestion::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report artifact for one batch session: which suggestions were applied,
/// rejected, or left pending, and the resume fingerprints before and after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_sha256_after: Option<String>,

    #[serde(default)]
    pub results: Vec<SuggestionResult>,

    pub summary: SessionSummary,
}

impl SessionReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::TAILORFIX_SESSION_V1.to_string(),
            tool,
            run: RunInfo::default(),
            resume_sha256_before: None,
            resume_sha256_after: None,
            results: vec![],
            summary: SessionSummary::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Outcome of one suggestion in a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// Deterministic id minted by the session layer.
    pub suggestion_id: String,

    /// Position within the rendered batch. Disambiguates suggestions whose
    /// identity tuples collide.
    pub ordinal: usize,

    pub section: Section,
    pub identity: String,
    pub status: ApplyStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStatus {
    Applied,
    Rejected,
    Blocked,
    NotApplicable,
    Failed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub attempted: u64,
    pub applied: u64,
    pub rejected: u64,
    pub blocked: u64,
    pub not_applicable: u64,
    pub failed: u64,
}
