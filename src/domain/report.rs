// ==========================================
// NTC Validation Decision Engine - report types
// ==========================================
// Result-slot and report-entry types written by the Result Synthesizer
// and published by the dispatch collaborator.
// ==========================================

use crate::domain::outcome::Scenario;
use crate::domain::request::FileResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// ResultStatus
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Computed,
    Rejected,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Computed => write!(f, "COMPUTED"),
            ResultStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ==========================================
// UsedFileRefs - files consumed by a search path
// ==========================================

/// File references echoed into the report when a search path was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedFileRefs {
    pub cgm: FileResource,
    pub glsk: FileResource,
    pub import_crac: FileResource,
    pub export_crac: Option<FileResource>,
}

// ==========================================
// Limiting element
// ==========================================

/// One declared element of an outage (contingency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutageElement {
    pub name: String,
    pub from_area: String,
    pub to_area: String,
}

/// The network branch with the worst post-optimization margin, together
/// with the outage it is monitored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalBranch {
    pub name: String,
    pub from_area: String,
    pub to_area: String,
    pub outage_name: Option<String>,
    pub outage_elements: Vec<OutageElement>,
    /// Post-optimization margin of the branch, in MW.
    pub margin: f64,
}

/// Limiting-element section of a report entry. Always present; carries
/// zero branches when no monitored constraint qualified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitingElementReport {
    pub branches: Vec<CriticalBranch>,
}

impl LimitingElementReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

// ==========================================
// TimestampResult - the record's result slot
// ==========================================

/// Structured validation result for one timestamp. Written whole into
/// the record's result slot; never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampResult {
    pub status: ResultStatus,
    pub scenario: Option<Scenario>,
    /// Numeric result matching the scenario (full-import, full-export
    /// or export-corner value). Absent on rejections and on the
    /// no-adjustment-needed path.
    pub value: Option<f64>,
    /// Rejection reason. Present iff status is REJECTED.
    pub red_flag_reason: Option<String>,
    /// Informational note on direct results without a numeric payload.
    pub note: Option<String>,
    pub limiting_element: LimitingElementReport,
    pub used_files: Option<UsedFileRefs>,
}

// ==========================================
// ValidationReport - per-request output
// ==========================================

/// Run summary returned to the dispatch collaborator, alongside the
/// mutation of the record's result slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub request_id: String,
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub entry: TimestampResult,
}
