// ==========================================
// NTC Validation Decision Engine - validation request
// ==========================================
// Created by the message-intake collaborator; consumed read-only by
// the core. Immutable once constructed.
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// ProcessType - capacity calculation process variant
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    /// Two-days-ahead capacity calculation.
    D2cc,
    /// Intraday capacity calculation.
    Idcc,
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessType::D2cc => write!(f, "D2CC"),
            ProcessType::Idcc => write!(f, "IDCC"),
        }
    }
}

// ==========================================
// FileResource - filename + URL reference
// ==========================================

/// Reference to one input artifact held by the artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResource {
    pub filename: String,
    pub url: String,
}

impl FileResource {
    pub fn new(filename: &str, url: &str) -> Self {
        Self {
            filename: filename.to_string(),
            url: url.to_string(),
        }
    }
}

// ==========================================
// ValidationRequest - one validation run
// ==========================================

/// One validation run over one target timestamp.
///
/// The five file references point at the TTC-adjustment document, the
/// import and export CRACs, the common grid model (CGM) and the GLSK
/// file. Any of them may be absent; the scenario services decide which
/// absences are fatal for which scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub id: String,
    pub run_id: Uuid,
    pub process_type: ProcessType,
    pub timestamp: DateTime<Utc>,
    /// Distinct adjustment time, when the TTC-adjustment record is keyed
    /// on a different instant than the target timestamp.
    pub adjustment_time: Option<DateTime<Utc>>,
    pub ttc_adjustment: Option<FileResource>,
    pub import_crac: Option<FileResource>,
    pub export_crac: Option<FileResource>,
    pub cgm: Option<FileResource>,
    pub glsk: Option<FileResource>,
}

impl ValidationRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        run_id: Uuid,
        process_type: ProcessType,
        timestamp: DateTime<Utc>,
        adjustment_time: Option<DateTime<Utc>>,
        ttc_adjustment: Option<FileResource>,
        import_crac: Option<FileResource>,
        export_crac: Option<FileResource>,
        cgm: Option<FileResource>,
        glsk: Option<FileResource>,
    ) -> Self {
        Self {
            id: id.to_string(),
            run_id,
            process_type,
            timestamp,
            adjustment_time,
            ttc_adjustment,
            import_crac,
            export_crac,
            cgm,
            glsk,
        }
    }

    /// Instant used to look up the TTC-adjustment record.
    pub fn lookup_time(&self) -> DateTime<Utc> {
        self.adjustment_time.unwrap_or(self.timestamp)
    }
}
