// ==========================================
// NTC Validation Decision Engine - computation outcome
// ==========================================
// Tagged variant produced once per timestamp by the decision router /
// search orchestrator and consumed exactly once by the Result
// Synthesizer, which is the only component allowed to mutate the
// record's result slot.
// ==========================================

use crate::domain::report::{LimitingElementReport, UsedFileRefs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// Scenario
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    FullImport,
    FullExport,
    ExportCorner,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::FullImport => write!(f, "FULL_IMPORT"),
            Scenario::FullExport => write!(f, "FULL_EXPORT"),
            Scenario::ExportCorner => write!(f, "EXPORT_CORNER"),
        }
    }
}

// ==========================================
// SplittingFactorMap
// ==========================================

/// Area EIC -> signed proportional factor. BTreeMap keeps iteration
/// deterministic for logging and tests.
pub type SplittingFactorMap = BTreeMap<String, f64>;

// ==========================================
// CapacitySearchBounds
// ==========================================

/// Signed interval and resolution handed to the external bisection
/// engine. Invariant: min_value <= max_value under the scenario's sign
/// convention; violations are short-circuited before bounds are built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySearchBounds {
    pub min_value: f64,
    pub max_value: f64,
    pub precision: f64,
}

// ==========================================
// DirectOutcome
// ==========================================

/// Direct result that needed no capacity search.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectOutcome {
    pub scenario: Option<Scenario>,
    pub value: Option<f64>,
    pub note: Option<String>,
    /// Present when a search path was entered before short-circuiting.
    pub used_files: Option<UsedFileRefs>,
}

impl DirectOutcome {
    /// Direct numeric result for a scenario.
    pub fn value(scenario: Scenario, value: f64) -> Self {
        Self {
            scenario: Some(scenario),
            value: Some(value),
            note: None,
            used_files: None,
        }
    }

    /// Message-only result (missing adjustment file, no adjustment needed).
    pub fn message_only(note: &str) -> Self {
        Self {
            scenario: None,
            value: None,
            note: Some(note.to_string()),
            used_files: None,
        }
    }

    pub fn with_files(mut self, used_files: UsedFileRefs) -> Self {
        self.used_files = Some(used_files);
        self
    }
}

// ==========================================
// ComputationOutcome
// ==========================================

/// Outcome of one timestamp validation. Produced once, consumed once.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputationOutcome {
    Direct(DirectOutcome),
    SearchSuccess {
        scenario: Scenario,
        value: f64,
        limiting_element: LimitingElementReport,
        used_files: UsedFileRefs,
    },
    SearchFailure,
    DataError(String),
}
