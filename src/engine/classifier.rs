// ==========================================
// NTC Validation Decision Engine - timestamp classifier
// ==========================================
// Responsibility: pure presence predicates over one raw timestamp
// record, and the exclusive five-way scenario classification.
// No state, no side effects, no I/O.
// ==========================================

use crate::domain::ttc_document::{Quantity, RawTimestampRecord};
use std::fmt;

// ==========================================
// ScenarioClassification
// ==========================================

/// Exclusive classification of one record: exactly one variant holds
/// for a given record at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioClassification {
    FullImport,
    FullExport,
    ExportCorner,
    /// None of the three primary indicators is present.
    NonePresent,
    /// At least two of the three primary indicators are present.
    Contradictory,
}

impl fmt::Display for ScenarioClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioClassification::FullImport => write!(f, "FULL_IMPORT"),
            ScenarioClassification::FullExport => write!(f, "FULL_EXPORT"),
            ScenarioClassification::ExportCorner => write!(f, "EXPORT_CORNER"),
            ScenarioClassification::NonePresent => write!(f, "NONE_PRESENT"),
            ScenarioClassification::Contradictory => write!(f, "CONTRADICTORY"),
        }
    }
}

// ==========================================
// TimestampClassifier - pure predicates
// ==========================================

pub struct TimestampClassifier;

impl TimestampClassifier {
    /// A quantity is present iff both its container and its value exist.
    fn is_present(quantity: &Option<Quantity>) -> bool {
        matches!(quantity, Some(Quantity { value: Some(_) }))
    }

    fn value_of(quantity: &Option<Quantity>) -> Option<f64> {
        quantity.as_ref().and_then(|q| q.value)
    }

    // ===== presence predicates, one per quantity =====

    pub fn has_full_import_target(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.full_import_target)
    }

    pub fn has_full_import_base(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.full_import_base)
    }

    pub fn has_full_export_target(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.full_export_target)
    }

    pub fn has_export_corner_target(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.export_corner_target)
    }

    pub fn has_export_corner_base(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.export_corner_base)
    }

    pub fn has_antc(record: &RawTimestampRecord) -> bool {
        Self::is_present(&record.antc)
    }

    // ===== value accessors =====

    pub fn full_import_target_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.full_import_target)
    }

    pub fn full_import_base_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.full_import_base)
    }

    pub fn full_export_target_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.full_export_target)
    }

    pub fn export_corner_target_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.export_corner_target)
    }

    pub fn export_corner_base_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.export_corner_base)
    }

    pub fn antc_value(record: &RawTimestampRecord) -> Option<f64> {
        Self::value_of(&record.antc)
    }

    // ===== composite predicates =====

    /// True iff none of the three primary indicators is present.
    pub fn none_present(record: &RawTimestampRecord) -> bool {
        !Self::has_full_import_target(record)
            && !Self::has_full_export_target(record)
            && !Self::has_export_corner_target(record)
    }

    /// True iff at least two of the three primary indicators are
    /// simultaneously present, any pairwise combination.
    pub fn contradictory(record: &RawTimestampRecord) -> bool {
        let present = [
            Self::has_full_import_target(record),
            Self::has_full_export_target(record),
            Self::has_export_corner_target(record),
        ];
        present.iter().filter(|p| **p).count() >= 2
    }

    pub fn has_shifting_factors(record: &RawTimestampRecord) -> bool {
        record
            .shifting_factors
            .as_ref()
            .is_some_and(|factors| !factors.is_empty())
    }

    pub fn has_calculation_directions(record: &RawTimestampRecord) -> bool {
        record
            .calculation_directions
            .as_ref()
            .is_some_and(|directions| !directions.is_empty())
    }

    /// Exclusive five-way classification.
    pub fn classify(record: &RawTimestampRecord) -> ScenarioClassification {
        if Self::contradictory(record) {
            ScenarioClassification::Contradictory
        } else if Self::has_full_import_target(record) {
            ScenarioClassification::FullImport
        } else if Self::has_full_export_target(record) {
            ScenarioClassification::FullExport
        } else if Self::has_export_corner_target(record) {
            ScenarioClassification::ExportCorner
        } else {
            ScenarioClassification::NonePresent
        }
    }
}
