// ==========================================
// NTC Validation Decision Engine - TTC adjustment document
// ==========================================
// One record per scheduling timestamp, produced by the external
// marshalling collaborator. The engine reads every field and writes
// only the result slot, through the Result Synthesizer.
// ==========================================

use crate::domain::report::TimestampResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Quantity - container/value split of the wire format
// ==========================================

/// Numeric quantity as it appears on the wire: the container element and
/// the value inside it are independently optional. A quantity counts as
/// "present" only when both exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Option<f64>,
}

impl Quantity {
    pub fn of(value: f64) -> Self {
        Self { value: Some(value) }
    }

    /// Container present, value absent.
    pub fn empty() -> Self {
        Self { value: None }
    }
}

// ==========================================
// ShiftingFactor / CalculationDirection
// ==========================================

/// Per-area proportional share of a capacity correction, as announced
/// in the TTC-adjustment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftingFactor {
    pub area_eic: String,
    pub factor: f64,
}

impl ShiftingFactor {
    pub fn new(area_eic: &str, factor: f64) -> Self {
        Self {
            area_eic: area_eic.to_string(),
            factor,
        }
    }
}

/// Announced flow direction: `in_area_eic` imports from `out_area_eic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDirection {
    pub in_area_eic: String,
    pub out_area_eic: String,
}

impl CalculationDirection {
    pub fn new(in_area_eic: &str, out_area_eic: &str) -> Self {
        Self {
            in_area_eic: in_area_eic.to_string(),
            out_area_eic: out_area_eic.to_string(),
        }
    }
}

// ==========================================
// RawTimestampRecord - one TTC-adjustment entry
// ==========================================

/// One entry of the TTC-adjustment document.
///
/// Carries up to six independent optional quantities, the optional
/// shifting-factor and calculation-direction collections, and the result
/// slot filled by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimestampRecord {
    /// Scheduling timestamp of the record.
    pub time: DateTime<Utc>,
    /// Adjustment (reference calculation) time of the record.
    pub reference_calculation_time: DateTime<Utc>,
    /// Full-import target capacity.
    pub full_import_target: Option<Quantity>,
    /// Full-import base capacity.
    pub full_import_base: Option<Quantity>,
    /// Full-export target capacity.
    pub full_export_target: Option<Quantity>,
    /// Export-corner target capacity.
    pub export_corner_target: Option<Quantity>,
    /// Export-corner base capacity.
    pub export_corner_base: Option<Quantity>,
    /// Final allocated transfer capacity.
    pub antc: Option<Quantity>,
    pub shifting_factors: Option<Vec<ShiftingFactor>>,
    pub calculation_directions: Option<Vec<CalculationDirection>>,
    /// Result slot, written only through the Result Synthesizer.
    pub result: Option<TimestampResult>,
}

impl RawTimestampRecord {
    /// Empty record for the given (time, adjustment time) pair.
    pub fn empty(time: DateTime<Utc>, reference_calculation_time: DateTime<Utc>) -> Self {
        Self {
            time,
            reference_calculation_time,
            full_import_target: None,
            full_import_base: None,
            full_export_target: None,
            export_corner_target: None,
            export_corner_base: None,
            antc: None,
            shifting_factors: None,
            calculation_directions: None,
            result: None,
        }
    }
}

// ==========================================
// TtcAdjustmentDocument
// ==========================================

/// Parsed TTC-adjustment document. The engine receives it already
/// unmarshalled, or not at all when the fetch/parse failed upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtcAdjustmentDocument {
    pub records: Vec<RawTimestampRecord>,
}

impl TtcAdjustmentDocument {
    pub fn new(records: Vec<RawTimestampRecord>) -> Self {
        Self { records }
    }

    /// Index of the record matching the (target timestamp, adjustment
    /// time) pair, if any.
    pub fn position_for(
        &self,
        target: DateTime<Utc>,
        adjustment_time: DateTime<Utc>,
    ) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.time == target && r.reference_calculation_time == adjustment_time)
    }
}
