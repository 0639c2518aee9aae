// ==========================================
// NTC Validation Decision Engine - domain layer
// ==========================================
// Entities and value types. No business rules, no I/O.
// ==========================================

pub mod outcome;
pub mod report;
pub mod request;
pub mod ttc_document;

pub use outcome::{
    CapacitySearchBounds, ComputationOutcome, DirectOutcome, Scenario, SplittingFactorMap,
};
pub use report::{
    CriticalBranch, LimitingElementReport, OutageElement, ResultStatus, TimestampResult,
    UsedFileRefs, ValidationReport,
};
pub use request::{FileResource, ProcessType, ValidationRequest};
pub use ttc_document::{
    CalculationDirection, Quantity, RawTimestampRecord, ShiftingFactor, TtcAdjustmentDocument,
};
