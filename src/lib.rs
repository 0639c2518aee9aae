// ==========================================
// NTC Validation Decision Engine - core library
// ==========================================
// Validates, per scheduling timestamp, whether an announced cross-border
// transfer capacity (NTC/TTC) is physically achievable; if not, searches
// for the maximal achievable value and reports the limiting network
// element.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Engine layer - business rules
pub mod engine;

// External collaborator ports - typed contracts only
pub mod external;

// Configuration layer
pub mod config;

// Error taxonomy
pub mod error;

// Logging
pub mod logging;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain types
pub use domain::{
    CalculationDirection, CapacitySearchBounds, ComputationOutcome, CriticalBranch,
    DirectOutcome, FileResource, LimitingElementReport, OutageElement, ProcessType, Quantity,
    RawTimestampRecord, ResultStatus, Scenario, ShiftingFactor, SplittingFactorMap,
    TimestampResult, TtcAdjustmentDocument, UsedFileRefs, ValidationReport, ValidationRequest,
};

// Engine
pub use engine::{
    BoundCalculator, CapacitySearchOrchestrator, ExportCornerService, FullImportService,
    LimitingElementExtractor, ResultSynthesizer, ScenarioClassification, ScenarioDecisionRouter,
    SplitFactorCalculator, TimestampClassifier, ValidationHandler,
};

// Configuration
pub use config::{AreaConfig, EngineConfig, FixedMessages, ShiftMode};

// Errors
pub use error::{ValidationError, ValidationResult};

// External services bundle
pub use external::ExternalServices;

// ==========================================
// Constants
// ==========================================

// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Engine name
pub const APP_NAME: &str = "NTC Validation Decision Engine";
