// ==========================================
// NTC Validation Decision Engine - engine layer
// ==========================================
// Business rules only. Every rejection carries an explicit reason;
// the engines never talk to the wire directly.
// ==========================================

pub mod bounds;
pub mod classifier;
pub mod export_corner;
pub mod full_import;
pub mod handler;
pub mod router;
pub mod search;
pub mod split_factors;
pub mod synthesizer;

// Re-export core engines
pub use bounds::BoundCalculator;
pub use classifier::{ScenarioClassification, TimestampClassifier};
pub use export_corner::ExportCornerService;
pub use full_import::FullImportService;
pub use handler::ValidationHandler;
pub use router::ScenarioDecisionRouter;
pub use search::{CapacitySearchOrchestrator, SearchStepValidator};
pub use split_factors::SplitFactorCalculator;
pub use synthesizer::{LimitingElementExtractor, ResultSynthesizer};
