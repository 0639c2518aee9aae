// ==========================================
// NTC Validation Decision Engine - external collaborator ports
// ==========================================
// The core owns no wire protocol and no file format; it issues typed
// calls through these traits and interprets typed results. All calls
// are awaited one at a time; the engine never runs collaborators
// concurrently within a request.
// ==========================================

pub mod ports;

pub use ports::{
    ArtifactStore, CracImporter, CracPort, ExternalError, ExternalServices, FlowCnec,
    GlskImporter, GlskPort, NetworkImporter, NetworkPort, NetworkShifter, OptimizationRequest,
    OptimizationResponse, OptimizationResultPort, OptimizerClient, Outage, ResultImporter,
    ScalablePort, SearchEngine, SearchOutcome, StepArtifacts, StepResult, StepValidator,
};
