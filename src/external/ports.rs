// ==========================================
// NTC Validation Decision Engine - collaborator contracts
// ==========================================
// Network import, CRAC import, GLSK import, proportional shifting,
// optimizer invocation, optimizer result import, bisection search and
// artifact storage are consumed as black boxes behind these traits.
// ==========================================

use crate::domain::outcome::{CapacitySearchBounds, SplittingFactorMap};
use crate::domain::report::OutageElement;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// ==========================================
// ExternalError - collaborator failure taxonomy
// ==========================================

/// Failures raised by external collaborators. GlskLimitation and
/// Shifting downgrade to per-timestamp rejections; Rao inside a search
/// step aborts the step; everything else is request-fatal.
#[derive(Error, Debug)]
pub enum ExternalError {
    #[error("GLSK limitation: {0}")]
    GlskLimitation(String),

    #[error("shifting failed: {0}")]
    Shifting(String),

    #[error("optimizer run failed: {0}")]
    Rao(String),

    #[error("network import failed: {0}")]
    NetworkImport(String),

    #[error("CRAC import failed: {0}")]
    CracImport(String),

    #[error("GLSK import failed: {0}")]
    GlskImport(String),

    #[error("optimizer result import failed: {0}")]
    ResultImport(String),

    #[error("artifact store failure: {0}")]
    Storage(String),

    #[error("I/O failure: {0}")]
    Io(String),
}

// ==========================================
// Network
// ==========================================

/// Imported grid model. Mutation happens only through the proportional
/// shifter; the engine otherwise reads flows and exports bytes.
pub trait NetworkPort: Send + Sync {
    /// Internal variant id of this network state, used in artifact paths.
    fn variant_id(&self) -> String;

    /// Signed active-power exchange from `from_eic` towards `to_eic`,
    /// in MW, as computed by the external load flow.
    fn border_exchange(&self, from_eic: &str, to_eic: &str) -> Result<f64, ExternalError>;

    /// Independent working copy for destructive operations.
    fn working_copy(&self) -> Box<dyn NetworkPort>;

    /// Serialized network, ready for artifact upload.
    fn export_bytes(&self) -> Result<Vec<u8>, ExternalError>;
}

#[async_trait]
pub trait NetworkImporter: Send + Sync {
    async fn import_network(&self, url: &str) -> Result<Box<dyn NetworkPort>, ExternalError>;

    /// Import with an explicit filename carrying the format hint.
    async fn import_network_with_filename(
        &self,
        filename: &str,
        url: &str,
    ) -> Result<Box<dyn NetworkPort>, ExternalError>;
}

// ==========================================
// CRAC
// ==========================================

/// One declared outage (contingency) with its constituent elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Outage {
    pub name: String,
    pub elements: Vec<OutageElement>,
}

/// One monitored branch-under-contingency constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCnec {
    pub id: String,
    pub name: String,
    /// Whether the constraint is subject to optimization.
    pub optimized: bool,
    pub from_area: String,
    pub to_area: String,
    pub outage: Option<Outage>,
}

/// Imported CRAC. Flow CNECs are exposed in stable declaration order;
/// the limiting-element tie-break relies on it.
pub trait CracPort: Send + Sync {
    fn flow_cnecs(&self) -> &[FlowCnec];
}

#[async_trait]
pub trait CracImporter: Send + Sync {
    async fn import_crac(
        &self,
        crac_url: &str,
        network: &dyn NetworkPort,
    ) -> Result<Box<dyn CracPort>, ExternalError>;
}

// ==========================================
// GLSK
// ==========================================

/// Opaque per-area scaling handle produced by the GLSK document.
pub trait ScalablePort: Send + Sync {}

pub trait GlskPort: Send + Sync {
    fn zonal_scalable(
        &self,
        network: &dyn NetworkPort,
        area_eic: &str,
    ) -> Result<Box<dyn ScalablePort>, ExternalError>;
}

#[async_trait]
pub trait GlskImporter: Send + Sync {
    async fn import_glsk(&self, url: &str) -> Result<Box<dyn GlskPort>, ExternalError>;
}

// ==========================================
// Proportional network shifter
// ==========================================

#[async_trait]
pub trait NetworkShifter: Send + Sync {
    /// Applies a proportional zonal shift of `amount` MW to `network`
    /// in place, distributing it across areas per `factors`.
    ///
    /// Fails with GlskLimitation or Shifting when the shift is
    /// infeasible.
    async fn shift_network(
        &self,
        amount: f64,
        network: &mut dyn NetworkPort,
        glsk: &dyn GlskPort,
        factors: &SplittingFactorMap,
    ) -> Result<(), ExternalError>;
}

// ==========================================
// Optimizer (RAO)
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationRequest {
    pub id: String,
    pub network_url: String,
    pub crac_url: String,
    pub parameters_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationResponse {
    Success { crac_url: String, result_url: String },
    Failure { message: String },
}

#[async_trait]
pub trait OptimizerClient: Send + Sync {
    async fn run_optimization(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse, ExternalError>;
}

/// Imported optimizer result.
pub trait OptimizationResultPort: Send + Sync {
    fn is_secure(&self) -> bool;

    /// Post-optimization margin of a constraint, in MW. None when the
    /// result carries no figure for the constraint.
    fn margin(&self, cnec: &FlowCnec) -> Option<f64>;
}

#[async_trait]
pub trait ResultImporter: Send + Sync {
    async fn import_result(
        &self,
        url: &str,
        crac: &dyn CracPort,
    ) -> Result<Box<dyn OptimizationResultPort>, ExternalError>;
}

// ==========================================
// Bisection search engine
// ==========================================

/// Artifacts of one validated search step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepArtifacts {
    pub step_value: f64,
    pub network_url: String,
    pub crac_url: String,
    pub result_url: String,
}

/// Per-step validation result consumed by the search engine's own
/// convergence logic.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub secure: bool,
    pub artifacts: StepArtifacts,
}

/// Final search outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub highest_valid_step: Option<StepArtifacts>,
}

impl SearchOutcome {
    pub fn has_valid_step(&self) -> bool {
        self.highest_valid_step.is_some()
    }
}

/// Network-validation callback handed to the search engine. The engine
/// calls it sequentially, never concurrently.
#[async_trait]
pub trait StepValidator: Send {
    async fn validate_step(
        &mut self,
        step_value: f64,
        network: &dyn NetworkPort,
    ) -> Result<StepResult, ExternalError>;
}

#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Runs the bisection over `bounds`, shifting copies of
    /// `base_network` through `shifter` and judging each candidate
    /// through `validator`. A validator error aborts the search, which
    /// then reports no valid step instead of crashing the request.
    async fn run(
        &self,
        bounds: &CapacitySearchBounds,
        base_network: &dyn NetworkPort,
        factors: &SplittingFactorMap,
        glsk: &dyn GlskPort,
        shifter: &dyn NetworkShifter,
        validator: &mut dyn StepValidator,
    ) -> Result<SearchOutcome, ExternalError>;
}

// ==========================================
// Artifact store
// ==========================================

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Uploads `bytes` under `path` and returns a presigned URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, ExternalError>;

    async fn exists(&self, path: &str) -> Result<bool, ExternalError>;
}

// ==========================================
// ExternalServices - collaborator bundle
// ==========================================

/// Shared handle on every external collaborator, wired once by the
/// composition root.
#[derive(Clone)]
pub struct ExternalServices {
    pub network_importer: Arc<dyn NetworkImporter>,
    pub crac_importer: Arc<dyn CracImporter>,
    pub glsk_importer: Arc<dyn GlskImporter>,
    pub shifter: Arc<dyn NetworkShifter>,
    pub optimizer: Arc<dyn OptimizerClient>,
    pub result_importer: Arc<dyn ResultImporter>,
    pub search_engine: Arc<dyn SearchEngine>,
    pub artifact_store: Arc<dyn ArtifactStore>,
}
