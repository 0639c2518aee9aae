// ==========================================
// NTC Validation Decision Engine - capacity search orchestrator
// ==========================================
// Responsibility: wire the split-factor calculator, the bound
// calculator and the external search engine together, once per
// affected timestamp. One orchestrator instance per request; the
// artifact counter relies on the strictly sequential call contract
// and needs no locking.
// ==========================================

use crate::config::{EngineConfig, ShiftMode};
use crate::domain::outcome::{ComputationOutcome, DirectOutcome, Scenario};
use crate::domain::report::UsedFileRefs;
use crate::domain::request::ValidationRequest;
use crate::domain::ttc_document::RawTimestampRecord;
use crate::engine::bounds::BoundCalculator;
use crate::engine::split_factors::SplitFactorCalculator;
use crate::engine::synthesizer::LimitingElementExtractor;
use crate::error::{ValidationError, ValidationResult};
use crate::external::{
    ExternalError, ExternalServices, NetworkPort, OptimizationRequest, OptimizationResponse,
    SearchOutcome, StepArtifacts, StepResult, StepValidator,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ArtifactNamer - sequential variant paths
// ==========================================

/// Builds unique artifact paths from an incrementing per-run counter
/// and the network's internal variant id. Instance-scoped; the search
/// engine calls the validator sequentially, never concurrently.
struct ArtifactNamer {
    prefix: String,
    counter: u32,
}

impl ArtifactNamer {
    fn new(request: &ValidationRequest) -> Self {
        Self {
            prefix: format!("{}/{}/artifacts", request.process_type, request.run_id),
            counter: 0,
        }
    }

    fn next_path(&mut self, variant_id: &str) -> String {
        self.counter += 1;
        format!("{}/network-{:04}-{}.xiidm", self.prefix, self.counter, variant_id)
    }
}

// ==========================================
// SearchStepValidator - network-validation callback
// ==========================================

/// Persists each candidate network variant, invokes the optimizer and
/// reduces its answer to a per-step result for the search engine's own
/// convergence logic. An optimizer failure is a hard step error: the
/// search aborts and reports no valid step instead of crashing the
/// request.
pub struct SearchStepValidator {
    services: ExternalServices,
    request_id: String,
    crac_url: String,
    parameters_url: String,
    namer: ArtifactNamer,
}

impl SearchStepValidator {
    fn new(
        services: ExternalServices,
        request: &ValidationRequest,
        crac_url: String,
        parameters_url: String,
    ) -> Self {
        Self {
            services,
            request_id: request.id.clone(),
            crac_url,
            parameters_url,
            namer: ArtifactNamer::new(request),
        }
    }
}

#[async_trait]
impl StepValidator for SearchStepValidator {
    async fn validate_step(
        &mut self,
        step_value: f64,
        network: &dyn NetworkPort,
    ) -> Result<StepResult, ExternalError> {
        let path = self.namer.next_path(&network.variant_id());
        let bytes = network.export_bytes()?;
        let network_url = self.services.artifact_store.upload(&path, bytes).await?;

        let request = OptimizationRequest {
            id: format!("{}-{}", self.request_id, self.namer.counter),
            network_url: network_url.clone(),
            crac_url: self.crac_url.clone(),
            parameters_url: self.parameters_url.clone(),
        };
        match self.services.optimizer.run_optimization(&request).await? {
            OptimizationResponse::Failure { message } => {
                warn!(step_value, %message, "optimizer failed on search step");
                Err(ExternalError::Rao(message))
            }
            OptimizationResponse::Success {
                crac_url,
                result_url,
            } => {
                let crac = self
                    .services
                    .crac_importer
                    .import_crac(&crac_url, network)
                    .await?;
                let result = self
                    .services
                    .result_importer
                    .import_result(&result_url, &*crac)
                    .await?;
                Ok(StepResult {
                    secure: result.is_secure(),
                    artifacts: StepArtifacts {
                        step_value,
                        network_url,
                        crac_url,
                        result_url,
                    },
                })
            }
        }
    }
}

// ==========================================
// CapacitySearchOrchestrator
// ==========================================

pub struct CapacitySearchOrchestrator {
    config: Arc<EngineConfig>,
    services: ExternalServices,
    split: SplitFactorCalculator,
    bounds: BoundCalculator,
}

impl CapacitySearchOrchestrator {
    pub fn new(config: Arc<EngineConfig>, services: ExternalServices) -> Self {
        Self {
            split: SplitFactorCalculator::new(config.clone()),
            bounds: BoundCalculator::new(config.clone()),
            config,
            services,
        }
    }

    // ==========================================
    // Full-import search path
    // ==========================================

    /// # Arguments
    /// - files: input references, verified complete by the scenario service
    /// - target / base / antc: record quantities, verified present upstream
    pub async fn run_full_import(
        &self,
        request: &ValidationRequest,
        files: &UsedFileRefs,
        record: &RawTimestampRecord,
        target: f64,
        base: f64,
        antc: f64,
    ) -> ValidationResult<ComputationOutcome> {
        let network = self
            .services
            .network_importer
            .import_network_with_filename(&files.cgm.filename, &files.cgm.url)
            .await
            .map_err(internal)?;
        let glsk = self
            .services
            .glsk_importer
            .import_glsk(&files.glsk.url)
            .await
            .map_err(internal)?;
        let reference_exchange = network
            .border_exchange(&self.config.from_area.eic, &self.config.to_area.eic)
            .map_err(internal)?;

        let mut validator = SearchStepValidator::new(
            self.services.clone(),
            request,
            files.import_crac.url.clone(),
            self.config.rao_parameters_url.clone(),
        );

        // Unshifted-but-optimized probe: an already secure network
        // short-circuits the whole search.
        match validator.validate_step(0.0, network.as_ref()).await {
            Ok(step) if step.secure => {
                info!(value = base - antc, "unshifted network already secure");
                return Ok(ComputationOutcome::Direct(
                    DirectOutcome::value(Scenario::FullImport, base - antc)
                        .with_files(files.clone()),
                ));
            }
            Ok(_) => {}
            Err(err) => return Err(probe_failure(err)),
        }

        let factors = self.split.full_import_factors(record);
        let bounds = self.bounds.full_import_bounds(target, base, antc);
        let outcome = self
            .run_search(&bounds, network.as_ref(), &factors, glsk.as_ref(), &mut validator)
            .await?;

        let Some(step) = outcome.highest_valid_step else {
            return Ok(ComputationOutcome::SearchFailure);
        };
        let (achieved_shift, limiting_element) =
            self.recover_step(&step, reference_exchange).await?;
        Ok(ComputationOutcome::SearchSuccess {
            scenario: Scenario::FullImport,
            value: (base - antc) + achieved_shift,
            limiting_element,
            used_files: files.clone(),
        })
    }

    // ==========================================
    // Export-corner search path
    // ==========================================

    pub async fn run_export_corner(
        &self,
        request: &ValidationRequest,
        files: &UsedFileRefs,
        record: &RawTimestampRecord,
        target: f64,
    ) -> ValidationResult<ComputationOutcome> {
        let network = self
            .services
            .network_importer
            .import_network_with_filename(&files.cgm.filename, &files.cgm.url)
            .await
            .map_err(internal)?;
        let glsk = self
            .services
            .glsk_importer
            .import_glsk(&files.glsk.url)
            .await
            .map_err(internal)?;

        let to_importing = self.split.is_to_area_importing(record)?;
        let signed_target = if to_importing { target } else { -target };

        // Completeness is checked by the scenario service; this guard
        // only keeps the invariant explicit.
        let export_crac = files
            .export_crac
            .as_ref()
            .ok_or_else(|| ValidationError::Data("Missing export CRAC file".to_string()))?;
        let mut validator = SearchStepValidator::new(
            self.services.clone(),
            request,
            export_crac.url.clone(),
            self.config.rao_parameters_url.clone(),
        );

        match validator.validate_step(0.0, network.as_ref()).await {
            Ok(step) if step.secure => {
                info!(value = signed_target, "unshifted network already secure");
                return Ok(ComputationOutcome::Direct(
                    DirectOutcome::value(Scenario::ExportCorner, signed_target)
                        .with_files(files.clone()),
                ));
            }
            Ok(_) => {}
            Err(err) => return Err(probe_failure(err)),
        }

        let factors = match self.config.shift_mode {
            ShiftMode::TwoAreaReduction => self.split.two_area_factors(record)?,
            ShiftMode::AllAreas => self.split.all_areas_factors(record)?,
        };

        // Probe shift of the full requested correction on a working
        // copy, to size the search interval.
        let mut working = network.working_copy();
        self.services
            .shifter
            .shift_network(signed_target, working.as_mut(), glsk.as_ref(), &factors)
            .await
            .map_err(shift_failure)?;
        let bounds = self
            .bounds
            .export_corner_bounds(network.as_ref(), working.as_ref(), to_importing)
            .map_err(internal)?;

        let outcome = self
            .run_search(&bounds, network.as_ref(), &factors, glsk.as_ref(), &mut validator)
            .await?;

        let Some(step) = outcome.highest_valid_step else {
            return Ok(ComputationOutcome::SearchFailure);
        };
        let (fresh_exchange, limiting_element) = self.recover_step(&step, 0.0).await?;
        let value = if to_importing {
            fresh_exchange
        } else {
            -fresh_exchange
        };
        Ok(ComputationOutcome::SearchSuccess {
            scenario: Scenario::ExportCorner,
            value,
            limiting_element,
            used_files: files.clone(),
        })
    }

    // ==========================================
    // Shared plumbing
    // ==========================================

    async fn run_search(
        &self,
        bounds: &crate::domain::outcome::CapacitySearchBounds,
        network: &dyn NetworkPort,
        factors: &crate::domain::outcome::SplittingFactorMap,
        glsk: &dyn crate::external::GlskPort,
        validator: &mut SearchStepValidator,
    ) -> ValidationResult<SearchOutcome> {
        info!(
            min = bounds.min_value,
            max = bounds.max_value,
            precision = bounds.precision,
            "capacity search started"
        );
        match self
            .services
            .search_engine
            .run(
                bounds,
                network,
                factors,
                glsk,
                self.services.shifter.as_ref(),
                validator,
            )
            .await
        {
            Ok(outcome) => Ok(outcome),
            // A step-level optimizer abort means the search found no
            // valid step; it must not crash the request.
            Err(ExternalError::Rao(message)) => {
                warn!(%message, "capacity search aborted by optimizer failure");
                Err(ValidationError::Search)
            }
            Err(err @ (ExternalError::GlskLimitation(_) | ExternalError::Shifting(_))) => {
                Err(shift_failure(err))
            }
            Err(err) => Err(internal(err)),
        }
    }

    /// Re-derives the achieved capacity from a fresh import of the
    /// highest valid step's network, guarding against stale external
    /// state, and extracts the limiting element from its optimization
    /// result. Returns the fresh exchange relative to
    /// `reference_exchange`.
    async fn recover_step(
        &self,
        step: &StepArtifacts,
        reference_exchange: f64,
    ) -> ValidationResult<(f64, crate::domain::report::LimitingElementReport)> {
        let fresh = self
            .services
            .network_importer
            .import_network(&step.network_url)
            .await
            .map_err(internal)?;
        let exchange = fresh
            .border_exchange(&self.config.from_area.eic, &self.config.to_area.eic)
            .map_err(internal)?;
        let crac = self
            .services
            .crac_importer
            .import_crac(&step.crac_url, fresh.as_ref())
            .await
            .map_err(internal)?;
        let result = self
            .services
            .result_importer
            .import_result(&step.result_url, crac.as_ref())
            .await
            .map_err(internal)?;
        let limiting_element = LimitingElementExtractor::extract(crac.as_ref(), result.as_ref());
        Ok((exchange - reference_exchange, limiting_element))
    }
}

// ==========================================
// Error mapping
// ==========================================

fn internal(err: ExternalError) -> ValidationError {
    ValidationError::Internal(anyhow::Error::new(err))
}

fn shift_failure(err: ExternalError) -> ValidationError {
    match err {
        ExternalError::GlskLimitation(m) | ExternalError::Shifting(m) => ValidationError::Shift(m),
        other => internal(other),
    }
}

/// Maps a failed pre-search probe. An optimizer failure downgrades to
/// a search failure; shift infeasibility keeps its own reason.
fn probe_failure(err: ExternalError) -> ValidationError {
    match err {
        ExternalError::Rao(message) => {
            warn!(%message, "optimizer failed on unshifted probe");
            ValidationError::Search
        }
        ExternalError::GlskLimitation(_) | ExternalError::Shifting(_) => shift_failure(err),
        other => internal(other),
    }
}
