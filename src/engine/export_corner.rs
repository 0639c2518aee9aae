// ==========================================
// NTC Validation Decision Engine - export-corner scenario service
// ==========================================
// Mirrors the full-import decision order, with two extra prerequisite
// checks: shifting factors and calculation directions must both be
// announced before the capacity comparison is even attempted.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::{ComputationOutcome, DirectOutcome, Scenario};
use crate::domain::request::ValidationRequest;
use crate::domain::ttc_document::RawTimestampRecord;
use crate::engine::classifier::TimestampClassifier;
use crate::engine::full_import::check_input_files;
use crate::engine::search::CapacitySearchOrchestrator;
use crate::error::{ValidationError, ValidationResult};
use crate::external::ExternalServices;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ExportCornerService
// ==========================================

pub struct ExportCornerService {
    config: Arc<EngineConfig>,
    services: ExternalServices,
}

impl ExportCornerService {
    pub fn new(config: Arc<EngineConfig>, services: ExternalServices) -> Self {
        Self { config, services }
    }

    /// Evaluates one export-corner record.
    pub async fn evaluate(
        &self,
        request: &ValidationRequest,
        record: &RawTimestampRecord,
    ) -> ValidationResult<ComputationOutcome> {
        let target = TimestampClassifier::export_corner_target_value(record).ok_or_else(|| {
            ValidationError::Data(self.config.messages.missing_data.clone())
        })?;
        let base = TimestampClassifier::export_corner_base_value(record);
        let antc = TimestampClassifier::antc_value(record);

        match (base, antc) {
            (None, None) => {
                info!(target, "no export-corner correction announced");
                Ok(ComputationOutcome::Direct(DirectOutcome::value(
                    Scenario::ExportCorner,
                    target,
                )))
            }
            (Some(base), Some(antc)) if base == 0.0 && antc == 0.0 => {
                info!(target, "export-corner correction is zero");
                Ok(ComputationOutcome::Direct(DirectOutcome::value(
                    Scenario::ExportCorner,
                    target,
                )))
            }
            (None, Some(_)) | (Some(_), None) => Err(ValidationError::Data(
                self.config.messages.missing_data.clone(),
            )),
            (Some(base), Some(antc)) => {
                // Prerequisites of the zonal shift, checked in this
                // order before the capacity comparison.
                if !TimestampClassifier::has_shifting_factors(record) {
                    return Err(ValidationError::Data(
                        self.config.messages.missing_shifting_factors.clone(),
                    ));
                }
                if !TimestampClassifier::has_calculation_directions(record) {
                    return Err(ValidationError::Data(
                        self.config.messages.missing_calculation_directions.clone(),
                    ));
                }

                let actual = base - antc;
                if actual >= target {
                    info!(actual, target, "export-corner target does not need to be augmented");
                    return Ok(ComputationOutcome::Direct(DirectOutcome::value(
                        Scenario::ExportCorner,
                        actual,
                    )));
                }
                info!(actual, target, "export-corner target must be validated");

                let files = check_input_files(request, true)?;
                let orchestrator =
                    CapacitySearchOrchestrator::new(self.config.clone(), self.services.clone());
                orchestrator
                    .run_export_corner(request, &files, record, target)
                    .await
            }
        }
    }
}
