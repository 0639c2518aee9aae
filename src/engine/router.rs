// ==========================================
// NTC Validation Decision Engine - scenario decision router
// ==========================================
// Entered once per validation request per record. Routes to the
// matching scenario service, short-circuits the none-present and
// contradictory classifications, and downgrades recoverable errors to
// per-timestamp outcomes at the scenario-service boundary.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::{ComputationOutcome, DirectOutcome, Scenario};
use crate::domain::request::ValidationRequest;
use crate::domain::ttc_document::RawTimestampRecord;
use crate::engine::classifier::{ScenarioClassification, TimestampClassifier};
use crate::engine::export_corner::ExportCornerService;
use crate::engine::full_import::FullImportService;
use crate::error::{ValidationError, ValidationResult};
use crate::external::ExternalServices;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ScenarioDecisionRouter
// ==========================================

pub struct ScenarioDecisionRouter {
    config: Arc<EngineConfig>,
    full_import: FullImportService,
    export_corner: ExportCornerService,
}

impl ScenarioDecisionRouter {
    pub fn new(config: Arc<EngineConfig>, services: ExternalServices) -> Self {
        Self {
            full_import: FullImportService::new(config.clone(), services.clone()),
            export_corner: ExportCornerService::new(config.clone(), services),
            config,
        }
    }

    /// Routes one record to its scenario and returns the outcome.
    ///
    /// Recoverable errors (missing/contradictory data, infeasible
    /// shift, failed search) are converted into outcome variants here;
    /// only infrastructure errors propagate.
    pub async fn route(
        &self,
        request: &ValidationRequest,
        record: &RawTimestampRecord,
    ) -> ValidationResult<ComputationOutcome> {
        match self.dispatch(request, record).await {
            Ok(outcome) => Ok(outcome),
            Err(ValidationError::Data(message)) => {
                warn!(reason = %message, "record rejected on data error");
                Ok(ComputationOutcome::DataError(message))
            }
            Err(ValidationError::Shift(message)) => {
                warn!(reason = %message, "record rejected on infeasible shift");
                Ok(ComputationOutcome::DataError(message))
            }
            Err(ValidationError::Search) => Ok(ComputationOutcome::SearchFailure),
            Err(err @ ValidationError::Internal(_)) => Err(err),
        }
    }

    async fn dispatch(
        &self,
        request: &ValidationRequest,
        record: &RawTimestampRecord,
    ) -> ValidationResult<ComputationOutcome> {
        let classification = TimestampClassifier::classify(record);
        info!(%classification, timestamp = %record.time, "record classified");

        match classification {
            ScenarioClassification::NonePresent => {
                // No adjustment needed; report the absence message.
                Ok(ComputationOutcome::Direct(DirectOutcome::message_only(
                    &self.config.messages.missing_ttc_adjustment,
                )))
            }
            ScenarioClassification::Contradictory => Err(ValidationError::Data(
                self.config.messages.contradictory_data.clone(),
            )),
            // Full export is always accepted at face value; no search
            // is ever performed for it.
            ScenarioClassification::FullExport => {
                let target =
                    TimestampClassifier::full_export_target_value(record).ok_or_else(|| {
                        ValidationError::Data(self.config.messages.missing_data.clone())
                    })?;
                Ok(ComputationOutcome::Direct(DirectOutcome::value(
                    Scenario::FullExport,
                    target,
                )))
            }
            ScenarioClassification::FullImport => {
                self.full_import.evaluate(request, record).await
            }
            ScenarioClassification::ExportCorner => {
                self.export_corner.evaluate(request, record).await
            }
        }
    }
}
