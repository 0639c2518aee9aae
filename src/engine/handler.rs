// ==========================================
// NTC Validation Decision Engine - validation handler
// ==========================================
// Top-level entry: one request, one record, one report. Handles the
// document-level failures (missing or unmatchable TTC-adjustment
// document) before any classification happens.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::{ComputationOutcome, DirectOutcome};
use crate::domain::report::ValidationReport;
use crate::domain::request::ValidationRequest;
use crate::domain::ttc_document::TtcAdjustmentDocument;
use crate::engine::router::ScenarioDecisionRouter;
use crate::engine::synthesizer::ResultSynthesizer;
use crate::error::ValidationResult;
use crate::external::ExternalServices;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ValidationHandler
// ==========================================

pub struct ValidationHandler {
    config: Arc<EngineConfig>,
    router: ScenarioDecisionRouter,
    synthesizer: ResultSynthesizer,
}

impl ValidationHandler {
    pub fn new(config: Arc<EngineConfig>, services: ExternalServices) -> Self {
        Self {
            router: ScenarioDecisionRouter::new(config.clone(), services),
            synthesizer: ResultSynthesizer::new(config.clone()),
            config,
        }
    }

    /// Validates one request against its TTC-adjustment document.
    ///
    /// # Arguments
    /// - document: the parsed document, or None when the upstream
    ///   fetch/parse failed
    ///
    /// # Returns
    /// The run report. The matching record's result slot is filled as a
    /// side effect. Only infrastructure errors fail the request;
    /// business-rule violations always land in the report entry.
    pub async fn handle(
        &self,
        request: &ValidationRequest,
        document: Option<&mut TtcAdjustmentDocument>,
    ) -> ValidationResult<ValidationReport> {
        info!(
            request_id = %request.id,
            process = %request.process_type,
            timestamp = %request.timestamp,
            "validation request received"
        );

        let entry = match document {
            None => {
                warn!("TTC-adjustment document could not be imported");
                self.synthesizer.synthesize(self.absence_outcome())
            }
            Some(doc) => {
                match doc.position_for(request.timestamp, request.lookup_time()) {
                    None => {
                        warn!(
                            timestamp = %request.timestamp,
                            adjustment_time = %request.lookup_time(),
                            "no TTC-adjustment record matches the request"
                        );
                        self.synthesizer.synthesize(self.absence_outcome())
                    }
                    Some(index) => {
                        let outcome = {
                            let record = &doc.records[index];
                            self.router.route(request, record).await?
                        };
                        self.synthesizer.write(&mut doc.records[index], outcome)
                    }
                }
            }
        };

        info!(request_id = %request.id, status = %entry.status, "validation request finished");
        Ok(ValidationReport {
            request_id: request.id.clone(),
            run_id: request.run_id,
            timestamp: request.timestamp,
            entry,
        })
    }

    fn absence_outcome(&self) -> ComputationOutcome {
        ComputationOutcome::Direct(DirectOutcome::message_only(
            &self.config.messages.missing_ttc_adjustment,
        ))
    }
}
