// ==========================================
// NTC Validation Decision Engine - full-import scenario service
// ==========================================
// Decision order: irrelevant-values shortcut, missing-data error,
// already-sufficient shortcut, input completeness, capacity search.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::{ComputationOutcome, DirectOutcome, Scenario};
use crate::domain::report::UsedFileRefs;
use crate::domain::request::ValidationRequest;
use crate::domain::ttc_document::RawTimestampRecord;
use crate::engine::classifier::TimestampClassifier;
use crate::engine::search::CapacitySearchOrchestrator;
use crate::error::{ValidationError, ValidationResult};
use crate::external::ExternalServices;
use std::sync::Arc;
use tracing::info;

// ==========================================
// Input completeness check
// ==========================================

/// Verifies the request carries every file the search path needs and
/// returns their references. The error lists exactly the missing file
/// names, joined as a single sentence.
pub(crate) fn check_input_files(
    request: &ValidationRequest,
    need_export_crac: bool,
) -> ValidationResult<UsedFileRefs> {
    let mut missing = Vec::new();
    if request.cgm.is_none() {
        missing.push("CGM file");
    }
    if request.glsk.is_none() {
        missing.push("GLSK file");
    }
    if request.import_crac.is_none() {
        missing.push("import CRAC file");
    }
    if need_export_crac && request.export_crac.is_none() {
        missing.push("export CRAC file");
    }

    match (
        request.cgm.clone(),
        request.glsk.clone(),
        request.import_crac.clone(),
    ) {
        (Some(cgm), Some(glsk), Some(import_crac)) if missing.is_empty() => Ok(UsedFileRefs {
            cgm,
            glsk,
            import_crac,
            export_crac: request.export_crac.clone(),
        }),
        _ => Err(ValidationError::Data(format!(
            "Missing {}",
            missing.join(", ")
        ))),
    }
}

// ==========================================
// FullImportService
// ==========================================

pub struct FullImportService {
    config: Arc<EngineConfig>,
    services: ExternalServices,
}

impl FullImportService {
    pub fn new(config: Arc<EngineConfig>, services: ExternalServices) -> Self {
        Self { config, services }
    }

    /// Evaluates one full-import record.
    ///
    /// # Returns
    /// The computation outcome; recoverable rule violations surface as
    /// Err(Data/Shift/Search) and are downgraded by the router.
    pub async fn evaluate(
        &self,
        request: &ValidationRequest,
        record: &RawTimestampRecord,
    ) -> ValidationResult<ComputationOutcome> {
        let target = TimestampClassifier::full_import_target_value(record).ok_or_else(|| {
            ValidationError::Data(self.config.messages.missing_data.clone())
        })?;
        let base = TimestampClassifier::full_import_base_value(record);
        let antc = TimestampClassifier::antc_value(record);

        match (base, antc) {
            // Irrelevant-values shortcut: no correction announced, the
            // corrected capacity equals the raw target.
            (None, None) => {
                info!(target, "no full-import correction announced");
                Ok(ComputationOutcome::Direct(DirectOutcome::value(
                    Scenario::FullImport,
                    target,
                )))
            }
            (Some(base), Some(antc)) if base == 0.0 && antc == 0.0 => {
                info!(target, "full-import correction is zero");
                Ok(ComputationOutcome::Direct(DirectOutcome::value(
                    Scenario::FullImport,
                    target,
                )))
            }
            (None, Some(_)) | (Some(_), None) => Err(ValidationError::Data(
                self.config.messages.missing_data.clone(),
            )),
            (Some(base), Some(antc)) => {
                let actual = base - antc;
                if actual >= target {
                    info!(actual, target, "full-import target does not need to be augmented");
                    return Ok(ComputationOutcome::Direct(DirectOutcome::value(
                        Scenario::FullImport,
                        actual,
                    )));
                }
                info!(actual, target, "full-import target must be validated");

                let files = check_input_files(request, false)?;
                let orchestrator =
                    CapacitySearchOrchestrator::new(self.config.clone(), self.services.clone());
                orchestrator
                    .run_full_import(request, &files, record, target, base, antc)
                    .await
            }
        }
    }
}
