// ==========================================
// NTC Validation Decision Engine - result synthesizer
// ==========================================
// Responsibility: convert a computation outcome into a structured
// report entry and write it into the record's result slot. This is the
// only component allowed to mutate the slot, and mutations are always
// whole-entry replacements.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::ComputationOutcome;
use crate::domain::report::{
    CriticalBranch, LimitingElementReport, ResultStatus, TimestampResult,
};
use crate::domain::ttc_document::RawTimestampRecord;
use crate::external::{CracPort, FlowCnec, OptimizationResultPort};
use std::sync::Arc;
use tracing::info;

// ==========================================
// ResultSynthesizer
// ==========================================

pub struct ResultSynthesizer {
    config: Arc<EngineConfig>,
}

impl ResultSynthesizer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Builds the report entry for one outcome.
    pub fn synthesize(&self, outcome: ComputationOutcome) -> TimestampResult {
        match outcome {
            ComputationOutcome::DataError(message) => {
                info!(reason = %message, "timestamp rejected");
                TimestampResult {
                    status: ResultStatus::Rejected,
                    scenario: None,
                    value: None,
                    red_flag_reason: Some(message),
                    note: None,
                    limiting_element: LimitingElementReport::empty(),
                    used_files: None,
                }
            }
            ComputationOutcome::SearchFailure => {
                info!("timestamp rejected: capacity search failed");
                TimestampResult {
                    status: ResultStatus::Rejected,
                    scenario: None,
                    value: None,
                    red_flag_reason: Some(self.config.messages.search_failure.clone()),
                    note: None,
                    limiting_element: LimitingElementReport::empty(),
                    used_files: None,
                }
            }
            ComputationOutcome::Direct(direct) => {
                info!(scenario = ?direct.scenario, value = ?direct.value, "timestamp computed");
                TimestampResult {
                    status: ResultStatus::Computed,
                    scenario: direct.scenario,
                    value: direct.value,
                    red_flag_reason: None,
                    note: direct.note,
                    limiting_element: LimitingElementReport::empty(),
                    used_files: direct.used_files,
                }
            }
            ComputationOutcome::SearchSuccess {
                scenario,
                value,
                limiting_element,
                used_files,
            } => {
                info!(%scenario, value, "timestamp computed from capacity search");
                TimestampResult {
                    status: ResultStatus::Computed,
                    scenario: Some(scenario),
                    value: Some(value),
                    red_flag_reason: None,
                    note: None,
                    limiting_element,
                    used_files: Some(used_files),
                }
            }
        }
    }

    /// Synthesizes and writes the entry into the record's result slot.
    pub fn write(
        &self,
        record: &mut RawTimestampRecord,
        outcome: ComputationOutcome,
    ) -> TimestampResult {
        let entry = self.synthesize(outcome);
        record.result = Some(entry.clone());
        entry
    }
}

// ==========================================
// LimitingElementExtractor
// ==========================================

/// Selects the single monitored constraint with the numerically
/// smallest post-optimization margin. Ties break on first-encountered
/// order over the CRAC's stable flow-CNEC iteration order.
pub struct LimitingElementExtractor;

impl LimitingElementExtractor {
    pub fn extract(
        crac: &dyn CracPort,
        result: &dyn OptimizationResultPort,
    ) -> LimitingElementReport {
        let mut worst: Option<(f64, &FlowCnec)> = None;
        for cnec in crac.flow_cnecs().iter().filter(|c| c.optimized) {
            let Some(margin) = result.margin(cnec) else {
                continue;
            };
            match worst {
                Some((best_margin, _)) if margin >= best_margin => {}
                _ => worst = Some((margin, cnec)),
            }
        }

        match worst {
            None => LimitingElementReport::empty(),
            Some((margin, cnec)) => {
                let (outage_name, outage_elements) = match &cnec.outage {
                    Some(outage) => (Some(outage.name.clone()), outage.elements.clone()),
                    None => (None, Vec::new()),
                };
                LimitingElementReport {
                    branches: vec![CriticalBranch {
                        name: cnec.name.clone(),
                        from_area: cnec.from_area.clone(),
                        to_area: cnec.to_area.clone(),
                        outage_name,
                        outage_elements,
                        margin,
                    }],
                }
            }
        }
    }
}
