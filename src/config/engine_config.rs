// ==========================================
// NTC Validation Decision Engine - engine configuration
// ==========================================
// Responsibility: area/EIC mapping, fixed report messages, capacity
// search tuning. Loaded once, then shared read-only.
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// AreaConfig - one bidding area
// ==========================================

/// One bidding area: human-readable code plus ENTSO-E EIC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub code: String,
    pub eic: String,
}

impl AreaConfig {
    pub fn new(code: &str, eic: &str) -> Self {
        Self {
            code: code.to_string(),
            eic: eic.to_string(),
        }
    }
}

// ==========================================
// ShiftMode - export-corner shift map variant
// ==========================================

/// Which splitting-factor variant the export-corner scenario uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftMode {
    /// Reduce the shift to the two configured border areas (+1 / -1).
    TwoAreaReduction,
    /// Use the record's per-area factors for every configured area,
    /// closing the balance on the designated "to" area.
    AllAreas,
}

// ==========================================
// FixedMessages - report strings
// ==========================================

/// Fixed strings written into report entries. Every field has a default
/// so deployments only override what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedMessages {
    /// TTC adjustment file absent, unreadable, or carrying no matching record.
    pub missing_ttc_adjustment: String,
    /// At least two capacity indicators present on the same record.
    pub contradictory_data: String,
    /// Exactly one of base capacity and ANTC is absent.
    pub missing_data: String,
    /// Export corner requested but the record carries no shifting factors.
    pub missing_shifting_factors: String,
    /// Export corner requested but the record carries no calculation directions.
    pub missing_calculation_directions: String,
    /// No calculation direction matches the configured country pair.
    pub ambiguous_direction: String,
    /// Capacity search found no secure network variant.
    pub search_failure: String,
}

impl Default for FixedMessages {
    fn default() -> Self {
        Self {
            missing_ttc_adjustment: "TTC adjustment file is missing for the requested timestamp"
                .to_string(),
            contradictory_data:
                "Contradictory data: several capacity indicators are present for the same timestamp"
                    .to_string(),
            missing_data: "Missing data: one of base capacity and ANTC is absent".to_string(),
            missing_shifting_factors: "Missing shifting factors for export corner calculation"
                .to_string(),
            missing_calculation_directions:
                "Missing calculation directions for export corner calculation".to_string(),
            ambiguous_direction: "No calculation direction matches the configured country pair"
                .to_string(),
            search_failure: "Capacity search failed: no secure network variant was found"
                .to_string(),
        }
    }
}

// ==========================================
// EngineConfig - immutable engine configuration
// ==========================================

/// Immutable configuration shared by every engine component.
///
/// The configured border is `from_area -> to_area`: `to_area` is the area
/// whose announced capacity is validated, `from_area` is the counterpart
/// whose splitting factor the full-import scenario forces to -1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub from_area: AreaConfig,
    pub to_area: AreaConfig,
    /// Every area participating in the all-areas export-corner shift.
    /// Must contain both border areas.
    pub all_areas: Vec<AreaConfig>,
    #[serde(default = "default_shift_mode")]
    pub shift_mode: ShiftMode,
    /// Convergence resolution of the capacity search, in MW.
    #[serde(default = "default_precision")]
    pub search_precision: f64,
    /// URL of the optimizer parameter set handed to every optimization run.
    pub rao_parameters_url: String,
    #[serde(default)]
    pub messages: FixedMessages,
}

fn default_shift_mode() -> ShiftMode {
    ShiftMode::TwoAreaReduction
}

fn default_precision() -> f64 {
    50.0
}

impl EngineConfig {
    /// Load the configuration from a JSON file.
    ///
    /// # Arguments
    /// - path: JSON configuration file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read engine config {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse engine config {}", path.display()))?;
        Ok(config)
    }

    /// Reference configuration for the France -> Italy border.
    pub fn france_italy() -> Self {
        Self {
            from_area: AreaConfig::new("FR", "10YFR-RTE------C"),
            to_area: AreaConfig::new("IT", "10YIT-GRTN-----B"),
            all_areas: vec![
                AreaConfig::new("FR", "10YFR-RTE------C"),
                AreaConfig::new("IT", "10YIT-GRTN-----B"),
                AreaConfig::new("CH", "10YCH-SWISSGRIDZ"),
                AreaConfig::new("AT", "10YAT-APG------L"),
                AreaConfig::new("SI", "10YSI-ELES-----O"),
            ],
            shift_mode: ShiftMode::TwoAreaReduction,
            search_precision: 50.0,
            rao_parameters_url: "configuration/rao-parameters.json".to_string(),
            messages: FixedMessages::default(),
        }
    }

    /// EIC codes of every configured area except the designated "to" area.
    pub fn other_area_eics(&self) -> impl Iterator<Item = &str> {
        self.all_areas
            .iter()
            .filter(|a| a.eic != self.to_area.eic)
            .map(|a| a.eic.as_str())
    }
}
