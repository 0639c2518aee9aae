// ==========================================
// NTC Validation Decision Engine - zonal split-factor calculator
// ==========================================
// Responsibility: per-area proportional adjustment factors with
// direction-dependent sign, consumed by the external proportional
// shifter. Invariants:
// - two-area reduction sums to exactly zero
// - all-areas variant includes every configured area, closing the
//   balance on the designated "to" area
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::SplittingFactorMap;
use crate::domain::ttc_document::{CalculationDirection, RawTimestampRecord};
use crate::error::{ValidationError, ValidationResult};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// SplitFactorCalculator
// ==========================================

pub struct SplitFactorCalculator {
    config: Arc<EngineConfig>,
}

impl SplitFactorCalculator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // Full-import variant
    // ==========================================

    /// Copies the per-area splitting factors already present on the
    /// record and forces the designated exporting area's factor to
    /// exactly -1: its share is by definition the complement of all
    /// others, never independently specified.
    pub fn full_import_factors(&self, record: &RawTimestampRecord) -> SplittingFactorMap {
        let mut factors = SplittingFactorMap::new();
        if let Some(announced) = &record.shifting_factors {
            for sf in announced {
                factors.insert(sf.area_eic.clone(), sf.factor);
            }
        }
        factors.insert(self.config.from_area.eic.clone(), -1.0);

        debug!(areas = factors.len(), "full-import splitting factors built");
        factors
    }

    // ==========================================
    // Direction resolution
    // ==========================================

    /// Whether the designated "to" area imports from the "from" area,
    /// per the record's calculation directions.
    ///
    /// Scans for a direction matching the configured country pair in
    /// either order. No match is a data error: an ambiguous direction
    /// must never be silently defaulted.
    pub fn is_to_area_importing(&self, record: &RawTimestampRecord) -> ValidationResult<bool> {
        let directions = record
            .calculation_directions
            .as_deref()
            .unwrap_or_default();
        let from_eic = &self.config.from_area.eic;
        let to_eic = &self.config.to_area.eic;

        for direction in directions {
            if direction.in_area_eic == *to_eic && direction.out_area_eic == *from_eic {
                return Ok(true);
            }
            if direction.in_area_eic == *from_eic && direction.out_area_eic == *to_eic {
                return Ok(false);
            }
        }
        Err(ValidationError::Data(
            self.config.messages.ambiguous_direction.clone(),
        ))
    }

    // ==========================================
    // Export-corner, two-area reduction
    // ==========================================

    /// Assigns +1/-1 to the two configured border areas such that the
    /// importing area is positive. Sums to zero by construction.
    pub fn two_area_factors(&self, record: &RawTimestampRecord) -> ValidationResult<SplittingFactorMap> {
        let to_importing = self.is_to_area_importing(record)?;
        let (to_sign, from_sign) = if to_importing { (1.0, -1.0) } else { (-1.0, 1.0) };

        let mut factors = SplittingFactorMap::new();
        factors.insert(self.config.to_area.eic.clone(), to_sign);
        factors.insert(self.config.from_area.eic.clone(), from_sign);

        debug!(
            to_area = %self.config.to_area.code,
            to_importing,
            "two-area splitting factors built"
        );
        Ok(factors)
    }

    // ==========================================
    // Export-corner, all-areas variant
    // ==========================================

    /// Takes the record's per-area shifting factors for every configured
    /// area except the designated "to" area, signs each one by whether
    /// that area imports from the "from" area, and closes the balance on
    /// the "to" area so the total is exactly zero.
    pub fn all_areas_factors(&self, record: &RawTimestampRecord) -> ValidationResult<SplittingFactorMap> {
        let announced = record.shifting_factors.as_deref().unwrap_or_default();
        let directions = record
            .calculation_directions
            .as_deref()
            .unwrap_or_default();
        let from_eic = &self.config.from_area.eic;

        let mut factors = SplittingFactorMap::new();
        let mut sum = 0.0;
        for area_eic in self.config.other_area_eics() {
            let factor = announced
                .iter()
                .find(|sf| sf.area_eic == area_eic)
                .map(|sf| sf.factor)
                .ok_or_else(|| {
                    ValidationError::Data(self.config.messages.missing_shifting_factors.clone())
                })?;
            let sign = if imports_from(directions, area_eic, from_eic) {
                1.0
            } else {
                -1.0
            };
            let signed = sign * factor;
            sum += signed;
            factors.insert(area_eic.to_string(), signed);
        }
        factors.insert(self.config.to_area.eic.clone(), -sum);

        debug!(areas = factors.len(), "all-areas splitting factors built");
        Ok(factors)
    }
}

/// Whether `area_eic` imports from `supplier_eic` per the announced
/// calculation directions.
fn imports_from(directions: &[CalculationDirection], area_eic: &str, supplier_eic: &str) -> bool {
    directions
        .iter()
        .any(|d| d.in_area_eic == area_eic && d.out_area_eic == supplier_eic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ttc_document::ShiftingFactor;
    use chrono::{TimeZone, Utc};

    fn record() -> RawTimestampRecord {
        let t = Utc.with_ymd_and_hms(2022, 4, 20, 0, 30, 0).unwrap();
        RawTimestampRecord::empty(t, t)
    }

    #[test]
    fn test_full_import_forces_exporting_area_to_minus_one() {
        let config = Arc::new(EngineConfig::france_italy());
        let calculator = SplitFactorCalculator::new(config.clone());

        let mut r = record();
        r.shifting_factors = Some(vec![
            ShiftingFactor::new("10YIT-GRTN-----B", 0.6),
            ShiftingFactor::new("10YCH-SWISSGRIDZ", 0.4),
            // announced value for the exporting area must be overridden
            ShiftingFactor::new("10YFR-RTE------C", 0.3),
        ]);

        let factors = calculator.full_import_factors(&r);
        assert_eq!(factors["10YFR-RTE------C"], -1.0);
        assert_eq!(factors["10YIT-GRTN-----B"], 0.6);
        assert_eq!(factors["10YCH-SWISSGRIDZ"], 0.4);
    }

    #[test]
    fn test_all_areas_factors_close_balance_to_zero() {
        let config = Arc::new(EngineConfig::france_italy());
        let calculator = SplitFactorCalculator::new(config);

        let mut r = record();
        r.shifting_factors = Some(vec![
            ShiftingFactor::new("10YFR-RTE------C", 0.5),
            ShiftingFactor::new("10YCH-SWISSGRIDZ", 0.3),
            ShiftingFactor::new("10YAT-APG------L", 0.1),
            ShiftingFactor::new("10YSI-ELES-----O", 0.1),
        ]);
        r.calculation_directions = Some(vec![
            // CH imports from FR, the others do not
            CalculationDirection::new("10YCH-SWISSGRIDZ", "10YFR-RTE------C"),
        ]);

        let factors = calculator.all_areas_factors(&r).unwrap();
        let total: f64 = factors.values().sum();
        assert!(total.abs() < 1e-12);
        assert_eq!(factors["10YCH-SWISSGRIDZ"], 0.3);
        assert_eq!(factors["10YAT-APG------L"], -0.1);
    }
}
