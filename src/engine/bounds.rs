// ==========================================
// NTC Validation Decision Engine - capacity search bound calculator
// ==========================================
// Responsibility: the signed interval and resolution handed to the
// external bisection engine. The already-sufficient shortcut has
// excluded the non-positive case before any bound is computed here.
// ==========================================

use crate::config::EngineConfig;
use crate::domain::outcome::CapacitySearchBounds;
use crate::external::{ExternalError, NetworkPort};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// BoundCalculator
// ==========================================

pub struct BoundCalculator {
    config: Arc<EngineConfig>,
}

impl BoundCalculator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Full-import interval: search upwards from zero additional shift
    /// to the announced gap between target and actual capacity.
    ///
    /// # Arguments
    /// - target: announced full-import target capacity
    /// - base: full-import base capacity
    /// - antc: final allocated transfer capacity
    pub fn full_import_bounds(&self, target: f64, base: f64, antc: f64) -> CapacitySearchBounds {
        let bounds = CapacitySearchBounds {
            min_value: 0.0,
            max_value: target - (base - antc),
            precision: self.config.search_precision,
        };
        debug!(
            min = bounds.min_value,
            max = bounds.max_value,
            "full-import search bounds computed"
        );
        bounds
    }

    /// Export-corner interval: the signed exchange difference between
    /// the unshifted reference network and the shifted working copy,
    /// narrowing towards zero headroom. The sign flips with the import
    /// direction so the interval always reads "how much further
    /// correction is needed", not a raw flow value.
    pub fn export_corner_bounds(
        &self,
        reference: &dyn NetworkPort,
        shifted: &dyn NetworkPort,
        to_area_importing: bool,
    ) -> Result<CapacitySearchBounds, ExternalError> {
        let from_eic = &self.config.from_area.eic;
        let to_eic = &self.config.to_area.eic;
        let before = reference.border_exchange(from_eic, to_eic)?;
        let after = shifted.border_exchange(from_eic, to_eic)?;
        let delta = after - before;
        let signed = if to_area_importing { delta } else { -delta };

        let bounds = CapacitySearchBounds {
            min_value: signed,
            max_value: 0.0,
            precision: self.config.search_precision,
        };
        debug!(
            before,
            after,
            min = bounds.min_value,
            "export-corner search bounds computed"
        );
        Ok(bounds)
    }
}
