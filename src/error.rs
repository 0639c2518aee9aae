// ==========================================
// NTC Validation Decision Engine - error taxonomy
// ==========================================
// Tool: thiserror derive macro
// Policy: business-rule errors are downgraded to per-timestamp rejected
// report entries at the scenario-service boundary; infrastructure errors
// propagate and fail the whole request.
// ==========================================

use thiserror::Error;

/// Engine-level error taxonomy.
#[derive(Error, Debug)]
pub enum ValidationError {
    // ===== Recoverable, per-timestamp =====
    /// Missing, contradictory or unresolvable input data.
    #[error("{0}")]
    Data(String),

    /// Infeasible zonal shift (GLSK limitation or shifting failure).
    #[error("zonal shift infeasible: {0}")]
    Shift(String),

    /// Capacity search produced no valid step.
    #[error("capacity search produced no valid step")]
    Search,

    // ===== Request-fatal =====
    /// I/O, serialization or unexpected external-call failure.
    /// Never folded into per-timestamp output.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result alias for engine operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
