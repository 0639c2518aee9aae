// ==========================================
// NTC Validation Decision Engine - configuration layer
// ==========================================
// All area codes and fixed report strings live in an immutable
// EngineConfig passed explicitly into every component that needs it,
// so tests can substitute alternate area mappings.
// ==========================================

pub mod engine_config;

pub use engine_config::{AreaConfig, EngineConfig, FixedMessages, ShiftMode};
