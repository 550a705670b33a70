//! Telemetry module: rolling hint-state history plus JSONL persistence.
pub mod config;
pub mod plugin;
pub mod records;

pub use plugin::TelemetryPlugin;
pub use records::{HintActivity, InteractionRecord, InteractionTelemetry};
