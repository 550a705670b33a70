//! Telemetry settings loaded from `config/telemetry.toml`.
use std::{fs, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/telemetry.toml";
const DEFAULT_CAPACITY: usize = 64;
const DEFAULT_LOG_PATH: &str = "logs/interaction_history.jsonl";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawTelemetryConfig {
    #[serde(default)]
    telemetry: RawTelemetrySection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTelemetrySection {
    capacity: usize,
    log_path: String,
}

impl Default for RawTelemetrySection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            log_path: DEFAULT_LOG_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub capacity: usize,
    pub log_path: PathBuf,
}

impl TelemetrySettings {
    pub fn load_or_default() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(data) => match toml::from_str::<RawTelemetryConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawTelemetryConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawTelemetryConfig::default().into()
            }
        }
    }
}

impl From<RawTelemetryConfig> for TelemetrySettings {
    fn from(value: RawTelemetryConfig) -> Self {
        let section = value.telemetry;
        let log_path = if section.log_path.trim().is_empty() {
            PathBuf::from(DEFAULT_LOG_PATH)
        } else {
            PathBuf::from(section.log_path.trim())
        };
        Self {
            capacity: section.capacity.max(1),
            log_path,
        }
    }
}
