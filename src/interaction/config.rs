//! Interaction configuration loaded from `config/interaction.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::hint::settings::{
    HintSettings, DEFAULT_BOUNCE_AMPLITUDE, DEFAULT_BOUNCE_SECONDS, DEFAULT_FADE_SECONDS,
    DEFAULT_HINT_OFFSET, DEFAULT_SLIDE_SECONDS,
};

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    hint: RawHintSection,
    #[serde(default)]
    trigger: RawTriggerSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHintSection {
    offset: f32,
    fade_seconds: f32,
    slide_seconds: f32,
    bounce_amplitude: f32,
    bounce_seconds: f32,
}

impl Default for RawHintSection {
    fn default() -> Self {
        Self {
            offset: DEFAULT_HINT_OFFSET,
            fade_seconds: DEFAULT_FADE_SECONDS,
            slide_seconds: DEFAULT_SLIDE_SECONDS,
            bounce_amplitude: DEFAULT_BOUNCE_AMPLITUDE,
            bounce_seconds: DEFAULT_BOUNCE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTriggerSection {
    radius: f32,
    pixels_per_unit: f32,
}

impl Default for RawTriggerSection {
    fn default() -> Self {
        Self {
            radius: 1.5,
            pixels_per_unit: 32.0,
        }
    }
}

/// Hint tunables (already scaled to pixels) and trigger zone size.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InteractionConfig {
    pub hint: HintSettings,
    /// Trigger radius in pixels.
    pub trigger_radius: f32,
    pub pixels_per_unit: f32,
}

impl InteractionConfig {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_or_default(&data),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }

    fn from_toml_or_default(data: &str) -> Self {
        match toml::from_str::<RawInteractionConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionConfig {
    fn from(value: RawInteractionConfig) -> Self {
        let pixels_per_unit = if value.trigger.pixels_per_unit > 0.0 {
            value.trigger.pixels_per_unit
        } else {
            RawTriggerSection::default().pixels_per_unit
        };

        let hint = value.hint;
        let hint = HintSettings::new(
            hint.offset,
            hint.fade_seconds,
            hint.slide_seconds,
            hint.bounce_amplitude,
            hint.bounce_seconds,
        )
        .unwrap_or_else(|err| {
            warn!("Invalid [hint] section in {} ({}). Using defaults.", CONFIG_PATH, err);
            HintSettings::default()
        });
        let hint = hint
            .scaled_distances(pixels_per_unit)
            .unwrap_or_else(|_| HintSettings::default());

        Self {
            hint,
            trigger_radius: value.trigger.radius.max(0.0) * pixels_per_unit,
            pixels_per_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_sections_with_defaults() {
        let config = InteractionConfig::from_toml_or_default(
            r#"
            [hint]
            fade_seconds = 0.25

            [trigger]
            pixels_per_unit = 10.0
            "#,
        );

        assert_eq!(config.hint.fade_duration(), 0.25);
        assert_eq!(config.hint.offset(), 10.0);
        assert_eq!(config.trigger_radius, 15.0);
    }

    #[test]
    fn negative_hint_values_fall_back_to_defaults() {
        let config = InteractionConfig::from_toml_or_default(
            r#"
            [hint]
            slide_seconds = -1.0
            "#,
        );
        assert_eq!(config.hint.slide_duration(), DEFAULT_SLIDE_SECONDS);
        assert_eq!(config.hint.offset(), DEFAULT_HINT_OFFSET * 32.0);
    }

    #[test]
    fn malformed_toml_uses_defaults() {
        let config = InteractionConfig::from_toml_or_default("[hint\noffset = ");
        assert_eq!(config.pixels_per_unit, 32.0);
        assert_eq!(config.trigger_radius, 48.0);
    }
}
