//! Tunables for the hint show/hide/bounce animations.
use super::errors::HintSettingsError;

pub const DEFAULT_HINT_OFFSET: f32 = 1.0;
pub const DEFAULT_FADE_SECONDS: f32 = 0.5;
pub const DEFAULT_SLIDE_SECONDS: f32 = 0.5;
pub const DEFAULT_BOUNCE_AMPLITUDE: f32 = 0.1;
pub const DEFAULT_BOUNCE_SECONDS: f32 = 0.5;

/// Immutable per-controller animation configuration.
///
/// All values are distances (world units) or durations (seconds). Zero is
/// allowed and means "instantaneous"; negative or non-finite input is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintSettings {
    offset: f32,
    fade_duration: f32,
    slide_duration: f32,
    bounce_amplitude: f32,
    bounce_duration: f32,
}

impl HintSettings {
    pub fn new(
        offset: f32,
        fade_duration: f32,
        slide_duration: f32,
        bounce_amplitude: f32,
        bounce_duration: f32,
    ) -> Result<Self, HintSettingsError> {
        Ok(Self {
            offset: validated("offset", offset)?,
            fade_duration: validated("fade_duration", fade_duration)?,
            slide_duration: validated("slide_duration", slide_duration)?,
            bounce_amplitude: validated("bounce_amplitude", bounce_amplitude)?,
            bounce_duration: validated("bounce_duration", bounce_duration)?,
        })
    }

    /// Vertical distance between the rest position and the hidden position.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    pub fn slide_duration(&self) -> f32 {
        self.slide_duration
    }

    pub fn bounce_amplitude(&self) -> f32 {
        self.bounce_amplitude
    }

    pub fn bounce_duration(&self) -> f32 {
        self.bounce_duration
    }

    /// Returns a copy with every distance multiplied by `scale`.
    ///
    /// Used by hosts whose world units are pixels rather than meters.
    pub fn scaled_distances(&self, scale: f32) -> Result<Self, HintSettingsError> {
        Self::new(
            self.offset * scale,
            self.fade_duration,
            self.slide_duration,
            self.bounce_amplitude * scale,
            self.bounce_duration,
        )
    }
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            offset: DEFAULT_HINT_OFFSET,
            fade_duration: DEFAULT_FADE_SECONDS,
            slide_duration: DEFAULT_SLIDE_SECONDS,
            bounce_amplitude: DEFAULT_BOUNCE_AMPLITUDE,
            bounce_duration: DEFAULT_BOUNCE_SECONDS,
        }
    }
}

fn validated(field: &'static str, value: f32) -> Result<f32, HintSettingsError> {
    if !value.is_finite() {
        return Err(HintSettingsError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(HintSettingsError::Negative { field, value });
    }
    Ok(value)
}
