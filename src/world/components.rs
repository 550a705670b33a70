//! Components for the demo scene.
use bevy::prelude::*;

/// Camera that keeps the player centred.
#[derive(Component, Debug)]
pub struct FollowCamera {
    /// Fraction of the remaining distance covered per second.
    pub stiffness: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self { stiffness: 4.0 }
    }
}
