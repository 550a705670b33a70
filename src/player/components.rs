//! Components for the player avatar.
use bevy::prelude::*;

/// Marker component identifying the player entity.
#[derive(Component, Debug)]
pub struct Player {
    /// Movement speed in pixels per second.
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self { speed: 160.0 }
    }
}
