//! WorldPlugin spawns the demo scene and keeps the camera on the player.
use bevy::prelude::*;

use crate::world::systems::{follow_player, spawn_world};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world)
            .add_systems(Update, follow_player);
    }
}
