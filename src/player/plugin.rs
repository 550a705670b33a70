//! Player plugin wiring movement and interaction input.
use bevy::prelude::*;

use crate::player::systems::{handle_player_interaction_input, move_player};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                move_player,
                handle_player_interaction_input.after(move_player),
            ),
        );
    }
}
