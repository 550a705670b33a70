//! NPC plugin wiring dialogue lines into interaction listeners.
use bevy::prelude::*;

use crate::{
    interaction::systems::apply_interact_requests,
    npc::systems::{advance_npc_dialogue, prime_npc_dialogue},
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                prime_npc_dialogue,
                advance_npc_dialogue.after(apply_interact_requests),
            ),
        );
    }
}
