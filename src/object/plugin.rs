//! Object plugin wiring prop reactions into interaction listeners.
use bevy::prelude::*;

use crate::{
    interaction::systems::apply_interact_requests,
    object::systems::{prime_object_reactions, rearm_object_reactions},
};

pub struct ObjectPlugin;

impl Plugin for ObjectPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                prime_object_reactions,
                rearm_object_reactions.after(apply_interact_requests),
            ),
        );
    }
}
