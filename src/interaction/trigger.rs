//! Trigger source: player proximity and on-screen visibility of interactables.
use bevy::prelude::*;

use crate::player::components::Player;

use super::{
    components::{Deactivated, TriggerZone, VisibilityWatch},
    events::TriggerEvent,
};

/// Emits enter/exit events when the player crosses a trigger zone boundary.
pub fn detect_trigger_zones(
    player_query: Query<&GlobalTransform, With<Player>>,
    mut zones: Query<(Entity, &GlobalTransform, &mut TriggerZone), Without<Deactivated>>,
    mut triggers: MessageWriter<TriggerEvent>,
) {
    let player_position = player_query
        .single()
        .ok()
        .map(|transform| transform.translation().truncate());

    for (entity, transform, mut zone) in zones.iter_mut() {
        let inside = player_position.is_some_and(|position| {
            position.distance(transform.translation().truncate()) <= zone.radius
        });
        if zone.is_occupied() == inside {
            continue;
        }

        zone.update_occupancy(inside);
        triggers.write(if inside {
            TriggerEvent::Entered(entity)
        } else {
            TriggerEvent::Exited(entity)
        });
    }
}

/// Emits `BecameInvisible` when an interactable stops being rendered by any camera.
pub fn detect_visibility_loss(
    mut watched: Query<(Entity, &ViewVisibility, &mut VisibilityWatch), Without<Deactivated>>,
    mut triggers: MessageWriter<TriggerEvent>,
) {
    for (entity, view_visibility, mut watch) in watched.iter_mut() {
        if watch.observe(view_visibility.get()) {
            triggers.write(TriggerEvent::BecameInvisible(entity));
        }
    }
}
