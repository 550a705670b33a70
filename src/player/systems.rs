//! Systems for player movement and interaction input.
use bevy::log::debug;
use bevy::prelude::*;

use crate::interaction::{Deactivated, Interactable, InteractRequestEvent, TriggerZone};
use crate::player::components::Player;

/// Moves the player with WASD or the arrow keys.
pub fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&Player, &mut Transform)>,
) {
    let Ok((player, mut transform)) = query.single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }

    if direction == Vec2::ZERO {
        return;
    }

    let step = direction.normalize() * player.speed * time.delta_secs();
    transform.translation += step.extend(0.0);
}

/// Requests an interaction with the nearest interactable whose zone the player is in.
#[allow(clippy::type_complexity)]
pub fn handle_player_interaction_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<&GlobalTransform, With<Player>>,
    interactables: Query<
        (Entity, &GlobalTransform, &TriggerZone, &Interactable),
        Without<Deactivated>,
    >,
    mut requests: MessageWriter<InteractRequestEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation().truncate();

    let nearest = interactables
        .iter()
        .filter(|(_, _, zone, interactable)| {
            zone.is_occupied()
                && interactable
                    .controller()
                    .is_some_and(|controller| controller.is_interactable())
        })
        .map(|(entity, transform, _, interactable)| {
            let distance = player_pos.distance(transform.translation().truncate());
            (entity, interactable, distance)
        })
        .min_by(|a, b| a.2.total_cmp(&b.2));

    let Some((entity, interactable, distance)) = nearest else {
        debug!("Player pressed E but nothing interactable is nearby");
        return;
    };

    debug!(
        "Player requests interaction with {} (distance: {:.1})",
        interactable.label, distance
    );
    requests.write(InteractRequestEvent { entity });
}
