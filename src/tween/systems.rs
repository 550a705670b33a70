//! Systems advancing hint tweens and writing their poses back to the entity.
use bevy::prelude::*;

use super::{events::TweenCompleted, player::TweenPlayer};

/// Steps every running tween and reports natural completions.
pub fn advance_tweens(
    time: Res<Time>,
    mut players: Query<(Entity, &mut TweenPlayer)>,
    mut completed: MessageWriter<TweenCompleted>,
) {
    let delta = time.delta_secs();
    for (hint, mut player) in players.iter_mut() {
        if !player.is_running() {
            continue;
        }
        for handle in player.advance(delta) {
            completed.write(TweenCompleted { hint, handle });
        }
    }
}

/// Copies the tweened pose into `Transform`, sprite alpha and visibility.
pub fn apply_tween_poses(
    mut hints: Query<
        (&TweenPlayer, &mut Transform, &mut Visibility, Option<&mut Sprite>),
        Changed<TweenPlayer>,
    >,
) {
    for (player, mut transform, mut visibility, sprite) in hints.iter_mut() {
        let pose = player.pose();
        transform.translation = pose.position;

        let target_visibility = if player.is_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != target_visibility {
            *visibility = target_visibility;
        }

        if let Some(mut sprite) = sprite {
            sprite.color = sprite.color.with_alpha(pose.opacity.clamp(0.0, 1.0));
        }
    }
}
