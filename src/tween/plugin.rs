//! Tween plugin wiring the hint animation backend.
use bevy::prelude::*;

use super::{
    events::TweenCompleted,
    systems::{advance_tweens, apply_tween_poses},
};

/// Runs hint tweens each frame.
///
/// # System Ordering
///
/// 1. `advance_tweens` - steps tweens and emits `TweenCompleted`
/// 2. `apply_tween_poses` - writes poses to `Transform`/`Sprite`/`Visibility`
///
/// Controllers react to completions in `InteractionPlugin`, which orders its
/// systems between these two.
pub struct TweenPlugin;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TweenSet {
    Advance,
    Apply,
}

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TweenCompleted>()
            .configure_sets(Update, TweenSet::Advance.before(TweenSet::Apply))
            .add_systems(Update, advance_tweens.in_set(TweenSet::Advance))
            .add_systems(Update, apply_tween_poses.in_set(TweenSet::Apply));

        info!("TweenPlugin registered");
    }
}
