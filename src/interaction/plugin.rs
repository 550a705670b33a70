//! Interaction plugin wiring trigger detection, controllers and input requests.
use bevy::prelude::*;
#[cfg(feature = "hint_debug")]
use bevy::time::TimerMode;

use crate::tween::TweenSet;

use super::{
    config::InteractionConfig,
    events::{
        InteractRequestEvent, InteractableDisappearedEvent, InteractionPerformedEvent,
        TriggerEvent,
    },
    systems::{
        apply_interact_requests, apply_trigger_events, dispatch_tween_completions,
        initialize_hints,
    },
    trigger::{detect_trigger_zones, detect_visibility_loss},
};

#[cfg(feature = "hint_debug")]
#[derive(Resource)]
struct HintDebugTimer {
    timer: Timer,
}

#[cfg(feature = "hint_debug")]
impl Default for HintDebugTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Plugin driving interaction hints for every `Interactable` entity.
///
/// # System Ordering
///
/// 1. `dispatch_tween_completions` - after tweens advance
/// 2. `initialize_hints` - builds controllers for new interactables
/// 3. `detect_trigger_zones` / `detect_visibility_loss` - trigger source
/// 4. `apply_trigger_events` - enter/exit/visibility transitions
/// 5. `apply_interact_requests` - listener dispatch
///
/// All of it runs before tween poses are written back, so a transition is
/// visible in the same frame.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let config = InteractionConfig::load_or_default();
        info!(
            "Interaction configured: hint offset {:.1}px, fade {:.2}s, slide {:.2}s, trigger radius {:.1}px",
            config.hint.offset(),
            config.hint.fade_duration(),
            config.hint.slide_duration(),
            config.trigger_radius
        );

        app.insert_resource(config)
            .add_message::<TriggerEvent>()
            .add_message::<InteractRequestEvent>()
            .add_message::<InteractionPerformedEvent>()
            .add_message::<InteractableDisappearedEvent>()
            .add_systems(
                Update,
                (
                    dispatch_tween_completions,
                    initialize_hints,
                    (detect_trigger_zones, detect_visibility_loss),
                    apply_trigger_events,
                    apply_interact_requests,
                )
                    .chain()
                    .after(TweenSet::Advance)
                    .before(TweenSet::Apply),
            );

        #[cfg(feature = "hint_debug")]
        {
            app.insert_resource(HintDebugTimer::default())
                .add_systems(Update, log_hint_states);
        }
    }
}

#[cfg(feature = "hint_debug")]
fn log_hint_states(
    time: Res<Time>,
    mut timer: ResMut<HintDebugTimer>,
    interactables: Query<&super::components::Interactable>,
) {
    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }
    for interactable in interactables.iter() {
        let Some(controller) = interactable.controller() else {
            continue;
        };
        info!(
            target: "hint_debug",
            "{} | state: {} | interactable: {} | listeners: {} | bounce: {}",
            interactable.label,
            controller.state(),
            controller.is_interactable(),
            controller.listener_count(),
            controller.bounce_active(),
        );
    }
}
