//! Systems feeding trigger, interaction and tween events into hint controllers.
use bevy::prelude::*;

use crate::{
    hint::{EntityLifecycle, HintSurface, InteractionHintController},
    tween::{TweenCompleted, TweenPlayer},
};

use super::{
    components::{Deactivated, HintLink, HintOwner, Interactable},
    config::InteractionConfig,
    events::{
        InteractRequestEvent, InteractableDisappearedEvent, InteractionPerformedEvent,
        TriggerEvent,
    },
};

/// Deactivates entities through deferred commands.
struct CommandLifecycle<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    entity: Entity,
}

impl EntityLifecycle for CommandLifecycle<'_, '_, '_> {
    fn deactivate_entity(&mut self) {
        self.commands
            .entity(self.entity)
            .insert((Visibility::Hidden, Deactivated));
    }
}

/// Runs `f` against the hint's tween player, or a scratch one when the hint
/// entity is gone. Degraded controllers never touch it.
pub(crate) fn with_hint_scheduler<R>(
    players: &mut Query<&mut TweenPlayer>,
    hint: Option<&HintLink>,
    f: impl FnOnce(&mut TweenPlayer) -> R,
) -> R {
    match hint.and_then(|link| players.get_mut(link.0).ok()) {
        Some(mut player) => f(&mut *player),
        None => f(&mut TweenPlayer::at(Vec3::ZERO)),
    }
}

/// Builds a controller for each new interactable from its hint's current pose.
pub fn initialize_hints(
    config: Res<InteractionConfig>,
    mut interactables: Query<(&mut Interactable, &HintLink)>,
    mut hints: Query<(&Transform, Has<Sprite>, &mut TweenPlayer)>,
) {
    for (mut interactable, link) in interactables.iter_mut() {
        if interactable.is_initialized() {
            continue;
        }

        let policy = interactable.policy();
        let controller = match hints.get_mut(link.0) {
            Ok((transform, has_sprite, mut player)) => {
                let surface = if has_sprite {
                    HintSurface::Present
                } else {
                    HintSurface::Missing
                };
                let mut controller = InteractionHintController::new(
                    config.hint,
                    policy,
                    transform.translation,
                    surface,
                );
                controller.initialize(&mut *player);
                controller
            }
            Err(_) => {
                warn!(
                    target: "interaction",
                    "Hint entity for {} is missing its Transform or TweenPlayer",
                    interactable.label
                );
                InteractionHintController::new(
                    config.hint,
                    policy,
                    Vec3::ZERO,
                    HintSurface::Missing,
                )
            }
        };

        info!(
            target: "interaction",
            "Initialised {} hint for {} (degraded: {})",
            interactable.kind,
            interactable.label,
            controller.is_degraded()
        );
        interactable.attach(controller);
    }
}

/// Routes trigger-source events to the owning controller.
pub fn apply_trigger_events(
    mut commands: Commands,
    mut triggers: MessageReader<TriggerEvent>,
    mut interactables: Query<(&mut Interactable, &HintLink)>,
    mut players: Query<&mut TweenPlayer>,
    mut disappeared: MessageWriter<InteractableDisappearedEvent>,
) {
    for trigger in triggers.read() {
        let entity = match *trigger {
            TriggerEvent::Entered(entity)
            | TriggerEvent::Exited(entity)
            | TriggerEvent::BecameInvisible(entity) => entity,
        };
        let Ok((mut interactable, link)) = interactables.get_mut(entity) else {
            continue;
        };
        let label = interactable.label.clone();
        let Some(controller) = interactable.controller_mut() else {
            continue;
        };

        with_hint_scheduler(&mut players, Some(link), |scheduler| match *trigger {
            TriggerEvent::Entered(_) => {
                debug!(target: "interaction", "Player entered {}", label);
                controller.on_enter(scheduler);
            }
            TriggerEvent::Exited(_) => {
                debug!(target: "interaction", "Player left {}", label);
                controller.on_exit(scheduler);
            }
            TriggerEvent::BecameInvisible(_) => {
                let mut host = CommandLifecycle {
                    commands: &mut commands,
                    entity,
                };
                if controller.on_visibility_lost(scheduler, &mut host) {
                    info!(target: "interaction", "{} disappeared off-screen", label);
                    disappeared.write(InteractableDisappearedEvent { entity, label });
                }
            }
        });
    }
}

/// Runs `interact()` for every request issued by the input layer.
pub fn apply_interact_requests(
    mut requests: MessageReader<InteractRequestEvent>,
    mut interactables: Query<(&mut Interactable, &HintLink), Without<Deactivated>>,
    mut players: Query<&mut TweenPlayer>,
    mut performed: MessageWriter<InteractionPerformedEvent>,
) {
    for request in requests.read() {
        let Ok((mut interactable, link)) = interactables.get_mut(request.entity) else {
            continue;
        };
        let kind = interactable.kind;
        let label = interactable.label.clone();
        let Some(controller) = interactable.controller_mut() else {
            continue;
        };
        if !controller.is_interactable() {
            debug!(target: "interaction", "Ignoring interaction with {}: not interactable", label);
            continue;
        }

        let outcome =
            with_hint_scheduler(&mut players, Some(link), |scheduler| controller.interact(scheduler));
        let listener_error = match outcome {
            Ok(()) => None,
            Err(err) => {
                warn!(target: "interaction", "Interaction with {} reported: {}", label, err);
                Some(err.to_string())
            }
        };

        info!(target: "interaction", "Player interacted with {} ({})", label, kind);
        performed.write(InteractionPerformedEvent {
            entity: request.entity,
            kind,
            label,
            hint_state: controller.state(),
            listener_error,
        });
    }
}

/// Feeds naturally finished tweens back into the controller that owns the hint.
pub fn dispatch_tween_completions(
    mut completed: MessageReader<TweenCompleted>,
    owners: Query<&HintOwner>,
    mut interactables: Query<&mut Interactable>,
    mut players: Query<&mut TweenPlayer>,
) {
    for event in completed.read() {
        let Ok(owner) = owners.get(event.hint) else {
            continue;
        };
        let Ok(mut interactable) = interactables.get_mut(owner.0) else {
            continue;
        };
        let Some(controller) = interactable.controller_mut() else {
            continue;
        };
        let Ok(mut player) = players.get_mut(event.hint) else {
            continue;
        };
        controller.on_animation_complete(event.handle, &mut *player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hint::HintState,
        interaction::components::{InteractableKind, TriggerZone},
        tween::systems::advance_tweens,
    };
    use bevy::ecs::{message::Messages, system::RunSystemOnce};
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    fn spawn_interactable(world: &mut World, kind: InteractableKind, with_sprite: bool) -> Entity {
        let mut hint = world.spawn((
            Transform::from_xyz(0.0, 40.0, 1.0),
            Visibility::Inherited,
            TweenPlayer::at(Vec3::new(0.0, 40.0, 1.0)),
        ));
        if with_sprite {
            hint.insert(Sprite::default());
        }
        let hint = hint.id();

        let owner = world
            .spawn((
                Interactable::new(kind, "Test"),
                HintLink(hint),
                TriggerZone::new(48.0),
            ))
            .id();
        world.entity_mut(hint).insert(HintOwner(owner));
        owner
    }

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(InteractionConfig::default());
        world.init_resource::<Messages<TriggerEvent>>();
        world.init_resource::<Messages<InteractRequestEvent>>();
        world.init_resource::<Messages<InteractionPerformedEvent>>();
        world.init_resource::<Messages<InteractableDisappearedEvent>>();
        world.init_resource::<Messages<TweenCompleted>>();
        world
    }

    /// Advances the clock past one show/hide tween and feeds completions back.
    fn finish_current_tween(world: &mut World) {
        let settings = world.resource::<InteractionConfig>().hint;
        let step = settings.fade_duration().max(settings.slide_duration()) + 0.05;
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(step));
        world.run_system_once(advance_tweens).unwrap();
        world.run_system_once(dispatch_tween_completions).unwrap();
    }

    fn hint_player(world: &World, entity: Entity) -> &TweenPlayer {
        let link = *world.get::<HintLink>(entity).unwrap();
        world.get::<TweenPlayer>(link.0).unwrap()
    }

    fn state(world: &World, entity: Entity) -> HintState {
        world
            .get::<Interactable>(entity)
            .and_then(Interactable::controller)
            .map(|controller| controller.state())
            .expect("controller initialised")
    }

    #[test]
    fn initialization_hides_the_hint() {
        let mut world = test_world();
        let entity = spawn_interactable(&mut world, InteractableKind::Object, true);
        world.run_system_once(initialize_hints).unwrap();

        let link = *world.get::<HintLink>(entity).unwrap();
        let player = world.get::<TweenPlayer>(link.0).unwrap();
        assert!(!player.is_active());
        assert_eq!(player.pose().opacity, 0.0);
        assert_eq!(state(&world, entity), HintState::Idle);
    }

    #[test]
    fn missing_sprite_initialises_degraded_controller() {
        let mut world = test_world();
        let entity = spawn_interactable(&mut world, InteractableKind::Npc, false);
        world.run_system_once(initialize_hints).unwrap();

        let interactable = world.get::<Interactable>(entity).unwrap();
        assert!(interactable.controller().unwrap().is_degraded());
    }

    #[test]
    fn enter_then_interact_runs_listener_and_reports() {
        let mut world = test_world();
        let entity = spawn_interactable(&mut world, InteractableKind::Npc, true);
        world.run_system_once(initialize_hints).unwrap();

        let counter = Arc::new(AtomicUsize::new(0));
        {
            let counter = Arc::clone(&counter);
            let mut interactable = world.get_mut::<Interactable>(entity).unwrap();
            interactable
                .controller_mut()
                .unwrap()
                .add_listener(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }));
        }

        world.write_message(TriggerEvent::Entered(entity));
        world.run_system_once(apply_trigger_events).unwrap();
        assert_eq!(state(&world, entity), HintState::Showing);

        world.write_message(InteractRequestEvent { entity });
        world.run_system_once(apply_interact_requests).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(state(&world, entity), HintState::Consumed);
        let performed = world.resource::<Messages<InteractionPerformedEvent>>();
        assert_eq!(performed.len(), 1);
    }

    #[test]
    fn visibility_loss_deactivates_armed_entity_once() {
        let mut world = test_world();
        let entity = spawn_interactable(&mut world, InteractableKind::Npc, true);
        world.run_system_once(initialize_hints).unwrap();
        world
            .get_mut::<Interactable>(entity)
            .unwrap()
            .controller_mut()
            .unwrap()
            .set_disappear_on_invisible(true);

        world.write_message(TriggerEvent::BecameInvisible(entity));
        world.write_message(TriggerEvent::BecameInvisible(entity));
        world.run_system_once(apply_trigger_events).unwrap();

        assert!(world.get::<Deactivated>(entity).is_some());
        assert_eq!(world.get::<Visibility>(entity), Some(&Visibility::Hidden));
        let disappeared = world.resource::<Messages<InteractableDisappearedEvent>>();
        assert_eq!(disappeared.len(), 1);
        let controller = world
            .get::<Interactable>(entity)
            .and_then(Interactable::controller)
            .unwrap();
        assert!(!controller.disappear_on_invisible());
    }

    #[test]
    fn finished_show_tween_reaches_visible_and_starts_bounce() {
        let mut world = test_world();
        world.insert_resource(Time::<()>::default());
        let entity = spawn_interactable(&mut world, InteractableKind::Object, true);
        world.run_system_once(initialize_hints).unwrap();

        world.write_message(TriggerEvent::Entered(entity));
        world.run_system_once(apply_trigger_events).unwrap();
        assert!(!hint_player(&world, entity).is_looping());

        finish_current_tween(&mut world);

        assert_eq!(state(&world, entity), HintState::Visible);
        let player = hint_player(&world, entity);
        assert!(player.is_looping());
        assert!(player.is_active());
        assert!((player.pose().opacity - 1.0).abs() < 1e-5);
        let controller = world
            .get::<Interactable>(entity)
            .and_then(Interactable::controller)
            .unwrap();
        assert!(controller.bounce_active());
    }

    #[test]
    fn exit_during_show_ignores_cancelled_show_and_ends_idle() {
        let mut world = test_world();
        world.insert_resource(Time::<()>::default());
        let entity = spawn_interactable(&mut world, InteractableKind::Object, true);
        world.run_system_once(initialize_hints).unwrap();

        world.write_message(TriggerEvent::Entered(entity));
        world.write_message(TriggerEvent::Exited(entity));
        world.run_system_once(apply_trigger_events).unwrap();
        assert_eq!(state(&world, entity), HintState::Hiding);

        finish_current_tween(&mut world);

        assert_eq!(state(&world, entity), HintState::Idle);
        let player = hint_player(&world, entity);
        assert!(!player.is_looping());
        assert!(!player.is_running());
        assert!(!player.is_active());
    }
}
