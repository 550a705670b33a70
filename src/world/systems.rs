//! Systems for the world module.
use bevy::prelude::*;

use crate::{
    interaction::{
        HintLink, HintOwner, Interactable, InteractableKind, InteractionConfig, TriggerZone,
        VisibilityWatch,
    },
    npc::components::NpcDialogue,
    object::components::ObjectReaction,
    player::components::Player,
    tween::TweenPlayer,
    world::components::FollowCamera,
};

const PLAYER_SIZE: f32 = 24.0;
const ACTOR_SIZE: f32 = 28.0;
const HINT_SIZE: f32 = 12.0;
const HINT_REST: Vec3 = Vec3::new(0.0, 34.0, 1.0);

const PLAYER_COLOR: Color = Color::srgb(0.25, 0.5, 0.95);
const NPC_COLOR: Color = Color::srgb(0.85, 0.45, 0.35);
const OBJECT_COLOR: Color = Color::srgb(0.55, 0.4, 0.25);
const HINT_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);

/// Whether the spawned hint gets a sprite to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintVisual {
    Sprite,
    Missing,
}

/// Spawns the camera, the player, and a handful of NPCs and props.
pub fn spawn_world(mut commands: Commands, config: Res<InteractionConfig>) {
    commands.spawn((Camera2d, FollowCamera::default()));

    commands.spawn((
        Name::new("Player"),
        Player::default(),
        Sprite::from_color(PLAYER_COLOR, Vec2::splat(PLAYER_SIZE)),
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));

    spawn_interactable(
        &mut commands,
        &config,
        Vec2::new(160.0, 60.0),
        NPC_COLOR,
        Interactable::new(InteractableKind::Npc, "Mira"),
        HintVisual::Sprite,
        NpcDialogue::new(
            "Mira",
            [
                "Oh, a visitor! Welcome to the valley.",
                "The old well to the north has been dry for years.",
                "Safe travels.",
            ],
        ),
    );

    spawn_interactable(
        &mut commands,
        &config,
        Vec2::new(-260.0, 140.0),
        NPC_COLOR,
        Interactable::new(InteractableKind::Npc, "Traveller"),
        HintVisual::Sprite,
        NpcDialogue::new(
            "Traveller",
            ["I'm only passing through.", "Well, I'd best be off."],
        )
        .leaving_when_done(),
    );

    let props = [
        (
            "Chest",
            Vec2::new(-140.0, -110.0),
            HintVisual::Sprite,
            ObjectReaction::once("The chest creaks open. It is empty."),
        ),
        (
            "Lever",
            Vec2::new(200.0, -130.0),
            HintVisual::Sprite,
            ObjectReaction::repeatable("Clunk. Something rumbles in the distance."),
        ),
        (
            "Signpost",
            Vec2::new(0.0, 220.0),
            HintVisual::Missing,
            ObjectReaction::repeatable("North: the old well. South: the river."),
        ),
    ];
    for (label, position, hint_visual, reaction) in props {
        spawn_interactable(
            &mut commands,
            &config,
            position,
            OBJECT_COLOR,
            Interactable::new(InteractableKind::Object, label).with_policy(reaction.policy()),
            hint_visual,
            reaction,
        );
    }

    info!("Demo scene spawned");
}

fn spawn_interactable(
    commands: &mut Commands,
    config: &InteractionConfig,
    position: Vec2,
    color: Color,
    interactable: Interactable,
    hint_visual: HintVisual,
    behaviour: impl Bundle,
) -> Entity {
    let label = interactable.label.clone();

    let mut hint = commands.spawn((
        Name::new(format!("{} hint", label)),
        Transform::from_translation(HINT_REST),
        Visibility::Hidden,
        TweenPlayer::at(HINT_REST),
    ));
    if hint_visual == HintVisual::Sprite {
        hint.insert(Sprite::from_color(HINT_COLOR, Vec2::splat(HINT_SIZE)));
    }
    let hint = hint.id();

    let owner = commands
        .spawn((
            Name::new(label),
            Sprite::from_color(color, Vec2::splat(ACTOR_SIZE)),
            Transform::from_translation(position.extend(1.0)),
            interactable,
            HintLink(hint),
            TriggerZone::new(config.trigger_radius),
            VisibilityWatch::default(),
            behaviour,
        ))
        .add_child(hint)
        .id();

    commands.entity(hint).insert(HintOwner(owner));
    owner
}

/// Eases the camera towards the player.
pub fn follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&FollowCamera, &mut Transform), Without<Player>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok((camera, mut transform)) = camera_query.single_mut() else {
        return;
    };

    let blend = (camera.stiffness * time.delta_secs()).clamp(0.0, 1.0);
    let target = player.translation.truncate().extend(transform.translation.z);
    transform.translation = transform.translation.lerp(target, blend);
}
