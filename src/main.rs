use bevy::prelude::*;

use interaction_hints::{
    interaction::InteractionPlugin, npc::NpcPlugin, object::ObjectPlugin, player::PlayerPlugin,
    telemetry::TelemetryPlugin, tween::TweenPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            TweenPlugin,
            InteractionPlugin, // Before WorldPlugin: provides InteractionConfig
            WorldPlugin,
            PlayerPlugin,
            NpcPlugin,
            ObjectPlugin,
            TelemetryPlugin,
        ))
        .run();
}
