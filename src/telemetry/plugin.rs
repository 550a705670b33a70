//! Telemetry plugin recording interaction activity.
use bevy::prelude::*;

use crate::interaction::systems::{
    apply_interact_requests, apply_trigger_events, dispatch_tween_completions,
};

use super::{
    config::TelemetrySettings,
    records::{
        flush_interaction_telemetry_log, record_hint_transitions, record_interaction_telemetry,
        InteractionTelemetry, InteractionTelemetryLog,
    },
};

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        let settings = TelemetrySettings::load_or_default();
        info!(
            "Interaction telemetry: keeping {} records, persisting to {:?}",
            settings.capacity, settings.log_path
        );

        app.insert_resource(InteractionTelemetry::new(settings.capacity))
            .insert_resource(InteractionTelemetryLog::from_settings(&settings))
            .add_systems(
                Update,
                (
                    record_hint_transitions,
                    record_interaction_telemetry,
                    flush_interaction_telemetry_log,
                )
                    .chain()
                    .after(apply_interact_requests)
                    .after(apply_trigger_events)
                    .after(dispatch_tween_completions),
            );
    }
}
