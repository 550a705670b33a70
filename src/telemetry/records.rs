//! Telemetry of hint state: every controller transition, interaction and
//! disappearance, kept in memory and appended to a JSONL history.
use std::{
    collections::{HashMap, VecDeque},
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::{
    hint::HintState,
    interaction::{Interactable, InteractableDisappearedEvent, InteractionPerformedEvent},
};

use super::config::TelemetrySettings;

/// One thing that happened to an interactable's hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum HintActivity {
    /// The controller moved between observable states.
    Transition { from: String, to: String },
    Interacted {
        kind: String,
        /// Controller state right after the listeners ran.
        state_after: String,
        listener_error: Option<String>,
    },
    Disappeared,
}

/// Single telemetry entry.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    pub occurred_at_seconds: f64,
    pub label: String,
    pub activity: HintActivity,
}

/// Recent hint activity plus the last state seen per interactable, which is
/// what transitions are measured against.
#[derive(Resource, Debug)]
pub struct InteractionTelemetry {
    capacity: usize,
    records: VecDeque<InteractionRecord>,
    last_seen: HashMap<Entity, HintState>,
}

impl InteractionTelemetry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::with_capacity(capacity.max(1)),
            last_seen: HashMap::new(),
        }
    }

    fn record(&mut self, record: InteractionRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Notes `state` for `entity`, returning the previous state when it differs.
    /// The first observation only seeds the baseline.
    fn observe(&mut self, entity: Entity, state: HintState) -> Option<HintState> {
        match self.last_seen.insert(entity, state) {
            Some(previous) if previous != state => Some(previous),
            _ => None,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter()
    }

    /// Activity recorded for one interactable, oldest first.
    pub fn activity_of<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a HintActivity> {
        self.records
            .iter()
            .filter(move |record| record.label == label)
            .map(|record| &record.activity)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// JSONL lines serialized at record time and appended to disk on flush.
#[derive(Resource, Debug)]
pub struct InteractionTelemetryLog {
    path: PathBuf,
    lines: Vec<String>,
}

impl InteractionTelemetryLog {
    pub fn from_settings(settings: &TelemetrySettings) -> Self {
        Self {
            path: settings.log_path.clone(),
            lines: Vec::new(),
        }
    }

    pub fn append(&mut self, record: &InteractionRecord) -> serde_json::Result<()> {
        self.lines.push(serde_json::to_string(record)?);
        Ok(())
    }

    /// Writes every pending line. Lines stay queued if the file cannot be opened.
    pub fn write_pending(&mut self) -> std::io::Result<usize> {
        if self.lines.is_empty() {
            return Ok(0);
        }
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut buffer = self.lines.join("\n");
        buffer.push('\n');
        file.write_all(buffer.as_bytes())?;
        Ok(std::mem::take(&mut self.lines).len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pending(&self) -> usize {
        self.lines.len()
    }
}

fn store(
    telemetry: &mut InteractionTelemetry,
    log: &mut InteractionTelemetryLog,
    record: InteractionRecord,
) {
    if let Err(err) = log.append(&record) {
        warn!(target: "telemetry", "Could not serialize {} telemetry: {}", record.label, err);
    }
    telemetry.record(record);
}

/// Records controller state changes on interactables touched this frame.
pub fn record_hint_transitions(
    time: Res<Time>,
    mut telemetry: ResMut<InteractionTelemetry>,
    mut log: ResMut<InteractionTelemetryLog>,
    interactables: Query<(Entity, &Interactable), Changed<Interactable>>,
) {
    let now = time.elapsed_secs_f64();
    for (entity, interactable) in interactables.iter() {
        let Some(state) = interactable.controller().map(|controller| controller.state()) else {
            continue;
        };
        let Some(previous) = telemetry.observe(entity, state) else {
            continue;
        };
        let record = InteractionRecord {
            occurred_at_seconds: now,
            label: interactable.label.clone(),
            activity: HintActivity::Transition {
                from: previous.to_string(),
                to: state.to_string(),
            },
        };
        store(&mut telemetry, &mut log, record);
    }
}

/// Records interactions and disappearances reported by the interaction systems.
pub fn record_interaction_telemetry(
    time: Res<Time>,
    mut telemetry: ResMut<InteractionTelemetry>,
    mut log: ResMut<InteractionTelemetryLog>,
    mut performed: MessageReader<InteractionPerformedEvent>,
    mut disappeared: MessageReader<InteractableDisappearedEvent>,
) {
    let now = time.elapsed_secs_f64();

    for event in performed.read() {
        let record = InteractionRecord {
            occurred_at_seconds: now,
            label: event.label.clone(),
            activity: HintActivity::Interacted {
                kind: event.kind.to_string(),
                state_after: event.hint_state.to_string(),
                listener_error: event.listener_error.clone(),
            },
        };
        store(&mut telemetry, &mut log, record);
    }

    for event in disappeared.read() {
        let record = InteractionRecord {
            occurred_at_seconds: now,
            label: event.label.clone(),
            activity: HintActivity::Disappeared,
        };
        store(&mut telemetry, &mut log, record);
    }
}

/// Appends pending lines to the history file, warning when that fails.
pub fn flush_interaction_telemetry_log(mut log: ResMut<InteractionTelemetryLog>) {
    if log.pending() == 0 {
        return;
    }
    match log.write_pending() {
        Ok(written) => debug!(target: "telemetry", "Appended {} telemetry lines", written),
        Err(err) => warn!(
            target: "telemetry",
            "Failed to persist interaction telemetry to {:?}: {}",
            log.path(),
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hint::{HintSettings, HintSurface, InteractionHintController},
        interaction::InteractableKind,
        tween::TweenPlayer,
    };
    use bevy::ecs::{message::Messages, system::RunSystemOnce};
    use serde_json::Value;
    use std::{env, fs, process, time::SystemTime};

    fn telemetry_world(log_path: PathBuf) -> World {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(InteractionTelemetry::new(8));
        world.insert_resource(InteractionTelemetryLog::from_settings(&TelemetrySettings {
            capacity: 8,
            log_path,
        }));
        world.init_resource::<Messages<InteractionPerformedEvent>>();
        world.init_resource::<Messages<InteractableDisappearedEvent>>();
        world
    }

    fn spawn_degraded(world: &mut World, label: &str) -> Entity {
        let mut interactable = Interactable::new(InteractableKind::Object, label);
        interactable.attach(InteractionHintController::new(
            HintSettings::default(),
            interactable.policy(),
            Vec3::ZERO,
            HintSurface::Missing,
        ));
        world.spawn(interactable).id()
    }

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir()
            .join(format!("interaction-telemetry-{}-{}", process::id(), nanos))
            .join(name)
    }

    #[test]
    fn transitions_are_recorded_against_the_last_seen_state() {
        let mut world = telemetry_world(scratch_path("unused.jsonl"));
        let chest = spawn_degraded(&mut world, "Chest");

        world.run_system_once(record_hint_transitions).unwrap();
        assert!(world.resource::<InteractionTelemetry>().is_empty());

        world
            .get_mut::<Interactable>(chest)
            .unwrap()
            .controller_mut()
            .unwrap()
            .on_enter(&mut TweenPlayer::at(Vec3::ZERO));
        world.run_system_once(record_hint_transitions).unwrap();
        world.run_system_once(record_hint_transitions).unwrap();

        let telemetry = world.resource::<InteractionTelemetry>();
        let activity: Vec<_> = telemetry.activity_of("Chest").cloned().collect();
        assert_eq!(
            activity,
            vec![HintActivity::Transition {
                from: "idle".into(),
                to: "visible".into(),
            }]
        );
        assert_eq!(world.resource::<InteractionTelemetryLog>().pending(), 1);
    }

    #[test]
    fn rolling_history_keeps_the_newest_records() {
        let mut telemetry = InteractionTelemetry::new(2);
        for label in ["a", "b", "c"] {
            telemetry.record(InteractionRecord {
                occurred_at_seconds: 0.0,
                label: label.into(),
                activity: HintActivity::Disappeared,
            });
        }
        let labels: Vec<_> = telemetry.records().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c"]);
    }

    #[test]
    fn interactions_persist_with_their_resulting_state() {
        let path = scratch_path("history.jsonl");
        let mut world = telemetry_world(path.clone());
        let chest = spawn_degraded(&mut world, "Chest");
        world.write_message(InteractionPerformedEvent {
            entity: chest,
            kind: InteractableKind::Object,
            label: "Chest".into(),
            hint_state: HintState::Consumed,
            listener_error: Some("lid is stuck".into()),
        });
        world.write_message(InteractableDisappearedEvent {
            entity: chest,
            label: "Chest".into(),
        });

        world.run_system_once(record_interaction_telemetry).unwrap();
        world.run_system_once(flush_interaction_telemetry_log).unwrap();
        assert_eq!(world.resource::<InteractionTelemetryLog>().pending(), 0);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line should parse"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["label"], "Chest");
        assert_eq!(lines[0]["activity"]["event_type"], "interacted");
        assert_eq!(lines[0]["activity"]["state_after"], "consumed");
        assert_eq!(lines[0]["activity"]["listener_error"], "lid is stuck");
        assert_eq!(lines[1]["activity"]["event_type"], "disappeared");

        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir).ok();
        }
    }
}
