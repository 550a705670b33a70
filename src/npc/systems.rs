//! Systems connecting NPC dialogue to interaction listeners.
use bevy::log::{info, warn};
use bevy::prelude::*;

use crate::{
    hint::{InteractionListener, ListenerError},
    interaction::{
        systems::with_hint_scheduler, HintLink, Interactable, InteractableKind,
        InteractionPerformedEvent,
    },
    npc::components::NpcDialogue,
    tween::TweenPlayer,
};

/// Listener that speaks one line. Blank lines are reported as failures.
pub fn line_listener(speaker: &str, line: &str) -> InteractionListener {
    let speaker = speaker.to_string();
    let line = line.trim().to_string();
    Box::new(move || {
        if line.is_empty() {
            return Err(ListenerError::new(format!("{} has an empty line", speaker)));
        }
        info!(target: "dialogue", "{}: \"{}\"", speaker, line);
        Ok(())
    })
}

/// Registers the first line's listener once the NPC's controller exists.
pub fn prime_npc_dialogue(
    mut npcs: Query<(&mut Interactable, &mut NpcDialogue, Option<&HintLink>)>,
    mut players: Query<&mut TweenPlayer>,
) {
    for (mut interactable, mut dialogue, link) in npcs.iter_mut() {
        if dialogue.is_primed() || !interactable.is_initialized() {
            continue;
        }
        let Some(controller) = interactable.controller_mut() else {
            continue;
        };

        match dialogue.current_line() {
            Some(line) => {
                controller.add_listener(line_listener(&dialogue.speaker, line));
            }
            None => {
                warn!("{} has no dialogue lines", dialogue.speaker);
                with_hint_scheduler(&mut players, link, |scheduler| {
                    controller.clear_listeners(scheduler)
                });
            }
        }
        dialogue.mark_primed();
    }
}

/// After each conversation, queue the next line or retire the NPC.
pub fn advance_npc_dialogue(
    mut performed: MessageReader<InteractionPerformedEvent>,
    mut npcs: Query<(&mut Interactable, &mut NpcDialogue, Option<&HintLink>)>,
    mut players: Query<&mut TweenPlayer>,
) {
    for event in performed.read() {
        if event.kind != InteractableKind::Npc {
            continue;
        }
        let Ok((mut interactable, mut dialogue, link)) = npcs.get_mut(event.entity) else {
            continue;
        };
        let Some(controller) = interactable.controller_mut() else {
            continue;
        };

        let speaker = dialogue.speaker.clone();
        let next_line = dialogue.advance().map(str::to_string);
        match next_line {
            Some(line) => {
                controller.add_listener(line_listener(&speaker, &line));
            }
            None => {
                with_hint_scheduler(&mut players, link, |scheduler| {
                    controller.clear_listeners(scheduler)
                });
                info!("{} has nothing more to say", speaker);
                if dialogue.leaves_when_done {
                    controller.set_disappear_on_invisible(true);
                    info!("{} will leave once off-screen", speaker);
                }
            }
        }
    }
}
