//! Systems arming prop listeners.
use bevy::prelude::*;

use crate::{
    hint::InteractionListener,
    interaction::{Interactable, InteractableKind, InteractionPerformedEvent},
    object::components::ObjectReaction,
};

fn reaction_listener(label: &str, message: &str) -> InteractionListener {
    let label = label.to_string();
    let message = message.to_string();
    Box::new(move || {
        info!(target: "interaction", "[{}] {}", label, message);
        Ok(())
    })
}

/// Registers each prop's listener once its controller exists.
pub fn prime_object_reactions(mut objects: Query<(&mut Interactable, &mut ObjectReaction)>) {
    for (mut interactable, mut reaction) in objects.iter_mut() {
        if reaction.is_primed() || !interactable.is_initialized() {
            continue;
        }
        let label = interactable.label.clone();
        if let Some(controller) = interactable.controller_mut() {
            controller.add_listener(reaction_listener(&label, &reaction.message));
            reaction.mark_primed();
        }
    }
}

/// Re-arms repeatable props after they were used.
pub fn rearm_object_reactions(
    mut performed: MessageReader<InteractionPerformedEvent>,
    mut objects: Query<(&mut Interactable, &ObjectReaction)>,
) {
    for event in performed.read() {
        if event.kind != InteractableKind::Object {
            continue;
        }
        let Ok((mut interactable, reaction)) = objects.get_mut(event.entity) else {
            continue;
        };
        if !reaction.repeatable {
            continue;
        }
        if let Some(controller) = interactable.controller_mut() {
            controller.add_listener(reaction_listener(&event.label, &reaction.message));
        }
    }
}
