//! Interaction messages broadcast between systems.
use bevy::prelude::{Entity, Message};

use crate::hint::HintState;

use super::components::InteractableKind;

/// Host-side trigger notifications for one interactable.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Entered(Entity),
    Exited(Entity),
    BecameInvisible(Entity),
}

/// Fired after `interact()` ran for an interactable.
#[derive(Message, Debug, Clone)]
pub struct InteractionPerformedEvent {
    pub entity: Entity,
    pub kind: InteractableKind,
    pub label: String,
    /// Controller state right after `interact()` returned.
    pub hint_state: HintState,
    /// First listener failure, if any listener failed.
    pub listener_error: Option<String>,
}

/// Fired when an entity was deactivated after leaving the screen.
#[derive(Message, Debug, Clone)]
pub struct InteractableDisappearedEvent {
    pub entity: Entity,
    pub label: String,
}

/// Issued by the input layer when the player asks to interact with `entity`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractRequestEvent {
    pub entity: Entity,
}
