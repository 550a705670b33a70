//! Components attaching interaction hints to scene entities.
use std::fmt;

use bevy::prelude::*;

use crate::hint::{ConsumptionPolicy, InteractionHintController};

/// Which flavour of interactable an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractableKind {
    Npc,
    Object,
}

impl InteractableKind {
    pub fn default_policy(self) -> ConsumptionPolicy {
        match self {
            Self::Npc => ConsumptionPolicy::npc(),
            Self::Object => ConsumptionPolicy::object(),
        }
    }
}

impl fmt::Display for InteractableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Npc => "npc",
            Self::Object => "object",
        };
        write!(f, "{}", label)
    }
}

/// An entity the player can interact with. The controller is built by the
/// initialization system once the linked hint entity exists.
#[derive(Component, Debug)]
pub struct Interactable {
    pub kind: InteractableKind,
    pub label: String,
    policy: ConsumptionPolicy,
    controller: Option<InteractionHintController>,
}

impl Interactable {
    pub fn new(kind: InteractableKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            policy: kind.default_policy(),
            controller: None,
        }
    }

    pub fn with_policy(mut self, policy: ConsumptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConsumptionPolicy {
        self.policy
    }

    pub fn is_initialized(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&InteractionHintController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut InteractionHintController> {
        self.controller.as_mut()
    }

    pub(crate) fn attach(&mut self, controller: InteractionHintController) {
        self.controller = Some(controller);
    }
}

/// Points from an interactable to its hint entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct HintLink(pub Entity);

/// Points from a hint entity back to its interactable.
#[derive(Component, Debug, Clone, Copy)]
pub struct HintOwner(pub Entity);

/// Circular trigger area around an interactable (radius in pixels).
#[derive(Component, Debug, Clone, Copy)]
pub struct TriggerZone {
    pub radius: f32,
    occupied: bool,
}

impl TriggerZone {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            occupied: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Records whether the player is inside; returns `true` when that changed.
    pub fn update_occupancy(&mut self, inside: bool) -> bool {
        let changed = self.occupied != inside;
        self.occupied = inside;
        changed
    }
}

/// Remembers last frame's render visibility so losses can be detected.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct VisibilityWatch {
    was_visible: bool,
}

impl VisibilityWatch {
    /// Returns `true` on a visible -> invisible transition.
    pub fn observe(&mut self, visible: bool) -> bool {
        let lost = self.was_visible && !visible;
        self.was_visible = visible;
        lost
    }
}

/// Marks entities removed from play by the disappearance behaviour.
#[derive(Component, Debug, Clone, Copy)]
pub struct Deactivated;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_reports_only_changes() {
        let mut zone = TriggerZone::new(10.0);
        assert!(!zone.update_occupancy(false));
        assert!(zone.update_occupancy(true));
        assert!(!zone.update_occupancy(true));
        assert!(zone.is_occupied());
        assert!(zone.update_occupancy(false));
    }

    #[test]
    fn visibility_watch_detects_loss_once() {
        let mut watch = VisibilityWatch::default();
        assert!(!watch.observe(false));
        assert!(!watch.observe(true));
        assert!(watch.observe(false));
        assert!(!watch.observe(false));
    }

    #[test]
    fn kind_picks_matching_policy() {
        let npc = Interactable::new(InteractableKind::Npc, "Mira");
        assert_eq!(npc.policy(), ConsumptionPolicy::npc());
        assert!(!npc.is_initialized());

        let chest = Interactable::new(InteractableKind::Object, "Chest")
            .with_policy(ConsumptionPolicy::npc());
        assert!(chest.policy().consume_on_clear);
    }
}
