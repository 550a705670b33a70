//! Interaction module: binds hint controllers to scene entities.
//!
//! - Trigger source: player proximity (enter/exit) and render visibility loss
//! - One `InteractionHintController` per `Interactable`, built at initialization
//! - Interact requests from the input layer dispatch listeners
pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod systems;
pub mod trigger;

pub use components::{
    Deactivated, HintLink, HintOwner, Interactable, InteractableKind, TriggerZone,
    VisibilityWatch,
};
pub use config::InteractionConfig;
pub use events::{
    InteractRequestEvent, InteractableDisappearedEvent, InteractionPerformedEvent, TriggerEvent,
};
pub use plugin::InteractionPlugin;
