//! Engine-agnostic interaction hint state machine and the capabilities it drives.
pub mod controller;
pub mod errors;
pub mod listeners;
pub mod policy;
pub mod scheduler;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{HintPhase, HintState, HintSurface, InteractionHintController};
pub use errors::{HintSettingsError, InteractError, ListenerError};
pub use listeners::{InteractionListener, ListenerId};
pub use policy::{ConsumeScope, ConsumptionPolicy};
pub use scheduler::{AnimationScheduler, EntityLifecycle, TweenHandle};
pub use settings::HintSettings;
