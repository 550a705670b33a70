//! Tween backend animating hint opacity and position.
pub mod events;
pub mod player;
pub mod plugin;
pub mod systems;

pub use events::TweenCompleted;
pub use player::TweenPlayer;
pub use plugin::{TweenPlugin, TweenSet};
