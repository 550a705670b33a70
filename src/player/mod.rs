//! Player module - movement and the input side of interactions.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
