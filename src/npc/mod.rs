//! NPC module: dialogue lines delivered through interaction listeners.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::NpcPlugin;
