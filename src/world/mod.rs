//! World module: demo scene with a player, NPCs and props.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
