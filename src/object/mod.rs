//! Interactable props (chests, signs, levers).
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ObjectPlugin;
