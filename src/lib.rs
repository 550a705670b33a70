//! Interaction hints for 2D scenes: a floating hint that fades and slides in
//! when the player approaches an NPC or prop, bounces while idle, and hides
//! again when the player leaves or interacts.
pub mod hint;
pub mod interaction;
pub mod npc;
pub mod object;
pub mod player;
pub mod telemetry;
pub mod tween;
pub mod world;
