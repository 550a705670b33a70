//! Messages emitted by the tween backend.
use bevy::prelude::{Entity, Message};

use crate::hint::scheduler::TweenHandle;

/// A non-looping tween on `hint` ran to completion. Never sent for cancelled tweens.
#[derive(Message, Debug, Clone, Copy)]
pub struct TweenCompleted {
    pub hint: Entity,
    pub handle: TweenHandle,
}
