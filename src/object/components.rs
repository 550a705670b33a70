//! Components for interactable props.
use bevy::prelude::*;

use crate::hint::ConsumptionPolicy;

/// What a prop does when used.
#[derive(Component, Debug, Clone)]
pub struct ObjectReaction {
    pub message: String,
    /// Re-arm the listener after every use.
    pub repeatable: bool,
    primed: bool,
}

impl ObjectReaction {
    pub fn once(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            repeatable: false,
            primed: false,
        }
    }

    pub fn repeatable(message: impl Into<String>) -> Self {
        Self {
            repeatable: true,
            ..Self::once(message)
        }
    }

    /// One-shot props stay consumed after use; repeatable ones recover once
    /// the hint has hidden.
    pub fn policy(&self) -> ConsumptionPolicy {
        if self.repeatable {
            ConsumptionPolicy::object()
        } else {
            ConsumptionPolicy::single_use()
        }
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub(crate) fn mark_primed(&mut self) {
        self.primed = true;
    }
}
