//! Consumption rules that decide when a controller stops reacting to triggers.

/// How long an interaction keeps the controller consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumeScope {
    /// Consumed until a listener is registered again.
    UntilRelisten,
    /// Consumed until the hide sequence started by the interaction finishes.
    CurrentCycle,
}

/// Explicit consumption policy for one interactable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumptionPolicy {
    pub on_interact: ConsumeScope,
    /// Whether `clear_listeners()` consumes the controller on its own.
    pub consume_on_clear: bool,
}

impl ConsumptionPolicy {
    /// Characters whose current line is exhausted until new listeners arrive.
    pub const fn npc() -> Self {
        Self {
            on_interact: ConsumeScope::UntilRelisten,
            consume_on_clear: true,
        }
    }

    /// Props that can be used again once the hint has finished hiding.
    pub const fn object() -> Self {
        Self {
            on_interact: ConsumeScope::CurrentCycle,
            consume_on_clear: false,
        }
    }

    /// Props that react once and stay spent until a listener is registered again.
    pub const fn single_use() -> Self {
        Self {
            on_interact: ConsumeScope::UntilRelisten,
            consume_on_clear: false,
        }
    }
}

impl Default for ConsumptionPolicy {
    fn default() -> Self {
        Self::object()
    }
}
