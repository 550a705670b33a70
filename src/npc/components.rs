//! NPC-specific components.
use bevy::prelude::*;

/// Lines an NPC speaks, one per interaction.
#[derive(Component, Debug, Clone)]
pub struct NpcDialogue {
    pub speaker: String,
    lines: Vec<String>,
    cursor: usize,
    primed: bool,
    /// Walk away (disappear once off-screen) after the last line.
    pub leaves_when_done: bool,
}

impl NpcDialogue {
    pub fn new<I, S>(speaker: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            speaker: speaker.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: 0,
            primed: false,
            leaves_when_done: false,
        }
    }

    pub fn leaving_when_done(mut self) -> Self {
        self.leaves_when_done = true;
        self
    }

    pub fn current_line(&self) -> Option<&str> {
        self.lines.get(self.cursor).map(String::as_str)
    }

    /// Moves to the next line and returns it, if any remain.
    pub fn advance(&mut self) -> Option<&str> {
        if self.cursor < self.lines.len() {
            self.cursor += 1;
        }
        self.current_line()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub(crate) fn mark_primed(&mut self) {
        self.primed = true;
    }
}
