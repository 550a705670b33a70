//! Ordered registry of interaction callbacks.
use std::fmt;

use super::errors::{InteractError, ListenerError};

/// Callback invoked when the player interacts with an entity.
pub type InteractionListener = Box<dyn FnMut() -> Result<(), ListenerError> + Send + Sync>;

/// Identifies one registration so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Listeners in registration order. Registering the same closure twice
/// yields two entries; callers own idempotence.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, InteractionListener)>,
}

impl ListenerRegistry {
    pub fn add(&mut self, listener: InteractionListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Removes the matching registration. Returns `false` if it was absent.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes every listener once, in order. A failing listener does not
    /// stop the rest; the first failure is reported.
    pub fn invoke_all(&mut self) -> Result<(), InteractError> {
        let mut failed = 0;
        let mut first = None;
        for (_, listener) in self.entries.iter_mut() {
            if let Err(err) = listener() {
                failed += 1;
                first.get_or_insert(err);
            }
        }

        match first {
            Some(first) => Err(InteractError::listener(failed, first)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
