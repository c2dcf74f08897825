use rjecnik_types::Entry;

use crate::store::Removed;

/// Value capture of a deletion. Holds a copy, never a reference into a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoToken {
    pub namespace: String,
    pub entry: Entry,
    pub index: usize,
}

/// Single-slot buffer: a second deletion replaces the first
#[derive(Debug, Default)]
pub struct UndoBuffer {
    pending: Option<UndoToken>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, namespace: &str, removed: Removed) {
        if let Some(previous) = &self.pending {
            tracing::debug!("Dropping undo for '{}'", previous.entry.word);
        }
        self.pending = Some(UndoToken {
            namespace: namespace.to_string(),
            entry: removed.entry,
            index: removed.index,
        });
    }

    pub fn take(&mut self) -> Option<UndoToken> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<&UndoToken> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
