//! Process-wide keyboard shortcut registry
//!
//! A mounted problem session installs one listener for its whole lifetime.
//! The listener never captures the draft text; it holds a `watch::Receiver`
//! onto the session's draft cell and reads it at dispatch time, so it always
//! sees the current draft. Dropping the returned [`ShortcutGuard`] uninstalls
//! the listener.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::debug;

use sqlbench_core::format_sql;

use crate::input_key::InputKey;
use crate::message::Message;

/// Maps accelerators onto messages for the current draft
#[derive(Debug)]
pub struct DraftShortcuts {
    draft: watch::Receiver<String>,
}

impl DraftShortcuts {
    pub fn new(draft: watch::Receiver<String>) -> Self {
        Self { draft }
    }

    /// Ctrl+Enter runs the query, Ctrl+Q formats the draft in place.
    fn handle(&self, key: &InputKey) -> Option<Message> {
        match key {
            InputKey::CtrlEnter => Some(Message::RunQuery),
            InputKey::CharCtrl('q') => {
                let formatted = format_sql(&self.draft.borrow());
                Some(Message::EditDraft { text: formatted })
            }
            _ => None,
        }
    }
}

type ListenerList = Vec<(u64, DraftShortcuts)>;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    listeners: ListenerList,
}

/// Shared list of installed shortcut listeners
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener; it stays active until the guard is dropped.
    pub fn install(&self, listener: DraftShortcuts) -> ShortcutGuard {
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.listeners.push((id, listener));
        debug!("Installed shortcut listener {}", id);
        ShortcutGuard {
            id,
            registry: self.inner.clone(),
        }
    }

    /// First message produced by any installed listener
    pub fn dispatch(&self, key: &InputKey) -> Option<Message> {
        self.lock()
            .listeners
            .iter()
            .find_map(|(_, listener)| listener.handle(key))
    }

    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Uninstalls its listener on drop
#[derive(Debug)]
pub struct ShortcutGuard {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl Drop for ShortcutGuard {
    fn drop(&mut self) {
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        registry.listeners.retain(|(id, _)| *id != self.id);
        debug!("Removed shortcut listener {}", self.id);
    }
}
