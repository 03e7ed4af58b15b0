use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::event::{EditorEvent, EventHandler};

/// Writes every event to the log at debug level
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        log::debug!("{:?}", event);
    }
}

/// Keeps the most recent events. Clones share the same buffer, so one clone can be
/// subscribed to the bus while another is read by the UI.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: Arc<Mutex<VecDeque<EditorEvent>>>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Oldest first
    pub fn entries(&self) -> Vec<EditorEvent> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(event.clone());
    }
}
