//! In-memory event sink for tests and diagnostics.
//!
//! Stores every notification so a test can assert on the exact sequence the
//! dispatch router produced.

use std::sync::{Mutex, PoisonError};

use super::{EventReceiver, InputEvent};

/// Records every event it receives, in order.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<InputEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    pub fn events(&self) -> Vec<InputEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns every event recorded so far.
    pub fn take(&self) -> Vec<InputEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventReceiver for MemoryEventSink {
    fn receive(&self, event: InputEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
