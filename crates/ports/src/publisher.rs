use std::sync::Mutex;

use crate::events::Event;

/// Capability for emitting engine events
///
/// The engine core only ever calls `publish`; transport, serialization and
/// queue durability belong to whatever sits behind the implementation.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: Event);
}

/// Publisher that records every event in memory
///
/// Lets tests assert on the exact sequence of emitted events instead of
/// mocking the publishing side effect.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<Event>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events published so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Drain and return all recorded events
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().expect("event log poisoned"))
    }

    pub fn last(&self) -> Option<Event> {
        self.events.lock().expect("event log poisoned").last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("event log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) {
        self.events.lock().expect("event log poisoned").push(event);
    }
}
