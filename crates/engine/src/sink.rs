//! Notification sinks
//!
//! The session forwards every [`CoreEvent`] to a sink after it has been
//! persisted where needed. Sinks are fire-and-forget; nothing flows back.

use crate::types::CoreEvent;

pub trait EventSink {
    fn notify(&mut self, event: &CoreEvent);
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &CoreEvent) {}
}

/// Keeps every event in order (useful for tests and replays)
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CoreEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CoreEvent] {
        &self.events
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &CoreEvent) {
        self.events.push(*event);
    }
}

impl<F: FnMut(&CoreEvent)> EventSink for F {
    fn notify(&mut self, event: &CoreEvent) {
        self(event)
    }
}
