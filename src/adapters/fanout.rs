//! Event fan-out.
//!
//! A locomotive usually has several listeners for train control cues (cab
//! sounds, external sounds, a recorder).  [`EventHandlers`] holds the
//! host-managed list and forwards each event to all of them in
//! registration order.

use crate::app::events::TcsEvent;
use crate::app::ports::EventSink;

/// Ordered list of event sinks.
#[derive(Default)]
pub struct EventHandlers {
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sinks.clear();
    }
}

impl EventSink for EventHandlers {
    fn emit(&mut self, event: &TcsEvent) {
        for sink in &mut self.sinks {
            sink.emit(event);
        }
    }
}
