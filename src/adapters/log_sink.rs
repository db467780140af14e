//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every train control notification
//! through the `log` facade.  Hosts without a sound system use it as their
//! only handler; others add it next to their sound adapter via
//! [`EventHandlers`](super::fanout::EventHandlers).

use log::info;

use crate::app::events::TcsEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`TcsEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TcsEvent) {
        self.emitted += 1;
        match event {
            TcsEvent::Info1 | TcsEvent::Info2 => info!("SOUND | {}", event.name()),
            TcsEvent::Penalty1 | TcsEvent::Penalty2 => info!("SOUND | {} (penalty)", event.name()),
            TcsEvent::SystemActivate | TcsEvent::SystemDeactivate => {
                info!("TCS | {}", event.name());
            }
        }
    }
}
