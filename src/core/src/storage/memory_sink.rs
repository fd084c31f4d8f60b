use std::sync::Mutex;

use crate::data_capture::types::EventRecord;
use crate::error_handling::types::SinkError;

use super::sink_trait::EventSink;

/// Keeps every recorded event in memory, in arrival order.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<EventRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<EventRecord> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn record(&self, event: &EventRecord) -> Result<(), SinkError> {
        self.events
            .lock()
            .map_err(|_| SinkError::Unavailable(String::from("memory sink poisoned")))?
            .push(event.clone());
        Ok(())
    }
}
