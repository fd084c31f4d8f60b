use std::io::{self, Write};
use std::sync::Mutex;

use crate::data_capture::types::EventRecord;
use crate::error_handling::types::SinkError;

use super::sink_trait::EventSink;

/// Prints one human-readable line per event.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl EventSink for ConsoleSink {
    fn name(&self) -> &str {
        "screen"
    }

    fn record(&self, event: &EventRecord) -> Result<(), SinkError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| SinkError::Unavailable(String::from("console writer poisoned")))?;
        writeln!(out, "{}", event)?;
        out.flush()?;
        Ok(())
    }
}
