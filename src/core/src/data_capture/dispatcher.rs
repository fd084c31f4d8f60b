//! Fan-out of event records to the recording backends.
//!
//! The [`EventDispatcher`] is built once at startup from the sink enable flags, shared by every
//! session behind an `Arc`, and dropped when the process exits. It holds no per-session state.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::configuration::config::Config;
use crate::storage::console_sink::ConsoleSink;
use crate::storage::file_sink::FileSink;
use crate::storage::index_sink::IndexSink;
use crate::storage::sink_trait::EventSink;

use super::types::EventRecord;

#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Builds a dispatcher holding every sink enabled in `config`.
    ///
    /// A sink that cannot be initialised is logged and left out, startup continues without it.
    /// Must run inside a tokio runtime when the index sink is enabled.
    pub fn from_config(config: &Config) -> Self {
        let mut dispatcher = Self::new();

        if config.sinks.screen {
            dispatcher.register(Arc::new(ConsoleSink::stdout()));
        }

        if config.sinks.file {
            match FileSink::open(&config.file.path) {
                Ok(sink) => dispatcher.register(Arc::new(sink)),
                Err(e) => error!(
                    "Unable to open event file {}: {}, file sink disabled",
                    config.file.path.display(),
                    e
                ),
            }
        }

        if config.sinks.elasticsearch {
            match IndexSink::spawn(&config.elasticsearch) {
                Ok(sink) => dispatcher.register(Arc::new(sink)),
                Err(e) => error!("Unable to start index sink: {}, index sink disabled", e),
            }
        }

        info!("Event dispatcher ready with sinks: {:?}", dispatcher.sink_names());
        dispatcher
    }

    pub fn register(&mut self, sink: Arc<dyn EventSink>) {
        debug!("Registering sink {}", sink.name());
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.register(sink);
        self
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Forwards `event` to every registered sink.
    ///
    /// Failures are logged per sink and swallowed: one broken backend neither stops delivery
    /// to the others nor reaches the calling session.
    pub fn handle(&self, event: &EventRecord) {
        for sink in &self.sinks {
            if let Err(e) = sink.record(event) {
                warn!(
                    "[{}] sink {} failed to record {} event: {}",
                    event.session_id,
                    sink.name(),
                    event.event_type,
                    e
                );
            }
        }
    }
}
