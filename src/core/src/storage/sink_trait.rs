//! Sink Trait
//!
//! This module defines the `EventSink` trait, the single operation every recording backend
//! implements.
//!
//! A sink may be called concurrently from any number of sessions, so implementors that hold
//! shared mutable state (a file handle, a network client) synchronise or queue internally.

use crate::data_capture::types::EventRecord;
use crate::error_handling::types::SinkError;

/// A recording backend that stores or displays event records.
pub trait EventSink: Send + Sync {
    /// Short identifier used in logs, e.g. `file` or `elasticsearch`.
    fn name(&self) -> &str;

    /// Records one event.
    ///
    /// - `event` - The immutable record to store. Every enabled sink receives the same record.
    fn record(&self, event: &EventRecord) -> Result<(), SinkError>;
}
