//! Recording backends
//!
//! This module provides the `EventSink` abstraction and its implementations.
//!
//! Components:
//! - `sink_trait`: the EventSink trait every backend implements.
//! - `console_sink`: human-readable lines on stdout (`screen`).
//! - `file_sink`: append-only JSON-lines file (`file`).
//! - `index_sink`: queued HTTP delivery to a search index (`elasticsearch`).
//! - `memory_sink`: in-memory recorder for inspection and embedding.

pub mod console_sink;
pub mod file_sink;
pub mod index_sink;
pub mod memory_sink;
pub mod sink_trait;

pub use sink_trait::EventSink;
