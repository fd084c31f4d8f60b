pub mod dispatcher;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use types::{ConnectionEndpoints, EventRecord, EventType};
