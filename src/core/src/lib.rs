pub mod configuration;
pub mod controller;
pub mod data_capture;
pub mod error_handling;
pub mod network;
pub mod session_management;
pub mod storage;

pub use controller::Controller;
pub use data_capture::{EventDispatcher, EventRecord, EventType};
pub use session_management::{SessionState, TelnetSession};
