//! Per-connection dialogue of the honeypot.
//!
//! This module provides the login/shell state machine driven by the network layer, the fake
//! command interpreter it falls into after a successful login, and the boundary traits and
//! shared context it depends on.

use std::fmt;

/// Submodule holding the dependencies shared by every session.
pub mod context;
/// Submodule for the state machine itself.
pub mod session;
/// Submodule for the canned command interpreter.
pub mod shell;
/// Submodule for the write/close boundary towards the connection.
pub mod transport;

pub use context::SessionContext;
pub use session::TelnetSession;
pub use transport::Transport;

/// Where a session currently is in its dialogue.
///
/// Variants:
/// - `AwaitingUsername`: the login prompt was sent, the next line is a username.
/// - `AwaitingPassword`: a username was captured, the next line is its password.
/// - `Shell`: logged in, every line is a shell command.
/// - `Closed`: the connection is gone, nothing is processed or emitted anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingUsername,
    AwaitingPassword,
    Shell,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::AwaitingUsername => "AWAITING_USERNAME",
            SessionState::AwaitingPassword => "AWAITING_PASSWORD",
            SessionState::Shell => "SHELL",
            SessionState::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}
