use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::data_capture::types::{ConnectionEndpoints, EventRecord, EventType};

use super::context::SessionContext;
use super::shell::{self, CLEAR_SCREEN, LOGIN_BANNER, SHELL_PROMPT};
use super::transport::Transport;
use super::SessionState;

pub const USERNAME_PROMPT: &str = "Username: ";
pub const PASSWORD_PROMPT: &str = "Password: ";
const LOGIN_FAILED: &str = "Sorry, something went wrong. Please try again.\r\n\r\n";

/// State machine of one telnet connection, from accept to close.
///
/// The network layer owns the session exclusively and calls [`on_connect`](Self::on_connect)
/// once, [`on_line`](Self::on_line) for every received line and
/// [`on_disconnect`](Self::on_disconnect) once the connection is gone. Each observable action
/// produces an [`EventRecord`] handed synchronously to the shared dispatcher.
///
/// Addresses are captured at construction and never queried again, so the disconnect event
/// still reports the peer after the socket is torn down.
pub struct TelnetSession {
    id: Uuid,
    state: SessionState,
    pending_username: String,
    endpoints: ConnectionEndpoints,
    context: Arc<SessionContext>,
}

impl TelnetSession {
    pub fn new(context: Arc<SessionContext>, endpoints: ConnectionEndpoints) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::AwaitingUsername,
            pending_username: String::new(),
            endpoints,
            context,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn on_connect(&mut self, transport: &mut dyn Transport) {
        info!("[{}] connection from {}", self.id, self.endpoints.peer);
        self.emit(EventType::Connected, String::new(), false);
        transport.write(USERNAME_PROMPT);
        self.transition(SessionState::AwaitingUsername);
    }

    /// Emits the disconnect event once; later calls do nothing.
    pub fn on_disconnect(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.emit(EventType::Disconnected, String::new(), false);
        self.transition(SessionState::Closed);
        info!("[{}] {} disconnected", self.id, self.endpoints.peer);
    }

    /// Interprets one line of input. Any text is valid in every state.
    pub fn on_line(&mut self, line: &str, transport: &mut dyn Transport) {
        match self.state {
            SessionState::AwaitingUsername => self.receive_username(line, transport),
            SessionState::AwaitingPassword => self.receive_password(line, transport),
            SessionState::Shell => self.receive_command(line, transport),
            SessionState::Closed => {
                debug!("[{}] line after disconnect ignored", self.id);
            }
        }
    }

    fn receive_username(&mut self, line: &str, transport: &mut dyn Transport) {
        self.pending_username = line.to_string();
        transport.write(PASSWORD_PROMPT);
        self.transition(SessionState::AwaitingPassword);
    }

    fn receive_password(&mut self, password: &str, transport: &mut dyn Transport) {
        let username = std::mem::take(&mut self.pending_username);
        let accepted = self.context.credentials.accepts(&username, password);

        self.emit(
            EventType::Login,
            format!("Credentials: {}:{}", username, password),
            accepted,
        );
        transport.write(CLEAR_SCREEN);

        if accepted {
            info!("[{}] login accepted for {:?}", self.id, username);
            transport.write(LOGIN_BANNER);
            transport.write(SHELL_PROMPT);
            self.transition(SessionState::Shell);
        } else {
            debug!("[{}] login rejected for {:?}", self.id, username);
            transport.write(LOGIN_FAILED);
            transport.write(USERNAME_PROMPT);
            self.transition(SessionState::AwaitingUsername);
        }
    }

    fn receive_command(&mut self, line: &str, transport: &mut dyn Transport) {
        let command = line.trim().to_lowercase();
        self.emit(EventType::Shell, command.clone(), false);

        shell::execute(&command, &self.context.hostname, transport);
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!("[{}] {} -> {}", self.id, self.state, next);
        }
        self.state = next;
    }

    fn emit(&self, event_type: EventType, detail: String, success: bool) {
        let event = EventRecord::new(event_type, detail, success, self.id, &self.endpoints);
        self.context.dispatcher.handle(&event);
    }
}
