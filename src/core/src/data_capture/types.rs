use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use uuid::Uuid;

/// Tag identifying the protocol module that produced an event.
pub const EVENT_SOURCE: &str = "TELNET";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Connected,
    Disconnected,
    Login,
    Shell,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::Connected => "connected",
            EventType::Disconnected => "disconnected",
            EventType::Login => "login",
            EventType::Shell => "shell",
        };
        f.write_str(name)
    }
}

/// Addresses of one connection, captured once when it is accepted.
///
/// The local side is optional since the OS may refuse to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionEndpoints {
    pub peer: SocketAddr,
    pub local: Option<SocketAddr>,
}

/// Immutable snapshot of one observable action.
///
/// Serialized field names follow the layout of the analysis index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "module")]
    pub source: String,
    #[serde(rename = "@timestamp")]
    pub timestamp_millis: i64,
    #[serde(rename = "sourceIPv4Address")]
    pub peer_address: String,
    #[serde(rename = "sourceTransportPort")]
    pub peer_port: u16,
    #[serde(
        rename = "destinationIPv4Address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_address: Option<String>,
    #[serde(
        rename = "destinationTransportPort",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_port: Option<u16>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(rename = "command")]
    pub detail: String,
    pub success: bool,
    #[serde(rename = "session")]
    pub session_id: Uuid,
}

impl EventRecord {
    /// Builds a record stamped with the current wall-clock time.
    pub fn new(
        event_type: EventType,
        detail: impl Into<String>,
        success: bool,
        session_id: Uuid,
        endpoints: &ConnectionEndpoints,
    ) -> Self {
        Self {
            source: EVENT_SOURCE.to_string(),
            timestamp_millis: Utc::now().timestamp_millis(),
            peer_address: endpoints.peer.ip().to_string(),
            peer_port: endpoints.peer.port(),
            local_address: endpoints.local.map(|addr| addr.ip().to_string()),
            local_port: endpoints.local.map(|addr| addr.port()),
            event_type,
            detail: detail.into(),
            success,
            session_id,
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}:{} {}",
            self.timestamp_millis, self.session_id, self.peer_address, self.peer_port, self.event_type
        )?;
        if self.event_type == EventType::Login {
            write!(f, " success={}", self.success)?;
        }
        if !self.detail.is_empty() {
            write!(f, " {}", self.detail)?;
        }
        Ok(())
    }
}
