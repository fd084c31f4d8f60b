//! # Network Listener Module
//!
//! This module accepts incoming TCP connections on the configured port and hands each one to
//! its own tokio task running a telnet session.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │ Incoming        │───▶│ NetworkListener  │───▶│ serve_connection│
//! │ Connections     │    │ (accept loop)    │    │ (one task each) │
//! └─────────────────┘    └──────────────────┘    └────────┬────────┘
//!                                                         │ events
//!                                                ┌────────▼────────┐
//!                                                │ EventDispatcher │
//!                                                └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use telnetpot::configuration::types::CredentialPolicy;
//! use telnetpot::data_capture::EventDispatcher;
//! use telnetpot::error_handling::types::NetworkError;
//! use telnetpot::network::network_listener::NetworkListener;
//! use telnetpot::session_management::SessionContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), NetworkError> {
//!     let context = SessionContext::new(EventDispatcher::new(), "dc1.example.com", CredentialPolicy::default());
//!     let listener = NetworkListener::bind("0.0.0.0:2323".parse().unwrap(), Arc::new(context), 16384).await?;
//!     listener.start_listening().await
//! }
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::TcpListener;

use crate::data_capture::types::ConnectionEndpoints;
use crate::error_handling::types::NetworkError;
use crate::session_management::context::SessionContext;

use super::connection::serve_connection;

pub struct NetworkListener {
    /// Bound socket accepting telnet clients
    listener: TcpListener,

    /// Shared dependencies handed to every session
    context: Arc<SessionContext>,

    /// Longest accepted input line, in bytes
    max_line_length: usize,
}

impl NetworkListener {
    /// Binds the listening socket.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::BindError` when the address is in use or the process lacks the
    /// privileges for a port below 1024. This is the only fatal error of the service.
    pub async fn bind(
        addr: SocketAddr,
        context: Arc<SessionContext>,
        max_line_length: usize,
    ) -> Result<Self, NetworkError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            error!("[!] Unable to bind {}: {}", addr, e);
            NetworkError::BindError(e)
        })?;

        Ok(Self {
            listener,
            context,
            max_line_length,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, NetworkError> {
        self.listener.local_addr().map_err(NetworkError::BindError)
    }

    /// Accepts connections forever, one spawned task per connection.
    ///
    /// Accept failures (e.g. file descriptor exhaustion) are logged and the loop goes on.
    pub async fn start_listening(&self) -> Result<(), NetworkError> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("[!] Accept error: {}", e);
                    continue;
                }
            };

            let endpoints = ConnectionEndpoints {
                peer,
                local: stream.local_addr().ok(),
            };
            debug!("Accepted connection from {}", peer);

            let context = Arc::clone(&self.context);
            let max_line_length = self.max_line_length;
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, endpoints, context, max_line_length).await {
                    info!("Connection from {} ended: {}", peer, e);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::types::CredentialPolicy;
    use crate::data_capture::dispatcher::EventDispatcher;
    use crate::data_capture::types::EventType;
    use crate::storage::memory_sink::MemorySink;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn start() -> (SocketAddr, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let dispatcher = EventDispatcher::new().with_sink(sink.clone());
        let context = SessionContext::new(dispatcher, "honeypot-test", CredentialPolicy::default());

        let listener = NetworkListener::bind("127.0.0.1:0".parse().unwrap(), Arc::new(context), 16384)
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { listener.start_listening().await });
        (addr, sink)
    }

    async fn read_until(stream: &mut TcpStream, needle: &str) -> String {
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !String::from_utf8_lossy(&received).contains(needle) {
            let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
                .await
                .unwrap()
                .unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        String::from_utf8_lossy(&received).into_owned()
    }

    async fn wait_for_events(sink: &MemorySink, count: usize) {
        for _ in 0..100 {
            if sink.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();
        let context = SessionContext::new(EventDispatcher::new(), "h", CredentialPolicy::default());

        let result = NetworkListener::bind(addr, Arc::new(context), 16384).await;
        assert!(matches!(result, Err(NetworkError::BindError(_))));
    }

    #[tokio::test]
    async fn test_full_dialogue_over_tcp() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (addr, sink) = start().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        assert!(read_until(&mut client, "Username: ").await.ends_with("Username: "));
        client.write_all(b"administrator\r\n").await.unwrap();
        read_until(&mut client, "Password: ").await;
        client.write_all(b"test\r\n").await.unwrap();
        read_until(&mut client, "C:\\users\\default>").await;

        client.write_all(b"hostname\r\n").await.unwrap();
        let out = read_until(&mut client, "C:\\users\\default>").await;
        assert!(out.starts_with("honeypot-test\r\n"));

        client.write_all(b"exit\r\n").await.unwrap();
        let out = read_until(&mut client, "\u{0}never").await;
        assert_eq!(out, "Goodbye.\r\n");

        wait_for_events(&sink, 5).await;
        let events = sink.events();
        let kinds: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                EventType::Connected,
                EventType::Login,
                EventType::Shell,
                EventType::Shell,
                EventType::Disconnected
            ]
        );
        assert_eq!(events[0].peer_address, "127.0.0.1");
        assert_eq!(events[0].local_port, Some(addr.port()));
        assert_eq!(events[4].peer_port, events[0].peer_port);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_have_distinct_ids() {
        let (addr, sink) = start().await;
        let mut first = TcpStream::connect(addr).await.unwrap();
        let mut second = TcpStream::connect(addr).await.unwrap();
        read_until(&mut first, "Username: ").await;
        read_until(&mut second, "Username: ").await;

        drop(first);
        drop(second);
        wait_for_events(&sink, 4).await;

        let events = sink.events();
        assert_eq!(events.len(), 4);
        let mut ids: Vec<_> = events.iter().map(|e| e.session_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 2);
        for id in ids {
            let per_session: Vec<EventType> = events
                .iter()
                .filter(|e| e.session_id == id)
                .map(|e| e.event_type)
                .collect();
            assert_eq!(per_session, vec![EventType::Connected, EventType::Disconnected]);
        }
    }
}
