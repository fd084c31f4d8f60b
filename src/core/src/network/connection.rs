//! Per-connection driver.
//!
//! Frames the byte stream into lines, feeds them to a [`TelnetSession`], and flushes whatever
//! the session wrote after every callback. The session is told about the disconnect exactly
//! once, whichever side ends the connection.

use std::sync::Arc;

use log::{debug, trace, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::data_capture::types::ConnectionEndpoints;
use crate::error_handling::types::NetworkError;
use crate::session_management::context::SessionContext;
use crate::session_management::session::TelnetSession;
use crate::session_management::transport::Transport;

/// Output collected from the session between two flushes.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pending: Vec<u8>,
    close_requested: bool,
}

impl OutputBuffer {
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending)
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl Transport for OutputBuffer {
    fn write(&mut self, data: &str) {
        self.pending.extend_from_slice(data.as_bytes());
    }

    fn close(&mut self) {
        self.close_requested = true;
    }
}

/// Input as text. Lines that are not valid UTF-8 are escaped as a whole (`\xff`) so the
/// recorded detail keeps every byte the peer sent.
fn decode_line(line: Vec<u8>) -> String {
    String::from_utf8(line).unwrap_or_else(|e| e.as_bytes().escape_ascii().to_string())
}

/// Runs one session over `stream` until either side closes it.
pub async fn serve_connection<S>(
    stream: S,
    endpoints: ConnectionEndpoints,
    context: Arc<SessionContext>,
    max_line_length: usize,
) -> Result<(), NetworkError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = TelnetSession::new(context, endpoints);
    let result = drive(&mut session, stream, max_line_length).await;
    session.on_disconnect();

    if let Err(ref e) = result {
        debug!("[{}] connection ended with error: {}", session.id(), e);
    }
    result
}

async fn drive<S>(
    session: &mut TelnetSession,
    stream: S,
    max_line_length: usize,
) -> Result<(), NetworkError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut output = OutputBuffer::default();

    session.on_connect(&mut output);

    loop {
        let data = output.take();
        if !data.is_empty() {
            writer
                .write_all(&data)
                .await
                .map_err(NetworkError::ConnectionError)?;
            writer.flush().await.map_err(NetworkError::ConnectionError)?;
        }

        if output.close_requested() {
            trace!("[{}] closing on session request", session.id());
            let _ = writer.shutdown().await;
            return Ok(());
        }

        let mut line = Vec::new();
        let limit = max_line_length.saturating_add(1) as u64;
        let n = (&mut reader)
            .take(limit)
            .read_until(b'\n', &mut line)
            .await
            .map_err(NetworkError::ConnectionError)?;

        if n == 0 {
            trace!("[{}] peer closed the connection", session.id());
            return Ok(());
        }

        if line.last() != Some(&b'\n') {
            if line.len() > max_line_length {
                warn!(
                    "[{}] line longer than {} bytes, dropping connection",
                    session.id(),
                    max_line_length
                );
                let _ = writer.shutdown().await;
            } else {
                trace!("[{}] partial line discarded at EOF", session.id());
            }
            return Ok(());
        }

        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let text = decode_line(line);
        trace!("[{}] received line {:?}", session.id(), text);
        session.on_line(&text, &mut output);
    }
}
