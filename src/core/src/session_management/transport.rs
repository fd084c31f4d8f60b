/// Output side of a connection as seen by a session.
///
/// Implementations buffer or send the text and perform the close once the session is done.
/// Neither call can fail from the session's point of view; transport errors surface as a
/// disconnect instead.
pub trait Transport {
    fn write(&mut self, data: &str);

    /// Asks for the connection to be closed after pending output is sent.
    fn close(&mut self);
}
