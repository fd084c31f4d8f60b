pub mod connection;
pub mod network_listener;

pub use connection::serve_connection;
pub use network_listener::NetworkListener;
