use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    EmptyValue(String),
    BadAddressFormatting(String),
    NotInRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::EmptyValue(e) => write!(f, "Empty value: {}", e),
            ConfigError::BadAddressFormatting(e) => write!(f, "Address formatting error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlError(err.to_string())
    }
}

#[derive(Debug)]
pub enum NetworkError {
    BindError(std::io::Error),
    ConnectionError(std::io::Error),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::BindError(e) => write!(f, "Network bind error: {}", e),
            NetworkError::ConnectionError(e) => write!(f, "Connection error: {}", e),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Failure of a single recording backend. Never crosses the dispatcher boundary.
#[derive(Debug)]
pub enum SinkError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    QueueFull,
    Unavailable(String),
    ClientBuildFailed(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::IoError(e) => write!(f, "Sink IO error: {}", e),
            SinkError::SerializationError(e) => write!(f, "Event serialization error: {}", e),
            SinkError::QueueFull => write!(f, "Sink queue is full"),
            SinkError::Unavailable(e) => write!(f, "Sink unavailable: {}", e),
            SinkError::ClientBuildFailed(e) => write!(f, "Sink client build failed: {}", e),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::IoError(err)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::SerializationError(err)
    }
}

#[derive(Debug)]
pub enum ControllerError {
    ConfigurationError(ConfigError),
    NetworkError(NetworkError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            ControllerError::NetworkError(e) => write!(f, "Network error: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::ConfigurationError(err)
    }
}

impl From<NetworkError> for ControllerError {
    fn from(err: NetworkError) -> Self {
        ControllerError::NetworkError(err)
    }
}
