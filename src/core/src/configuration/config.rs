use super::types::*;
use crate::error_handling::types::ConfigError;
use clap::Parser;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Command-line surface of the honeypot binary.
///
/// Every flag is optional and overrides the matching value of the configuration file. Each
/// flag can also be provided through its environment variable.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "telnetpot")]
#[command(about = "A low-interaction telnet honeypot")]
pub struct CliArgs {
    /// Path to a TOML configuration file. Built-in defaults are used when absent.
    pub config_file: Option<PathBuf>,

    /// TCP port to listen on
    #[arg(long, env = "TELNETPOT_PORT")]
    pub port: Option<u16>,

    /// Address to bind the listener to
    #[arg(long, env = "TELNETPOT_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Hostname advertised by the fake shell
    #[arg(long, env = "TELNETPOT_HOSTNAME")]
    pub hostname: Option<String>,
}

/// Application configuration.
///
/// Loaded from a TOML file where every field is optional, then patched with the command-line
/// overrides from [`CliArgs`] and validated. The resulting value is read-only for the rest of
/// the process.
///
/// # Fields Overview
///
/// - `bind_address` / `port`: where the listener accepts connections
/// - `hostname`: value printed by the `hostname` shell command
/// - `max_line_length`: longest accepted input line in bytes, longer lines drop the connection
/// - `sinks`: which recording backends are enabled
/// - `elasticsearch` / `file`: per-backend connection parameters
/// - `credentials`: the username and password allow-lists of the fake login
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub hostname: String,
    pub max_line_length: usize,
    pub sinks: EnabledSinks,
    pub elasticsearch: ElasticsearchConfig,
    pub file: FileSinkConfig,
    pub credentials: CredentialPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0"),
            port: 23,
            hostname: String::from("dc1.example.com"),
            max_line_length: 16384,
            sinks: EnabledSinks::default(),
            elasticsearch: ElasticsearchConfig::default(),
            file: FileSinkConfig::default(),
            credentials: CredentialPolicy::default(),
        }
    }
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the effective configuration: file (or defaults), then CLI/env overrides.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config_file {
            Some(path) => Self::from_file(path)?,
            None => {
                info!("No configuration file given, using defaults");
                Self::default()
            }
        };

        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(bind_address) = &args.bind_address {
            config.bind_address = bind_address.clone();
        }
        if let Some(hostname) = &args.hostname {
            config.hostname = hostname.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::BadAddressFormatting(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;

        if self.hostname.trim().is_empty() {
            return Err(ConfigError::EmptyValue(String::from("hostname")));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::NotInRange(String::from(
                "max_line_length must be greater than 0",
            )));
        }
        if self.sinks.elasticsearch {
            if self.elasticsearch.index.trim().is_empty() {
                return Err(ConfigError::EmptyValue(String::from("elasticsearch.index")));
            }
            if self.elasticsearch.port == 0 {
                return Err(ConfigError::NotInRange(String::from(
                    "elasticsearch.port must be greater than 0",
                )));
            }
            if self.elasticsearch.queue_capacity == 0 {
                return Err(ConfigError::NotInRange(String::from(
                    "elasticsearch.queue_capacity must be greater than 0",
                )));
            }
        }
        if self.sinks.file && self.file.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyValue(String::from("file.path")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 23);
        assert_eq!(config.hostname, "dc1.example.com");
        assert!(config.sinks.screen && config.sinks.file && config.sinks.elasticsearch);
        assert_eq!(config.elasticsearch.index, "honeypot");
        assert_eq!(config.file.path, PathBuf::from("honeypot_output.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let raw = r#"
            port = 2323
            hostname = "fileserver01"

            [sinks]
            elasticsearch = false

            [credentials]
            usernames = ["root"]
        "#;
        let config = Config::from_toml_str(raw).unwrap();

        assert_eq!(config.port, 2323);
        assert_eq!(config.hostname, "fileserver01");
        assert!(!config.sinks.elasticsearch);
        assert!(config.sinks.screen);
        assert_eq!(config.credentials.usernames, vec!["root".to_string()]);
        assert_eq!(config.credentials.passwords, CredentialPolicy::default().passwords);
        assert_eq!(config.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = 2424\n[file]\npath = \"/tmp/pot.jsonl\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.port, 2424);
        assert_eq!(config.file.path, PathBuf::from("/tmp/pot.jsonl"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/telnetpot.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("port = \"twenty-three\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_validation_failures() {
        let config = Config {
            hostname: String::from("  "),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyValue(_))));

        let config = Config {
            bind_address: String::from("not-an-ip"),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadAddressFormatting(_))
        ));

        let mut config = Config::default();
        config.elasticsearch.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NotInRange(_))));

        // Disabled sinks are not validated
        config.sinks.elasticsearch = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = 2424\nhostname = \"from-file\"").unwrap();

        let args = CliArgs::try_parse_from([
            "telnetpot",
            file.path().to_str().unwrap(),
            "--port",
            "2525",
            "--bind-address",
            "127.0.0.1",
        ])
        .unwrap();
        let config = Config::load(&args).unwrap();

        assert_eq!(config.port, 2525);
        assert_eq!(config.hostname, "from-file");
        assert_eq!(
            config.listen_addr().unwrap(),
            "127.0.0.1:2525".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("TELNETPOT_HOSTNAME", "env-host");
        let args = CliArgs::try_parse_from(["telnetpot"]);
        std::env::remove_var("TELNETPOT_HOSTNAME");

        let config = Config::load(&args.unwrap()).unwrap();
        assert_eq!(config.hostname, "env-host");
        assert_eq!(config.port, 23);
    }
}
