use serde::Deserialize;
use std::path::PathBuf;

/// Per-sink on/off switches.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct EnabledSinks {
    pub screen: bool,
    pub file: bool,
    pub elasticsearch: bool,
}

impl Default for EnabledSinks {
    fn default() -> Self {
        Self {
            screen: true,
            file: true,
            elasticsearch: true,
        }
    }
}

/// Connection parameters of the search index store.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    pub host: String,
    pub port: u16,
    pub index: String,
    pub timeout_secs: u64,
    pub queue_capacity: usize,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 9200,
            index: String::from("honeypot"),
            timeout_secs: 5,
            queue_capacity: 1024,
        }
    }
}

impl ElasticsearchConfig {
    /// Document endpoint events are posted to.
    pub fn document_url(&self) -> String {
        format!("http://{}:{}/{}/_doc", self.host, self.port, self.index)
    }
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    pub path: PathBuf,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("honeypot_output.txt"),
        }
    }
}

/// Allow-lists of usernames and passwords the fake login accepts.
///
/// Both lists are matched independently: a login succeeds when the username is in `usernames`
/// and the password is in `passwords`. Comparison trims surrounding whitespace and ignores case
/// on both sides.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    pub usernames: Vec<String>,
    pub passwords: Vec<String>,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            usernames: ["administrator", "default", "admin"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            passwords: ["admin", "test", "administrator", "", "123456"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CredentialPolicy {
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        Self::contains(&self.usernames, username) && Self::contains(&self.passwords, password)
    }

    fn contains(allowed: &[String], candidate: &str) -> bool {
        let candidate = candidate.trim().to_lowercase();
        allowed
            .iter()
            .any(|entry| entry.trim().to_lowercase() == candidate)
    }
}
