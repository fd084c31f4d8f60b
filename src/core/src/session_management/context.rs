use crate::configuration::config::Config;
use crate::configuration::types::CredentialPolicy;
use crate::data_capture::dispatcher::EventDispatcher;

/// Read-only dependencies handed to every session.
///
/// Built once by the controller and shared behind an `Arc`.
pub struct SessionContext {
    pub dispatcher: EventDispatcher,
    pub hostname: String,
    pub credentials: CredentialPolicy,
}

impl SessionContext {
    pub fn new(dispatcher: EventDispatcher, hostname: impl Into<String>, credentials: CredentialPolicy) -> Self {
        Self {
            dispatcher,
            hostname: hostname.into(),
            credentials,
        }
    }

    pub fn from_config(config: &Config, dispatcher: EventDispatcher) -> Self {
        Self::new(dispatcher, config.hostname.clone(), config.credentials.clone())
    }
}
