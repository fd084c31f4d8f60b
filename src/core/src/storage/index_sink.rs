//! Search index backend.
//!
//! `record` never blocks a session on the network: events are pushed onto a bounded channel and
//! a background task posts them one by one to the index document endpoint.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use crate::configuration::types::ElasticsearchConfig;
use crate::data_capture::types::EventRecord;
use crate::error_handling::types::SinkError;

use super::sink_trait::EventSink;

pub struct IndexSink {
    url: String,
    queue: Sender<EventRecord>,
}

impl IndexSink {
    /// Starts the delivery task on the current tokio runtime.
    pub fn spawn(config: &ElasticsearchConfig) -> Result<Self, SinkError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SinkError::Unavailable(format!("no tokio runtime: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SinkError::ClientBuildFailed(e.to_string()))?;

        let url = config.document_url();
        let (queue, pending) = mpsc::channel(config.queue_capacity);
        runtime.spawn(Self::deliver(client, url.clone(), pending));

        info!("IndexSink posting events to {}", url);
        Ok(Self { url, queue })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn deliver(client: reqwest::Client, url: String, mut pending: Receiver<EventRecord>) {
        while let Some(event) = pending.recv().await {
            match client.post(&url).json(&event).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("[{}] indexed {} event", event.session_id, event.event_type);
                }
                Ok(resp) => {
                    warn!(
                        "[{}] index store rejected {} event: HTTP {}",
                        event.session_id,
                        event.event_type,
                        resp.status()
                    );
                }
                Err(e) => {
                    warn!(
                        "[{}] unable to reach index store at {}: {}",
                        event.session_id, url, e
                    );
                }
            }
        }
        debug!("IndexSink delivery task stopped");
    }
}

impl EventSink for IndexSink {
    fn name(&self) -> &str {
        "elasticsearch"
    }

    fn record(&self, event: &EventRecord) -> Result<(), SinkError> {
        self.queue.try_send(event.clone()).map_err(|e| match e {
            TrySendError::Full(_) => SinkError::QueueFull,
            TrySendError::Closed(_) => {
                SinkError::Unavailable(String::from("index delivery task stopped"))
            }
        })
    }
}
