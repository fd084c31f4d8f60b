use log::{error, info};
use std::sync::Arc;

use crate::configuration::config::Config;
use crate::data_capture::dispatcher::EventDispatcher;
use crate::error_handling::types::*;
use crate::network::network_listener::NetworkListener;
use crate::session_management::context::SessionContext;

/// Owns the process-wide pieces: configuration, the shared session context (dispatcher
/// included) and the listener lifecycle.
pub struct Controller {
    pub config: Config,
    context: Arc<SessionContext>,
}

impl Controller {
    /// Builds the dispatcher from the sink flags. Must be called inside a tokio runtime.
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        info!("[+] Creating controller");
        config.validate()?;

        let dispatcher = EventDispatcher::from_config(&config);
        let context = Arc::new(SessionContext::from_config(&config, dispatcher));

        Ok(Self { config, context })
    }

    pub fn context(&self) -> Arc<SessionContext> {
        Arc::clone(&self.context)
    }

    /// Binds the listener and serves until `shutdown` resolves.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), ControllerError>
    where
        F: std::future::Future<Output = ()>,
    {
        let addr = self.config.listen_addr()?;
        let listener = NetworkListener::bind(addr, self.context(), self.config.max_line_length).await?;
        info!("Server listening on port {}", listener.local_addr()?.port());

        tokio::select! {
            result = listener.start_listening() => {
                if let Err(ref e) = result {
                    error!("[!] Listener stopped: {}", e);
                }
                result?;
            }
            _ = shutdown => {
                info!("Shutdown requested");
            }
        }

        info!("Server shutdown");
        Ok(())
    }

    /// Serves until Ctrl-C.
    pub async fn run(&self) -> Result<(), ControllerError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("[!] Unable to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}
