use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    ArcStr,
    app::config::{Config, USizeOpt},
    log::Log,
    net::{Net, message::Message},
};

/// The core of the networking system that handles HTTP requests.
///
/// This struct provides thread-safe access to network operations through an actor pattern.
/// It wraps the reqwest HTTP client and provides a safe interface for making HTTP requests.
/// The client carries the configured request timeout so fetches are always bounded.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads through the actor pattern.
/// All network operations are handled sequentially to ensure consistency.
#[derive(Debug)]
pub struct Core {
    /// Configuration interface for settings
    config: Config,
    /// Logging interface for operation logging
    log: Log,
    /// HTTP client for making requests
    client: Client,
}

impl Core {
    /// Creates a new networking instance.
    ///
    /// # Arguments
    /// * `config` - The configuration actor for settings
    /// * `log` - The logging actor for operation logging
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built, rather than
    /// falling back to a client without the configured timeout.
    pub async fn new(config: Config, log: Log) -> anyhow::Result<Self> {
        let timeout = config.usize(USizeOpt::Timeout).await;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout as u64))
            .build()
            .context("Building HTTP client")?;

        Ok(Self {
            config,
            log,
            client,
        })
    }

    /// Transforms the networking core instance into an actor.
    ///
    /// This method spawns a new task that will handle network operations
    /// asynchronously through a message channel. All operations are processed
    /// sequentially to ensure consistency.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `Net` interface
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, headers, tx } => {
                        let response = self
                            .handle_get_request(url.clone(), headers)
                            .await
                            .with_context(|| format!("GET request failed for URL: {}", url));
                        let _ = tx.send(response);
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }

    /// Handles GET requests with optional headers
    async fn handle_get_request(
        &self,
        url: ArcStr,
        headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> anyhow::Result<ArcStr> {
        self.log.debug(format!("GET {}", url));

        let mut request = self.client.get(url.as_str());

        if let Some(headers) = headers {
            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }
        }

        let response = request.send().await.context("Sending GET request")?;
        let text = response.text().await.context("Reading response body")?;
        Ok(ArcStr::from(text))
    }
}
