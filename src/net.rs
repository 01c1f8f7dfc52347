use anyhow::Context;
use std::collections::HashMap;
use tokio::sync::mpsc::Sender;

use crate::{
    ArcStr,
    app::config::Config,
    net::{core::Core, message::Message},
};

mod core;
mod mock;
pub mod message;

/// The networking actor that provides a thread-safe interface for network operations.
///
/// This enum represents either a real networking actor or a mock implementation
/// for testing purposes. It provides a unified interface for network operations
/// regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(config, log).await?;
/// let body = net.get(url, None).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

impl Net {
    /// Creates a new networking instance and spawns its actor.
    ///
    /// The HTTP client is built with the request timeout taken from the
    /// configuration, so a hung remote server cannot block a fetch forever.
    ///
    /// # Arguments
    /// * `config` - The configuration actor for settings
    /// * `log` - The logging actor for operation logging
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub async fn spawn(config: Config, log: crate::log::Log) -> anyhow::Result<Self> {
        let (net, _) = Core::new(config, log).await?.spawn();
        Ok(net)
    }

    /// Creates a new mock networking instance for testing.
    ///
    /// # Arguments
    /// * `responses` - Initial response cache mapping URLs to response bodies
    pub fn mock(responses: HashMap<ArcStr, ArcStr>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Creates a new empty mock networking instance for testing.
    pub fn mock_empty() -> Self {
        Self::Mock(mock::Mock::empty())
    }

    /// Performs an HTTP GET request to the specified URL.
    ///
    /// # Arguments
    /// * `url` - The URL to send the GET request to
    /// * `headers` - Optional headers to include in the request
    ///
    /// # Returns
    /// The response body as a string, or an error if the request fails.
    pub async fn get(
        &self,
        url: ArcStr,
        headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> Result<ArcStr, anyhow::Error> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, headers, tx })
                    .await
                    .context("Sending message to Net actor")
                    .expect("Net actor died");
                rx.await
                    .context("Awaiting response from Net actor")
                    .expect("Net actor died")
            }
            Net::Mock(mock) => mock.get(url, headers).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Log;

    #[tokio::test]
    async fn test_net_spawn_builds_client_with_configured_timeout() {
        let config = Config::mock_default();

        let net = Net::spawn(config, Log::Mock).await;
        assert!(net.is_ok());
    }

    #[tokio::test]
    async fn test_net_mock_get() {
        let net = Net::mock(HashMap::from([(
            ArcStr::from("http://example.com/"),
            ArcStr::from("body"),
        )]));

        let body = net.get(ArcStr::from("http://example.com/"), None).await;
        assert_eq!(body.unwrap(), ArcStr::from("body"));

        let missing = net.get(ArcStr::from("http://example.com/404"), None).await;
        assert!(missing.is_err());
    }
}
