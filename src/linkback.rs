pub use data::LinkbackResult;
use message::Message;

use crate::{ArcStr, log::Log, net::Net};
use anyhow::Context;

mod core;
mod data;
mod mock;
pub mod message;
mod parse;
#[cfg(test)]
mod tests;

/// The linkback extraction actor.
///
/// Given the URL of a page that supposedly links to one of our weblog entries,
/// the extractor fetches that page, checks whether it really does link back,
/// and pulls out the page title, an excerpt surrounding the link, and, when
/// the page advertises an RSS feed, the permalink of the referring entry.
///
/// Extraction is best-effort: every failure past the initial request is
/// swallowed and the result degrades to whatever was gathered so far.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Linkback {
    /// A real extraction actor that fetches and parses remote pages
    Actual(tokio::sync::mpsc::Sender<Message>),
    /// A mock implementation for testing that returns predefined results
    Mock(mock::Mock),
}

impl Linkback {
    /// Creates a new linkback instance and spawns its actor.
    pub fn spawn(net: Net, log: Log) -> Self {
        let (linkback, _) = core::Core::new(net, log).spawn();
        linkback
    }

    /// Creates a new mock linkback instance for testing.
    ///
    /// # Arguments
    /// * `results` - Predefined results keyed by referrer URL
    pub fn mock(results: std::collections::HashMap<ArcStr, LinkbackResult>) -> Self {
        Self::Mock(mock::Mock::new(results))
    }

    /// Extracts linkback metadata for a referring page.
    ///
    /// # Arguments
    /// * `referrer` - Absolute URL of the page that supposedly links to us
    /// * `target` - Absolute URL of our entry the page should link to
    ///
    /// # Returns
    /// The extraction result. Never fails; an unreachable or unparsable
    /// referrer yields a result with `found == false`.
    pub async fn extract(&self, referrer: ArcStr, target: ArcStr) -> LinkbackResult {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Extract {
                        referrer,
                        target,
                        tx,
                    })
                    .await
                    .context("Extracting linkback with Linkback actor")
                    .expect("Linkback actor is dead");
                rx.await
                    .context("Awaiting response for extraction with Linkback actor")
                    .expect("Linkback actor is dead")
            }
            Self::Mock(mock) => mock.extract(referrer, target).await,
        }
    }
}
