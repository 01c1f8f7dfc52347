pub use data::{CacheEntry, FeedFormat, FeedKind, FeedRequest};
use message::Message;

use crate::{ArcStr, app::config::Config, log::Log};
use anyhow::Context;

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

/// The feed cache actor, an LRU cache of rendered feed documents.
///
/// Rendered feeds are stored under a deterministic key derived from the
/// request, so any component holding an equivalent [`FeedRequest`] addresses
/// the same entry. When the cache is full the least recently used entry is
/// evicted.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum FeedCache {
    /// A real cache actor holding entries in memory
    Actual(tokio::sync::mpsc::Sender<Message>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

impl FeedCache {
    /// Creates a new feed cache instance and spawns its actor.
    ///
    /// The cache capacity is read from the configuration.
    pub async fn spawn(config: Config, log: Log) -> Self {
        let (cache, _) = core::Core::new(config, log).await.spawn();
        cache
    }

    /// Creates a new mock feed cache instance for testing.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Derives the deterministic cache key for a feed request.
    ///
    /// Equivalent requests always yield the same key.
    pub fn key(request: &FeedRequest) -> ArcStr {
        request.cache_key()
    }

    /// Stores rendered content under the given key, evicting the least
    /// recently used entry if the cache is at capacity.
    pub async fn put(&self, key: ArcStr, content: ArcStr) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::Put { key, content })
                .await
                .context("Putting entry with FeedCache actor")
                .expect("FeedCache actor is dead"),
            Self::Mock(mock) => mock.put(key, content).await,
        }
    }

    /// Looks up the entry stored under the given key, marking it as recently
    /// used.
    pub async fn get(&self, key: ArcStr) -> Option<CacheEntry> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { key, tx })
                    .await
                    .context("Getting entry with FeedCache actor")
                    .expect("FeedCache actor is dead");
                rx.await
                    .context("Awaiting response for entry get with FeedCache actor")
                    .expect("FeedCache actor is dead")
            }
            Self::Mock(mock) => mock.get(key).await,
        }
    }

    /// Removes the entry stored under the given key.
    ///
    /// # Returns
    /// Whether an entry was present.
    pub async fn invalidate(&self, key: ArcStr) -> bool {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Invalidate { key, tx })
                    .await
                    .context("Invalidating entry with FeedCache actor")
                    .expect("FeedCache actor is dead");
                rx.await
                    .context("Awaiting response for invalidation with FeedCache actor")
                    .expect("FeedCache actor is dead")
            }
            Self::Mock(mock) => mock.invalidate(key).await,
        }
    }

    /// Returns the number of entries currently cached.
    pub async fn len(&self) -> usize {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Len { tx })
                    .await
                    .context("Getting length with FeedCache actor")
                    .expect("FeedCache actor is dead");
                rx.await
                    .context("Awaiting response for length with FeedCache actor")
                    .expect("FeedCache actor is dead")
            }
            Self::Mock(mock) => mock.len().await,
        }
    }
}
