use tokio::{sync::mpsc::Receiver, task::JoinHandle};

use super::data::CacheData;
use super::message::Message;
use crate::{
    app::config::{Config, USizeOpt},
    log::Log,
};

/// The core implementation of the feed cache actor.
pub struct Core {
    data: CacheData,
    log: Log,
}

impl Core {
    /// Creates a new feed cache core, sized by the configured capacity.
    pub async fn new(config: Config, log: Log) -> Self {
        let capacity = config.usize(USizeOpt::CacheCapacity).await;
        Self {
            data: CacheData::new(capacity),
            log,
        }
    }

    /// Transforms the core into an actor ready to receive messages.
    pub fn spawn(self) -> (super::FeedCache, JoinHandle<()>) {
        let (tx, rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(self.run(rx));
        (super::FeedCache::Actual(tx), handle)
    }

    async fn run(mut self, mut rx: Receiver<Message>) {
        while let Some(msg) = rx.recv().await {
            use Message::*;
            match msg {
                Put { key, content } => {
                    self.log
                        .debug(format!("Caching {} ({} bytes)", key, content.len()));
                    self.data.put(key, content);
                }
                Get { key, tx } => {
                    let _ = tx.send(self.data.get(&key));
                }
                Invalidate { key, tx } => {
                    let _ = tx.send(self.data.invalidate(&key));
                }
                Len { tx } => {
                    let _ = tx.send(self.data.len());
                }
            }
        }
    }
}
