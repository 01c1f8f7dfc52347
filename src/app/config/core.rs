use anyhow::Context;
use tokio::{sync::mpsc::Receiver, task::JoinHandle};

use super::data::Data;
use super::message::Message;
use crate::{ArcPath, ArcStr, fs::Fs};

/// The core implementation of the configuration actor.
///
/// Holds the in-memory configuration state and persists it as a TOML file
/// through the [`Fs`] actor.
pub struct Core {
    fs: Fs,
    path: ArcPath,
    data: Data,
}

impl Core {
    /// Creates a new configuration actor core.
    pub fn new(fs: Fs, path: ArcPath) -> Self {
        Self {
            fs,
            path,
            data: Data::default(),
        }
    }

    /// Transforms the core into an actor ready to receive messages.
    pub fn spawn(self) -> (super::Config, JoinHandle<()>) {
        let (tx, rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(self.run(rx));
        (super::Config::Actual(tx), handle)
    }

    async fn run(mut self, mut rx: Receiver<Message>) {
        while let Some(msg) = rx.recv().await {
            use Message::*;
            match msg {
                Load { tx } => {
                    let _ = tx.send(self.load().await);
                }
                Save { tx } => {
                    let _ = tx.send(self.save().await);
                }
                GetPath { opt, tx } => {
                    use super::PathOpt::*;
                    let value = match opt {
                        LogDir => self.data.log_dir.clone(),
                    };
                    let _ = tx.send(value);
                }
                SetPath { opt, path } => {
                    use super::PathOpt::*;
                    match opt {
                        LogDir => self.data.log_dir = path,
                    }
                }
                GetLogLevel { tx } => {
                    let _ = tx.send(self.data.log_level);
                }
                SetLogLevel { level } => self.data.log_level = level,
                GetUSize { opt, tx } => {
                    use super::USizeOpt::*;
                    let value = match opt {
                        MaxAge => self.data.max_age,
                        Timeout => self.data.timeout,
                        CacheCapacity => self.data.cache_capacity,
                    };
                    let _ = tx.send(value);
                }
                SetUSize { opt, size } => {
                    use super::USizeOpt::*;
                    match opt {
                        MaxAge => self.data.max_age = size,
                        Timeout => self.data.timeout = size,
                        CacheCapacity => self.data.cache_capacity = size,
                    }
                }
                GetFlag { opt, tx } => {
                    use super::FlagOpt::*;
                    let value = match opt {
                        FeedEntriesRss => self.data.feed_entries_rss,
                        FeedEntriesAtom => self.data.feed_entries_atom,
                    };
                    let _ = tx.send(value);
                }
                SetFlag { opt, value } => {
                    use super::FlagOpt::*;
                    match opt {
                        FeedEntriesRss => self.data.feed_entries_rss = value,
                        FeedEntriesAtom => self.data.feed_entries_atom = value,
                    }
                }
                GetStr { opt, tx } => {
                    use super::StrOpt::*;
                    let value = match opt {
                        SiteUrl => self.data.site_url.clone(),
                    };
                    let _ = tx.send(value);
                }
                SetStr { opt, value } => {
                    use super::StrOpt::*;
                    match opt {
                        SiteUrl => self.data.site_url = value,
                    }
                }
                GetWeblogs { tx } => {
                    let _ = tx.send(self.data.weblogs.clone());
                }
                SetWeblogs { weblogs } => self.data.weblogs = weblogs,
            }
        }
    }

    /// Loads the configuration from the TOML file at the configured path.
    async fn load(&mut self) -> anyhow::Result<()> {
        let contents = self
            .fs
            .read_to_string(self.path.clone())
            .await
            .with_context(|| format!("Reading config file at {}", self.path.display()))?;

        self.data = toml::from_str(&contents)
            .with_context(|| format!("Parsing config file at {}", self.path.display()))?;

        Ok(())
    }

    /// Serializes the configuration and writes it to the configured path,
    /// creating the parent directory if needed.
    async fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            self.fs
                .mkdir(ArcPath::from(parent))
                .await
                .with_context(|| format!("Creating config directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(&self.data).context("Serializing config")?;

        self.fs
            .write_all(self.path.clone(), ArcStr::from(contents))
            .await
            .with_context(|| format!("Writing config file at {}", self.path.display()))?;

        Ok(())
    }
}
