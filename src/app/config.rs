pub use data::{Data, FlagOpt, PathOpt, StrOpt, USizeOpt};
use message::Message;

use crate::{ArcPath, ArcSlice, ArcStr, fs::Fs, log::LogLevel};
use anyhow::Context;

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

/// The configuration actor that provides a thread-safe interface for
/// configuration operations.
///
/// This enum represents either a real configuration actor or a mock
/// implementation for testing purposes. It manages the runtime properties of
/// the weblog system: the site URL, the weblogs to warm up, per-feed flags,
/// and the ambient settings (logging, timeouts, cache capacity).
///
/// # Examples
/// ```ignore
/// let config = Config::spawn(fs, config_path);
/// config.load().await?;
/// let site = config.str(StrOpt::SiteUrl).await;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender.
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads from and writes to a file
    Actual(tokio::sync::mpsc::Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

impl Config {
    /// Creates a new configuration instance and spawns its actor.
    ///
    /// # Arguments
    /// * `fs` - The filesystem actor for file operations
    /// * `path` - The path to the configuration file
    pub fn spawn(fs: Fs, path: ArcPath) -> Self {
        let (config, _) = core::Core::new(fs, path).spawn();
        config
    }

    /// Creates a new mock configuration instance for testing.
    ///
    /// # Arguments
    /// * `data` - Initial configuration data
    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Creates a new mock configuration instance with default values.
    pub fn mock_default() -> Self {
        Self::Mock(mock::Mock::new(Data::default()))
    }

    /// Loads the configuration from the file.
    ///
    /// For the mock implementation, this is a no-op that always succeeds.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Load { tx })
                    .await
                    .context("Loading config with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for config load with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.load().await,
        }
    }

    /// Saves the current configuration to the file.
    ///
    /// For the mock implementation, this is a no-op that always succeeds.
    pub async fn save(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Save { tx })
                    .await
                    .context("Saving config with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for config save with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.save().await,
        }
    }

    /// Gets a path-based configuration value.
    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetPath { opt, tx })
                    .await
                    .context("Getting path with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for path get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.path(opt).await,
        }
    }

    /// Sets a path-based configuration value.
    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetPath { opt, path })
                .await
                .context("Setting path with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_path(opt, path).await,
        }
    }

    /// Gets the current log level.
    pub async fn log_level(&self) -> LogLevel {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetLogLevel { tx })
                    .await
                    .context("Getting log level with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for log level get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.log_level().await,
        }
    }

    /// Sets the log level.
    pub async fn set_log_level(&self, level: LogLevel) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetLogLevel { level })
                .await
                .context("Setting log level with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_log_level(level).await,
        }
    }

    /// Gets a numeric configuration value.
    pub async fn usize(&self, opt: USizeOpt) -> usize {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetUSize { opt, tx })
                    .await
                    .context("Getting numeric value with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for numeric get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.usize(opt).await,
        }
    }

    /// Sets a numeric configuration value.
    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetUSize { opt, size: value })
                .await
                .context("Setting numeric value with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_usize(opt, value).await,
        }
    }

    /// Gets a boolean configuration flag.
    pub async fn flag(&self, opt: FlagOpt) -> bool {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetFlag { opt, tx })
                    .await
                    .context("Getting flag with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for flag get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.flag(opt).await,
        }
    }

    /// Sets a boolean configuration flag.
    pub async fn set_flag(&self, opt: FlagOpt, value: bool) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetFlag { opt, value })
                .await
                .context("Setting flag with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_flag(opt, value).await,
        }
    }

    /// Gets a string configuration value.
    pub async fn str(&self, opt: StrOpt) -> ArcStr {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetStr { opt, tx })
                    .await
                    .context("Getting string value with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for string get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.str(opt).await,
        }
    }

    /// Sets a string configuration value.
    pub async fn set_str(&self, opt: StrOpt, value: ArcStr) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetStr { opt, value })
                .await
                .context("Setting string value with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_str(opt, value).await,
        }
    }

    /// Gets the ordered list of weblog handles to warm up.
    pub async fn weblogs(&self) -> ArcSlice<ArcStr> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetWeblogs { tx })
                    .await
                    .context("Getting weblogs with Config actor")
                    .expect("Config actor is dead");
                rx.await
                    .context("Awaiting response for weblogs get with Config actor")
                    .expect("Config actor is dead")
            }
            Self::Mock(mock) => mock.weblogs().await,
        }
    }

    /// Sets the ordered list of weblog handles to warm up.
    pub async fn set_weblogs(&self, weblogs: ArcSlice<ArcStr>) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::SetWeblogs { weblogs })
                .await
                .context("Setting weblogs with Config actor")
                .expect("Config actor is dead"),
            Self::Mock(mock) => mock.set_weblogs(weblogs).await,
        }
    }
}
