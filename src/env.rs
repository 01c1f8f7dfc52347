use std::{env::VarError, sync::Arc};

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::{ArcOsStr, ArcStr};

/// The core of the Env actor, responsible for reading environment variables.
///
/// This struct provides thread-safe access to environment variables through an
/// actor pattern. Only lookups are supported; the application never mutates its
/// own environment.
#[derive(Debug, Default)]
pub struct EnvCore {}

impl EnvCore {
    /// Creates a new Env core instance.
    pub fn new() -> Self {
        Default::default()
    }

    /// Transforms an instance of [`EnvCore`] into an actor ready to receive messages.
    ///
    /// # Returns
    /// A tuple containing:
    /// - An [`Env`] instance that can be used to send messages to the actor
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (Env, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::GetEnv { tx, key } => self.get_env(tx, key),
                }
            }
        });

        (Env::Actual(tx), handle)
    }

    /// Gets an environment variable using the standard library and sends the result
    /// through the provided channel.
    fn get_env(&self, tx: tokio::sync::oneshot::Sender<Result<ArcStr, VarError>>, key: ArcOsStr) {
        let _ = tx.send(std::env::var(&key).map(ArcStr::from));
    }
}

/// Messages that can be sent to an [`EnvCore`] actor.
#[derive(Debug)]
pub enum Message {
    /// Retrieves the value of an environment variable
    GetEnv {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<ArcStr, VarError>>,
        /// The environment variable name to retrieve
        key: ArcOsStr,
    },
}

/// A mock implementation of the Env actor, used for testing.
///
/// This implementation stores environment variables in memory instead of
/// interacting with the actual system environment.
#[derive(Debug, Clone, Default)]
pub struct EnvMock {
    /// In-memory storage for environment variables
    env: std::collections::HashMap<ArcOsStr, ArcStr>,
}

/// The env actor is responsible for reading environment variables.
///
/// This enum represents either a real environment variable actor or a mock
/// implementation for testing purposes.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Env {
    /// A real environment variable actor that interacts with the system
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(Arc<tokio::sync::Mutex<EnvMock>>),
}

impl From<EnvCore> for Env {
    fn from(core: EnvCore) -> Self {
        let (env, _) = core.spawn();
        env
    }
}

impl Env {
    /// Creates a new environment instance and spawns its actor.
    pub fn spawn() -> Self {
        let (env, _) = EnvCore::new().spawn();
        env
    }

    /// Creates a new mock instance of the Env actor for testing
    pub fn mock(vars: std::collections::HashMap<ArcOsStr, ArcStr>) -> Self {
        Self::Mock(Arc::new(tokio::sync::Mutex::new(EnvMock { env: vars })))
    }

    /// Gets an environment variable
    pub async fn env(&self, key: ArcOsStr) -> Result<ArcStr, VarError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetEnv { tx, key })
                    .await
                    .context("Getting environment variable with Env")
                    .expect("env actor died");
                rx.await
                    .context("Awaiting response for environment variable get with Env")
                    .expect("env actor died")
            }
            Self::Mock(lock) => {
                let lock = lock.lock().await;
                lock.env.get(&key).cloned().ok_or(VarError::NotPresent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_get() {
        unsafe { std::env::set_var("BLOGHUB_TEST_ENV_GET", "value") };

        let env = Env::spawn();
        let result = env.env(ArcOsStr::from("BLOGHUB_TEST_ENV_GET")).await;
        assert_eq!(result.unwrap(), ArcStr::from("value"));
    }

    #[tokio::test]
    async fn test_env_get_missing() {
        let env = Env::spawn();
        let result = env.env(ArcOsStr::from("BLOGHUB_TEST_ENV_MISSING")).await;
        assert!(matches!(result, Err(VarError::NotPresent)));
    }

    #[tokio::test]
    async fn test_env_mock() {
        let vars = std::collections::HashMap::from([(
            ArcOsStr::from("HOME"),
            ArcStr::from("/home/test"),
        )]);
        let env = Env::mock(vars);

        let result = env.env(ArcOsStr::from("HOME")).await.unwrap();
        assert_eq!(result, ArcStr::from("/home/test"));
    }
}
