use std::{
    collections::{HashMap, LinkedList},
    io,
    sync::Arc,
};

use anyhow::Context;
use tokio::{fs::OpenOptions, sync::mpsc::Sender};

use crate::{ArcFile, ArcPath, ArcStr};

/// The core of the Fs actor, responsible for handling filesystem operations.
///
/// This struct provides thread-safe access to filesystem operations through an actor pattern.
/// It wraps tokio's filesystem functions and provides a safe interface for concurrent access.
/// Files are cached to avoid repeated opening of the same file.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. File handles are shared
/// using `Arc` to avoid cloning file descriptors.
#[derive(Debug, Default)]
pub struct FsCore {
    /// The cache of open files, mapping paths to their file handles
    files: HashMap<ArcPath, ArcFile>,
}

impl FsCore {
    /// Creates a new Fs core instance.
    pub fn new() -> Self {
        Default::default()
    }

    /// Transforms an instance of [`FsCore`] into an actor ready to receive messages.
    ///
    /// # Returns
    /// A tuple containing:
    /// - A [`Fs`] instance that can be used to send messages to the actor
    /// - A join handle for the spawned task
    pub fn spawn(mut self) -> (Fs, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                use Message::*;
                match msg {
                    OpenFile { tx, path } => self.open_file(tx, path).await,
                    RemoveFile { tx, path } => self.remove_file(tx, path).await,
                    ReadDir { tx, path } => self.read_dir(tx, path).await,
                    MkDir { tx, path } => self.mkdir(tx, path).await,
                    ReadToString { tx, path } => self.read_to_string(tx, path).await,
                    WriteAll { tx, path, contents } => self.write_all(tx, path, contents).await,
                }
            }
        });

        (Fs::Actual(tx), handle)
    }

    /// Opens a file or returns a cached file handle if one exists.
    ///
    /// The file is opened with write and create permissions. If the file is already
    /// open, a reference to the existing handle is returned.
    async fn open_file(
        &mut self,
        tx: tokio::sync::oneshot::Sender<Result<ArcFile, io::Error>>,
        path: ArcPath,
    ) {
        let f = match self.files.get(&path) {
            Some(f) => f.clone(),
            None => match OpenOptions::new()
                .write(true)
                .create(true)
                .open(&path)
                .await
            {
                Ok(f) => {
                    let f = ArcFile::from(f);
                    self.files.insert(path, f.clone());
                    f
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            },
        };
        let _ = tx.send(Ok(f));
    }

    /// Removes a file from the filesystem.
    async fn remove_file(
        &mut self,
        tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>,
        path: ArcPath,
    ) {
        self.files.remove(&path);
        let res = tokio::fs::remove_file(&path).await;
        let _ = tx.send(res);
    }

    /// Reads the contents of a directory.
    ///
    /// Returns a list of paths to all entries in the directory, each wrapped in an `Arc`.
    async fn read_dir(
        &self,
        tx: tokio::sync::oneshot::Sender<Result<LinkedList<ArcPath>, io::Error>>,
        path: ArcPath,
    ) {
        match tokio::fs::read_dir(&path).await {
            Ok(mut rd) => {
                let mut entries = LinkedList::new();
                let res = loop {
                    match rd.next_entry().await {
                        Ok(Some(entry)) => entries.push_back(ArcPath::from(&entry.path())),
                        Ok(None) => break Ok(entries),
                        Err(e) => break Err(e),
                    }
                };

                let _ = tx.send(res);
            }
            Err(e) => {
                let _ = tx.send(Err(e));
            }
        }
    }

    /// Creates a directory and all its parent directories if they don't exist.
    async fn mkdir(&self, tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>, path: ArcPath) {
        let res = tokio::fs::create_dir_all(&path).await;
        let _ = tx.send(res);
    }

    /// Reads a whole file into a string.
    async fn read_to_string(
        &self,
        tx: tokio::sync::oneshot::Sender<Result<ArcStr, io::Error>>,
        path: ArcPath,
    ) {
        let res = tokio::fs::read_to_string(&path).await.map(ArcStr::from);
        let _ = tx.send(res);
    }

    /// Writes a string to a file, replacing its previous contents.
    async fn write_all(
        &self,
        tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>,
        path: ArcPath,
        contents: ArcStr,
    ) {
        let res = tokio::fs::write(&path, contents.as_bytes()).await;
        let _ = tx.send(res);
    }
}

/// Messages that can be sent to a [`FsCore`] actor.
#[derive(Debug)]
pub enum Message {
    /// Opens a file and returns its handle
    OpenFile {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<ArcFile, io::Error>>,
        /// The path of the file to open
        path: ArcPath,
    },
    /// Removes a file from the filesystem
    RemoveFile {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>,
        /// The path of the file to remove
        path: ArcPath,
    },
    /// Reads the contents of a directory
    ReadDir {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<LinkedList<ArcPath>, io::Error>>,
        /// The path of the directory to read
        path: ArcPath,
    },
    /// Creates a directory and its parents
    MkDir {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>,
        /// The path of the directory to create
        path: ArcPath,
    },
    /// Reads a whole file into a string
    ReadToString {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<ArcStr, io::Error>>,
        /// The path of the file to read
        path: ArcPath,
    },
    /// Writes a string to a file, replacing its contents
    WriteAll {
        /// Channel to send the result back to the caller
        tx: tokio::sync::oneshot::Sender<Result<(), io::Error>>,
        /// The path of the file to write
        path: ArcPath,
        /// The contents to write
        contents: ArcStr,
    },
}

/// A mock implementation of the Fs actor, used for testing.
///
/// This implementation stores file contents in memory instead of interacting
/// with the actual filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsMock {
    /// In-memory storage for open files
    files: HashMap<ArcPath, ArcFile>,
    /// In-memory storage for file contents
    contents: HashMap<ArcPath, ArcStr>,
    /// In-memory storage for directory contents
    dirs: HashMap<ArcPath, LinkedList<ArcPath>>,
}

/// The fs actor is responsible for handling filesystem operations.
///
/// This enum represents either a real filesystem actor or a mock implementation
/// for testing purposes.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Fs {
    /// A real filesystem actor that interacts with the system
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(Arc<tokio::sync::Mutex<FsMock>>),
}

impl From<FsCore> for Fs {
    fn from(core: FsCore) -> Self {
        let (fs, _) = core.spawn();
        fs
    }
}

use Fs::*;
impl Fs {
    /// Creates a new filesystem instance and spawns its actor.
    pub fn spawn() -> Self {
        let (fs, _) = FsCore::new().spawn();
        fs
    }

    /// Creates a new mock instance of the Fs actor for testing
    ///
    /// # Important
    /// Mocks cannot open new files, so files must be opened beforehand and
    /// passed in.
    pub fn mock(files: HashMap<ArcPath, ArcFile>) -> Self {
        let mock = FsMock {
            files,
            ..FsMock::default()
        };

        Mock(Arc::new(tokio::sync::Mutex::new(mock)))
    }

    /// Opens a file
    ///
    /// File opening is cached, so opening a file multiple times will return the
    /// same file descriptor using `Arc` to avoid cloning.
    ///
    /// # Errors
    /// If the file cannot be opened, an error is returned, also if a mock is
    /// being used and the file was not previously opened and passed to [`Fs::mock`]
    pub async fn open_file(&self, path: ArcPath) -> Result<ArcFile, io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::OpenFile { tx, path })
                    .await
                    .context("Opening file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file open with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let lock = lock.lock().await;
                lock.files
                    .get(&path)
                    .map(ArcFile::clone)
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
            }
        }
    }

    /// Removes a file from the filesystem
    pub async fn remove_file(&self, path: ArcPath) -> Result<(), io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::RemoveFile { tx, path })
                    .await
                    .context("Removing file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file removal with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let mut lock = lock.lock().await;
                lock.files.remove(&path);
                lock.contents
                    .remove(&path)
                    .map(|_| ())
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
            }
        }
    }

    /// Reads a directory
    pub async fn read_dir(&self, path: ArcPath) -> Result<LinkedList<ArcPath>, io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadDir { tx, path })
                    .await
                    .context("Reading directory with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for directory read with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let lock = lock.lock().await;
                let entries = lock.dirs.get(&path).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "directory not found")
                })?;

                Ok(entries.clone())
            }
        }
    }

    /// Creates a directory if it doesn't exist
    pub async fn mkdir(&self, path: ArcPath) -> Result<(), io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::MkDir { tx, path })
                    .await
                    .context("Creating directory with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for directory creation with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let mut lock = lock.lock().await;
                lock.dirs.insert(path, LinkedList::new());
                Ok(())
            }
        }
    }

    /// Reads a whole file into a string
    pub async fn read_to_string(&self, path: ArcPath) -> Result<ArcStr, io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadToString { tx, path })
                    .await
                    .context("Reading file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file read with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let lock = lock.lock().await;
                lock.contents
                    .get(&path)
                    .cloned()
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
            }
        }
    }

    /// Writes a string to a file, replacing its previous contents
    pub async fn write_all(&self, path: ArcPath, contents: ArcStr) -> Result<(), io::Error> {
        match self {
            Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::WriteAll { tx, path, contents })
                    .await
                    .context("Writing file with Fs")
                    .expect("fs actor died");
                rx.await
                    .context("Awaiting response for file write with Fs")
                    .expect("fs actor died")
            }
            Mock(lock) => {
                let mut lock = lock.lock().await;
                lock.contents.insert(path, contents);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fs = Fs::spawn();
        let path = ArcPath::from(&temp_dir.path().join("test.txt"));

        fs.write_all(path.clone(), ArcStr::from("hello"))
            .await
            .unwrap();
        let contents = fs.read_to_string(path).await.unwrap();
        assert_eq!(contents, ArcStr::from("hello"));
    }

    #[tokio::test]
    async fn test_fs_open_file_is_cached() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fs = Fs::spawn();
        let path = ArcPath::from(&temp_dir.path().join("cached.txt"));

        let first = fs.open_file(path.clone()).await;
        let second = fs.open_file(path).await;
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_fs_mkdir_and_read_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fs = Fs::spawn();
        let dir = ArcPath::from(&temp_dir.path().join("sub"));

        fs.mkdir(dir.clone()).await.unwrap();
        let file = ArcPath::from(&temp_dir.path().join("sub").join("a.txt"));
        fs.write_all(file, ArcStr::from("a")).await.unwrap();

        let entries = fs.read_dir(dir).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_fs_remove_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fs = Fs::spawn();
        let path = ArcPath::from(&temp_dir.path().join("missing.txt"));

        assert!(fs.remove_file(path).await.is_err());
    }
}
