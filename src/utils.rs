//! Cheaply clonable, thread-safe wrappers around shared immutable data.
//!
//! Actors pass these types through message channels, so all of them are
//! `Clone + Send + Sync` and cloning never copies the underlying buffer.

use std::borrow::Borrow;
use std::ffi::{OsStr, OsString};
use std::fmt::Display;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio::fs::File;
use tokio::sync::{RwLock, RwLockWriteGuard};

/// A shared immutable string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcStr(Arc<str>);

impl ArcStr {
    /// Returns the wrapped string as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ArcStr {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArcStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArcStr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<OsStr> for ArcStr {
    fn as_ref(&self) -> &OsStr {
        OsStr::new(self.as_str())
    }
}

impl AsRef<Path> for ArcStr {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl Display for ArcStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArcStr {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for ArcStr {
    fn from(value: String) -> Self {
        Self(Arc::from(value.as_str()))
    }
}

impl From<&String> for ArcStr {
    fn from(value: &String) -> Self {
        Self(Arc::from(value.as_str()))
    }
}

impl PartialEq<str> for ArcStr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ArcStr {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for ArcStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ArcStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(String::deserialize(deserializer)?))
    }
}

/// A shared immutable path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcPath(Arc<Path>);

impl Deref for ArcPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ArcPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&Path> for ArcPath {
    fn from(value: &Path) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&PathBuf> for ArcPath {
    fn from(value: &PathBuf) -> Self {
        Self(Arc::from(value.as_path()))
    }
}

impl From<PathBuf> for ArcPath {
    fn from(value: PathBuf) -> Self {
        Self(Arc::from(value.as_path()))
    }
}

impl From<&str> for ArcPath {
    fn from(value: &str) -> Self {
        Self(Arc::from(Path::new(value)))
    }
}

impl Serialize for ArcPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArcPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(PathBuf::deserialize(deserializer)?))
    }
}

/// A shared immutable slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArcSlice<T>(Arc<[T]>);

impl<T> ArcSlice<T> {
    /// Returns an iterator over the wrapped slice.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T> Default for ArcSlice<T> {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl<T> Deref for ArcSlice<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for ArcSlice<T> {
    fn from(value: Vec<T>) -> Self {
        Self(Arc::from(value))
    }
}

impl<T: Clone> From<&[T]> for ArcSlice<T> {
    fn from(value: &[T]) -> Self {
        Self(Arc::from(value.to_vec()))
    }
}

impl<T: Serialize> Serialize for ArcSlice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ArcSlice<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from(Vec::<T>::deserialize(deserializer)?))
    }
}

/// A shared immutable OS string, used for environment variable names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcOsStr(Arc<OsStr>);

impl Deref for ArcOsStr {
    type Target = OsStr;

    fn deref(&self) -> &OsStr {
        &self.0
    }
}

impl AsRef<OsStr> for ArcOsStr {
    fn as_ref(&self) -> &OsStr {
        &self.0
    }
}

impl From<&str> for ArcOsStr {
    fn from(value: &str) -> Self {
        Self(Arc::from(OsStr::new(value)))
    }
}

impl From<OsString> for ArcOsStr {
    fn from(value: OsString) -> Self {
        Self(Arc::from(value.as_os_str()))
    }
}

/// A shared handle to an open file, guarded for exclusive writes.
#[derive(Debug, Clone)]
pub struct ArcFile(Arc<RwLock<File>>);

impl ArcFile {
    /// Acquires the write half of the file lock.
    pub async fn write(&self) -> RwLockWriteGuard<'_, File> {
        self.0.write().await
    }
}

impl From<File> for ArcFile {
    fn from(value: File) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_str_builds_paths() {
        let home = ArcStr::from("/home/test");

        let path = Path::new(&home).join(".config").join("bloghub");
        assert_eq!(path, PathBuf::from("/home/test/.config/bloghub"));

        let os: &OsStr = home.as_ref();
        assert_eq!(os, OsStr::new("/home/test"));
    }

    #[test]
    fn test_arc_slice_from_vec() {
        let slice = ArcSlice::from(vec![1, 2, 3]);
        assert_eq!(&*slice, &[1, 2, 3]);
        assert_eq!(slice.iter().count(), 3);
    }
}
