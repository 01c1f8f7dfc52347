use std::collections::{HashMap, VecDeque};
use std::fmt::Display;

use crate::ArcStr;

/// The kind of content a feed carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Weblog entries, newest first
    Entries,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entries => "entries",
        }
    }
}

impl Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The serialization format of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    Rss,
    Atom,
}

impl FeedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "atom",
        }
    }
}

impl Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a rendered feed document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedRequest {
    /// Handle of the weblog the feed belongs to
    pub weblog: ArcStr,
    /// The kind of content the feed carries
    pub kind: FeedKind,
    /// The serialization format
    pub format: FeedFormat,
}

impl FeedRequest {
    /// Derives the cache key for this request.
    ///
    /// The key is a pure function of the request fields, so equal requests
    /// always map to the same cache entry.
    pub fn cache_key(&self) -> ArcStr {
        ArcStr::from(format!(
            "weblog/{}/{}/{}",
            self.weblog, self.kind, self.format
        ))
    }
}

/// A cached rendered feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key the entry is stored under
    pub key: ArcStr,
    /// The rendered document
    pub content: ArcStr,
    /// Size of the rendered document in bytes
    pub size: usize,
}

/// The LRU bookkeeping behind the feed cache.
///
/// `order` holds keys from least to most recently used. Both `get` and `put`
/// move the touched key to the back.
#[derive(Debug)]
pub struct CacheData {
    entries: HashMap<ArcStr, CacheEntry>,
    order: VecDeque<ArcStr>,
    capacity: usize,
}

impl CacheData {
    /// Creates an empty cache with the given capacity.
    ///
    /// A capacity of zero is treated as one, so a put always succeeds.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Looks up an entry and marks it as recently used.
    pub fn get(&mut self, key: &ArcStr) -> Option<CacheEntry> {
        let entry = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(entry)
    }

    /// Inserts or replaces an entry, evicting the least recently used entry
    /// when the cache is at capacity.
    pub fn put(&mut self, key: ArcStr, content: ArcStr) {
        let entry = CacheEntry {
            key: key.clone(),
            size: content.len(),
            content,
        };

        if self.entries.insert(key.clone(), entry).is_some() {
            self.touch(&key);
            return;
        }

        if self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
    }

    /// Removes an entry.
    ///
    /// # Returns
    /// Whether an entry was present.
    pub fn invalidate(&mut self, key: &ArcStr) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, key: &ArcStr) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.clone());
    }
}
