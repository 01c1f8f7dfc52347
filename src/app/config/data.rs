use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcSlice, ArcStr, log::LogLevel};

/// The set of path-valued configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOpt {
    /// Directory where log files are written
    LogDir,
}

/// The set of numeric configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum USizeOpt {
    /// Maximum age, in days, of log files before garbage collection
    MaxAge,
    /// Timeout, in seconds, for outbound HTTP requests
    Timeout,
    /// Maximum number of entries held by the feed cache
    CacheCapacity,
}

/// The set of boolean configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOpt {
    /// Whether the warmup job renders RSS entry feeds
    FeedEntriesRss,
    /// Whether the warmup job renders Atom entry feeds
    FeedEntriesAtom,
}

/// The set of string-valued configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrOpt {
    /// Absolute base URL of the site, without a trailing slash
    SiteUrl,
}

/// The configuration data for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Absolute base URL of the site
    pub site_url: ArcStr,
    /// Handles of the weblogs the warmup job renders, in order
    pub weblogs: ArcSlice<ArcStr>,
    /// Whether the warmup job renders RSS entry feeds
    pub feed_entries_rss: bool,
    /// Whether the warmup job renders Atom entry feeds
    pub feed_entries_atom: bool,
    /// Maximum number of entries held by the feed cache
    pub cache_capacity: usize,
    /// Timeout, in seconds, for outbound HTTP requests
    pub timeout: usize,
    /// Directory where log files are written
    pub log_dir: ArcPath,
    /// Minimum level a message needs to be logged
    pub log_level: LogLevel,
    /// Maximum age, in days, of log files before garbage collection
    pub max_age: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            site_url: ArcStr::from("http://localhost:8080"),
            weblogs: ArcSlice::default(),
            feed_entries_rss: true,
            feed_entries_atom: true,
            cache_capacity: 100,
            timeout: 30,
            log_dir: ArcPath::from(std::env::temp_dir().join("bloghub").join("logs")),
            log_level: LogLevel::default(),
            max_age: 30,
        }
    }
}
