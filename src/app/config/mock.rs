use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::{Data, FlagOpt, PathOpt, StrOpt, USizeOpt};
use crate::{ArcPath, ArcSlice, ArcStr, log::LogLevel};

/// Mock implementation of the configuration actor for testing purposes.
///
/// Stores the configuration data in memory. Load and save are no-ops.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<Data>>,
}

impl Mock {
    /// Creates a new mock instance with the provided data.
    pub fn new(data: Data) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn load(&self) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        let data = self.data.lock().await;
        match opt {
            PathOpt::LogDir => data.log_dir.clone(),
        }
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        let mut data = self.data.lock().await;
        match opt {
            PathOpt::LogDir => data.log_dir = path,
        }
    }

    pub async fn log_level(&self) -> LogLevel {
        self.data.lock().await.log_level
    }

    pub async fn set_log_level(&self, level: LogLevel) {
        self.data.lock().await.log_level = level;
    }

    pub async fn usize(&self, opt: USizeOpt) -> usize {
        let data = self.data.lock().await;
        match opt {
            USizeOpt::MaxAge => data.max_age,
            USizeOpt::Timeout => data.timeout,
            USizeOpt::CacheCapacity => data.cache_capacity,
        }
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        let mut data = self.data.lock().await;
        match opt {
            USizeOpt::MaxAge => data.max_age = value,
            USizeOpt::Timeout => data.timeout = value,
            USizeOpt::CacheCapacity => data.cache_capacity = value,
        }
    }

    pub async fn flag(&self, opt: FlagOpt) -> bool {
        let data = self.data.lock().await;
        match opt {
            FlagOpt::FeedEntriesRss => data.feed_entries_rss,
            FlagOpt::FeedEntriesAtom => data.feed_entries_atom,
        }
    }

    pub async fn set_flag(&self, opt: FlagOpt, value: bool) {
        let mut data = self.data.lock().await;
        match opt {
            FlagOpt::FeedEntriesRss => data.feed_entries_rss = value,
            FlagOpt::FeedEntriesAtom => data.feed_entries_atom = value,
        }
    }

    pub async fn str(&self, opt: StrOpt) -> ArcStr {
        let data = self.data.lock().await;
        match opt {
            StrOpt::SiteUrl => data.site_url.clone(),
        }
    }

    pub async fn set_str(&self, opt: StrOpt, value: ArcStr) {
        let mut data = self.data.lock().await;
        match opt {
            StrOpt::SiteUrl => data.site_url = value,
        }
    }

    pub async fn weblogs(&self) -> ArcSlice<ArcStr> {
        self.data.lock().await.weblogs.clone()
    }

    pub async fn set_weblogs(&self, weblogs: ArcSlice<ArcStr>) {
        self.data.lock().await.weblogs = weblogs;
    }
}
