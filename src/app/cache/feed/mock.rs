use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::CacheEntry;
use crate::ArcStr;

/// Mock implementation of the feed cache for testing purposes.
///
/// Stores entries in a plain map with no capacity bound or eviction, so tests
/// can inspect exactly what was put.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    entries: Arc<Mutex<HashMap<ArcStr, ArcStr>>>,
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, key: ArcStr, content: ArcStr) {
        self.entries.lock().await.insert(key, content);
    }

    pub async fn get(&self, key: ArcStr) -> Option<CacheEntry> {
        self.entries
            .lock()
            .await
            .get(&key)
            .map(|content| CacheEntry {
                key: key.clone(),
                size: content.len(),
                content: content.clone(),
            })
    }

    pub async fn invalidate(&self, key: ArcStr) -> bool {
        self.entries.lock().await.remove(&key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
