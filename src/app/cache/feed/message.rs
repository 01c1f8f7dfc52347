use tokio::sync::oneshot;

use super::data::CacheEntry;
use crate::ArcStr;

/// Messages handled by the feed cache actor.
#[derive(Debug)]
pub enum Message {
    /// Stores rendered content under a key
    Put { key: ArcStr, content: ArcStr },
    /// Looks up the entry stored under a key
    Get {
        key: ArcStr,
        tx: oneshot::Sender<Option<CacheEntry>>,
    },
    /// Removes the entry stored under a key
    Invalidate {
        key: ArcStr,
        tx: oneshot::Sender<bool>,
    },
    /// Returns the number of cached entries
    Len { tx: oneshot::Sender<usize> },
}
