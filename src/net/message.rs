use std::collections::HashMap;

use tokio::sync::oneshot::Sender;

use crate::ArcStr;

/// Messages that can be sent to a networking [`Core`] actor.
///
/// [`Core`]: super::core::Core
#[derive(Debug)]
pub enum Message {
    /// Performs an HTTP GET request to the specified URL
    Get {
        /// The URL to request
        url: ArcStr,
        /// Optional headers to include in the request
        headers: Option<HashMap<ArcStr, ArcStr>>,
        /// Channel to send the result back to the caller
        tx: Sender<anyhow::Result<ArcStr>>,
    },
}
