use tokio::sync::oneshot;

use super::data::LinkbackResult;
use crate::ArcStr;

/// Messages handled by the linkback actor.
#[derive(Debug)]
pub enum Message {
    /// Extracts linkback metadata for a referring page
    Extract {
        /// Absolute URL of the page that supposedly links to us
        referrer: ArcStr,
        /// Absolute URL of our entry the page should link to
        target: ArcStr,
        /// Channel to send the result back to the caller
        tx: oneshot::Sender<LinkbackResult>,
    },
}
