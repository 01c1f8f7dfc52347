use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::LinkbackResult;
use crate::ArcStr;

/// Mock implementation of the linkback actor for testing purposes.
///
/// Results are keyed by referrer URL. Unknown referrers yield a default
/// result, mirroring the real extractor's degrade-on-failure behavior.
#[derive(Debug, Clone)]
pub struct Mock {
    results: Arc<Mutex<HashMap<ArcStr, LinkbackResult>>>,
}

impl Mock {
    /// Creates a new mock instance with the provided results.
    pub fn new(results: HashMap<ArcStr, LinkbackResult>) -> Self {
        Self {
            results: Arc::new(Mutex::new(results)),
        }
    }

    pub async fn extract(&self, referrer: ArcStr, _target: ArcStr) -> LinkbackResult {
        self.results
            .lock()
            .await
            .get(&referrer)
            .cloned()
            .unwrap_or_default()
    }
}
