use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ArcStr;

/// Mock implementation of the Net actor for testing purposes.
///
/// This struct contains predefined HTTP responses keyed by URL, allowing tests
/// to run without making actual network requests.
#[derive(Debug, Clone)]
pub struct Mock {
    responses: Arc<Mutex<HashMap<ArcStr, ArcStr>>>,
}

impl Mock {
    /// Creates a new mock instance with the provided responses.
    ///
    /// # Arguments
    /// * `responses` - Initial response cache mapping URLs to response bodies
    pub fn new(responses: HashMap<ArcStr, ArcStr>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    /// Creates a new mock instance with an empty response cache.
    pub fn empty() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Performs an HTTP GET request using mock responses.
    ///
    /// # Returns
    /// The response body as a string, or an error if not found in mock responses.
    pub async fn get(
        &self,
        url: ArcStr,
        _headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> Result<ArcStr, anyhow::Error> {
        let responses = self.responses.lock().await;
        responses
            .get(&url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("GET request not found in mock responses: {}", url))
    }
}
