use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ArcStr;

use super::data::{Model, RenderError};

/// Mock implementation of the Render actor for testing purposes.
///
/// Responses are keyed by `<template>:<weblog>` so tests can make rendering
/// succeed for some weblogs and fail for others.
#[derive(Debug, Clone)]
pub struct Mock {
    responses: Arc<Mutex<HashMap<ArcStr, ArcStr>>>,
}

impl Mock {
    /// Creates a new mock instance with the provided responses.
    pub fn new(responses: HashMap<ArcStr, ArcStr>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    /// Renders a template using mock responses.
    ///
    /// # Returns
    /// The predefined content, or a [`RenderError`] when no response matches
    /// the template and the model's `weblog` value.
    pub async fn render(&self, template: ArcStr, model: Model) -> Result<ArcStr, RenderError> {
        let weblog = model.get("weblog").cloned().unwrap_or_default();
        let key = ArcStr::from(format!("{}:{}", template, weblog));

        let responses = self.responses.lock().await;
        responses
            .get(&key)
            .cloned()
            .ok_or(RenderError::UnknownTemplate(key))
    }
}
