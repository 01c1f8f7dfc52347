mod core;
mod mock;
pub mod data;
pub mod message;
#[cfg(test)]
mod tests;

use anyhow::Context;
use std::collections::HashMap;
use tokio::sync::mpsc::Sender;

use crate::ArcStr;

pub use data::{Model, RenderError};

/// The render actor that provides a thread-safe interface for rendering feed
/// content from static templates.
///
/// This enum represents either a real render actor or a mock implementation
/// for testing purposes. Template ids resolve to built-in feed templates;
/// rendering substitutes values from a model mapping into the template.
///
/// # Examples
/// ```ignore
/// let render = Render::spawn();
/// let content = render.render(arc_str!("weblog-entries-rss"), model).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Render {
    /// A real render actor that renders built-in templates
    Actual(Sender<message::Message>),
    /// A mock implementation for testing that returns predefined content
    Mock(mock::Mock),
}

impl Render {
    /// Creates a new render instance and spawns its actor.
    pub fn spawn() -> Self {
        let (render, _) = core::Core::new().spawn();
        render
    }

    /// Creates a new mock render instance for testing.
    ///
    /// # Arguments
    /// * `content` - Responses keyed by `<template>:<weblog>`, where `weblog`
    ///   is taken from the rendering model
    pub fn mock(content: HashMap<ArcStr, ArcStr>) -> Self {
        Self::Mock(mock::Mock::new(content))
    }

    /// Renders a template with the given model.
    ///
    /// # Arguments
    /// * `template` - The template id, e.g. `weblog-entries-rss`
    /// * `model` - The model mapping substituted into the template
    ///
    /// # Returns
    /// The rendered content, or a [`RenderError`] when the template is unknown
    /// or the model is missing a referenced value.
    pub async fn render(&self, template: ArcStr, model: Model) -> Result<ArcStr, RenderError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(message::Message::Render {
                        tx,
                        template,
                        model,
                    })
                    .await
                    .context("Rendering template with Render actor")
                    .expect("render actor died");
                rx.await
                    .context("Awaiting response for template rendering with Render actor")
                    .expect("render actor died")
            }
            Self::Mock(mock) => mock.render(template, model).await,
        }
    }
}
