use regex::Regex;
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;

use crate::ArcStr;

use super::data::{self, INITIAL_CAPACITY, Model, RenderError};
use super::message::Message;

/// The core implementation of the render actor.
///
/// Rendering resolves a template id to a built-in template and substitutes
/// `${key}` placeholders with values from the model mapping.
pub struct Core {
    /// Matches `${key}` placeholders in template sources
    placeholder: Regex,
}

impl Core {
    /// Creates a new render actor core.
    pub fn new() -> Self {
        let placeholder =
            Regex::new(r"\$\{([a-z0-9_]+)\}").expect("placeholder pattern is valid");
        Self { placeholder }
    }

    /// Spawns the render actor and returns the handle and join handle.
    pub fn spawn(self) -> (super::Render, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = super::Render::Actual(tx);
        let join_handle = tokio::spawn(self.run(rx));
        (handle, join_handle)
    }

    /// Runs the render actor event loop.
    async fn run(self, mut rx: Receiver<Message>) {
        while let Some(message) = rx.recv().await {
            match message {
                Message::Render {
                    tx,
                    template,
                    model,
                } => {
                    let result = self.handle_render_request(template, model);
                    let _ = tx.send(result);
                }
            }
        }
    }

    /// Handles a render request by substituting model values into the template.
    ///
    /// # Returns
    /// The rendered content, or a [`RenderError`] when the template is unknown
    /// or the model is missing a referenced value.
    fn handle_render_request(
        &self,
        template: ArcStr,
        model: Model,
    ) -> Result<ArcStr, RenderError> {
        let source = data::template_source(&template)
            .ok_or_else(|| RenderError::UnknownTemplate(template.clone()))?;

        let mut output = String::with_capacity(INITIAL_CAPACITY);
        let mut last = 0;

        for captures in self.placeholder.captures_iter(source) {
            let whole = captures.get(0).expect("capture group 0 always matches");
            let key = &captures[1];

            let value = model.get(key).ok_or_else(|| RenderError::MissingValue {
                template: template.clone(),
                key: ArcStr::from(key),
            })?;

            output.push_str(&source[last..whole.start()]);
            output.push_str(value);
            last = whole.end();
        }

        output.push_str(&source[last..]);

        Ok(ArcStr::from(output))
    }
}
