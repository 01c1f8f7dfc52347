use tokio::sync::oneshot::Sender;

use crate::ArcStr;

use super::data::{Model, RenderError};

/// Messages that can be sent to a render [`Core`] actor.
///
/// [`Core`]: super::core::Core
#[derive(Debug)]
pub enum Message {
    /// Renders a template with the given model
    Render {
        /// Channel to send the result back to the caller
        tx: Sender<Result<ArcStr, RenderError>>,
        /// The template id to render
        template: ArcStr,
        /// The model mapping substituted into the template
        model: Model,
    },
}
