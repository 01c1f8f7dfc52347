use std::collections::HashMap;

use thiserror::Error;

use crate::ArcStr;

/// The model mapping substituted into a template during rendering.
pub type Model = HashMap<ArcStr, ArcStr>;

/// Initial capacity hint for rendered output, sized for a typical feed page.
pub const INITIAL_CAPACITY: usize = 24 * 1024;

/// Errors raised while rendering a template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The template id does not resolve to a built-in template
    #[error("unknown template: {0}")]
    UnknownTemplate(ArcStr),
    /// The template references a value the model does not provide
    #[error("template {template} references missing model value: {key}")]
    MissingValue {
        /// The template being rendered
        template: ArcStr,
        /// The placeholder key with no model value
        key: ArcStr,
    },
}

/// Built-in RSS 2.0 template for weblog entry feeds.
const WEBLOG_ENTRIES_RSS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>${weblog}</title>
    <link>${home_url}</link>
    <atom:link rel="self" type="application/rss+xml" href="${self_url}"/>
    <description>Entries for ${weblog}</description>
    <lastBuildDate>${updated}</lastBuildDate>
    <generator>bloghub</generator>
  </channel>
</rss>
"#;

/// Built-in Atom 1.0 template for weblog entry feeds.
const WEBLOG_ENTRIES_ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>${weblog}</title>
  <id>${home_url}</id>
  <link rel="alternate" type="text/html" href="${home_url}"/>
  <link rel="self" type="application/atom+xml" href="${self_url}"/>
  <updated>${updated}</updated>
  <generator>bloghub</generator>
</feed>
"#;

/// Resolves a template id to its source.
///
/// Template ids follow the `weblog-<kind>-<format>` convention.
pub fn template_source(id: &str) -> Option<&'static str> {
    match id {
        "weblog-entries-rss" => Some(WEBLOG_ENTRIES_RSS),
        "weblog-entries-atom" => Some(WEBLOG_ENTRIES_ATOM),
        _ => None,
    }
}
