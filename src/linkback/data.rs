use crate::ArcStr;

/// The outcome of a linkback extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkbackResult {
    /// Whether the referring page links to the target URL
    pub found: bool,
    /// Title of the referring page, or `feed title: entry title` when the
    /// match came from the page's RSS feed
    pub title: ArcStr,
    /// HTML-stripped text surrounding the link, truncated with an ellipsis
    pub excerpt: ArcStr,
    /// Permalink of the referring entry, only known from the feed phase
    pub permalink: Option<ArcStr>,
}
