//! Tag-level scanning of referring pages.
//!
//! The scanner walks the raw markup once, tracking byte positions of tags so
//! the excerpt can be cut straight out of the source text. It deliberately
//! works on the unparsed document: a DOM would lose the positions.

use regex::Regex;

use super::data::LinkbackResult;
use crate::ArcStr;

/// Excerpts longer than this are cut and given a trailing ellipsis.
pub const MAX_EXCERPT_CHARS: usize = 500;

/// Title text is no longer appended once this many characters accumulated.
pub const DESIRED_TITLE_LENGTH: usize = 50;

/// Tag kinds treated as block boundaries when locating the excerpt.
const DIVIDER_TAGS: [&str; 15] = [
    "td", "div", "span", "blockquote", "p", "li", "br", "hr", "pre", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Open,
    Close,
    SelfClose,
}

/// A tag occurrence with its byte position in the source document.
#[derive(Debug)]
struct Token<'a> {
    kind: TokenKind,
    name: String,
    attrs: &'a str,
    start: usize,
    end: usize,
}

/// Scanner state while looking for the excerpt boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No matching anchor seen yet; dividers advance the excerpt start
    SeekingPermalink,
    /// Anchor matched; the next divider closes the excerpt
    SeekingEnd,
    /// Excerpt boundaries settled; only title and feed link still matter
    Done,
}

/// What a pass over the referring page yielded.
#[derive(Debug, Default)]
pub struct HtmlScan {
    pub found: bool,
    pub title: String,
    /// Byte offset of the last divider before the matching anchor
    pub start: usize,
    /// Byte offset of the first divider after the matching anchor
    pub end: usize,
    /// Feed autodiscovery URL, already resolved against the referrer
    pub feed_url: Option<String>,
}

/// A reusable markup scanner holding its compiled patterns.
#[derive(Debug)]
pub struct Scanner {
    tag: Regex,
    attr: Regex,
}

impl Scanner {
    pub fn new() -> Self {
        let tag = Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*?)(/?)>")
            .expect("tag pattern is valid");
        let attr = Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("attribute pattern is valid");
        Self { tag, attr }
    }

    /// Scans the referring page for a link back to the target URL.
    ///
    /// Anchor hrefs are compared against the target with and without a
    /// `www.` host prefix, fragments stripped. Dividers before the match
    /// keep pushing the excerpt start forward; the first divider after the
    /// match pins the excerpt end.
    pub fn scan(&self, html: &str, referrer: &str, target: &str) -> HtmlScan {
        let (plain, www) = www_pair(target);

        let mut scan = HtmlScan::default();
        let mut state = State::SeekingPermalink;
        let mut current_tag: Option<String> = None;
        let mut last_end = 0;

        for token in self.tokens(html) {
            // Text since the previous tag belongs to the tag we are inside.
            if current_tag.as_deref() == Some("title")
                && scan.title.chars().count() < DESIRED_TITLE_LENGTH
            {
                scan.title.push_str(&html[last_end..token.start]);
            }
            last_end = token.end;

            let divider = DIVIDER_TAGS.contains(&token.name.as_str());

            match (state, token.kind) {
                (State::SeekingPermalink, TokenKind::Open | TokenKind::Close) if divider => {
                    scan.start = token.start;
                }
                (State::SeekingEnd, _) if divider => {
                    scan.end = token.start;
                    state = State::Done;
                }
                _ => {}
            }

            if token.kind == TokenKind::Open && token.name == "a" {
                if let Some(href) = self.attr(token.attrs, "href") {
                    // Fragment identifiers never count toward the match.
                    let href = match href.rfind('#') {
                        Some(pos) => &href[..pos],
                        None => href.as_str(),
                    };
                    if href == plain || href == www {
                        scan.found = true;
                        if state == State::SeekingPermalink {
                            state = State::SeekingEnd;
                        }
                    }
                }
            }

            if token.name == "link" && scan.feed_url.is_none() {
                self.check_feed_link(&token, referrer, &mut scan);
            }

            match token.kind {
                TokenKind::Open => current_tag = Some(token.name),
                TokenKind::Close => current_tag = None,
                TokenKind::SelfClose => {}
            }
        }

        if scan.title.starts_with('>') && scan.title.len() > 1 {
            scan.title.remove(0);
        }

        scan
    }

    /// Applies an HTML-phase scan onto a result.
    ///
    /// The excerpt is the HTML-stripped text between the scan's boundary
    /// positions, when they bracket anything.
    pub fn apply_html_scan(&self, html: &str, scan: &HtmlScan, result: &mut LinkbackResult) {
        result.found = scan.found;
        result.title = ArcStr::from(scan.title.trim());

        if scan.start > 0 && scan.end > scan.start {
            let excerpt = truncate_excerpt(&strip_html(&html[scan.start..scan.end]));
            result.excerpt = ArcStr::from(excerpt);
        }
    }

    fn tokens<'a>(&self, html: &'a str) -> impl Iterator<Item = Token<'a>> {
        self.tag.captures_iter(html).map(|captures| {
            let whole = captures.get(0).expect("capture group 0 always matches");
            let kind = if !captures[1].is_empty() {
                TokenKind::Close
            } else if !captures[4].is_empty() {
                TokenKind::SelfClose
            } else {
                TokenKind::Open
            };

            Token {
                kind,
                name: captures[2].to_lowercase(),
                attrs: captures.get(3).map(|m| m.as_str()).unwrap_or(""),
                start: whole.start(),
                end: whole.end(),
            }
        })
    }

    /// Returns the value of an attribute within a tag's attribute text.
    fn attr(&self, attrs: &str, name: &str) -> Option<String> {
        for captures in self.attr.captures_iter(attrs) {
            if captures[1].eq_ignore_ascii_case(name) {
                let value = captures
                    .get(2)
                    .or_else(|| captures.get(3))
                    .or_else(|| captures.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                return Some(value.to_string());
            }
        }
        None
    }

    /// Captures an RSS autodiscovery link, resolving relative hrefs against
    /// the referrer.
    fn check_feed_link(&self, token: &Token<'_>, referrer: &str, scan: &mut HtmlScan) {
        let (Some(kind), Some(title), Some(href)) = (
            self.attr(token.attrs, "type"),
            self.attr(token.attrs, "title"),
            self.attr(token.attrs, "href"),
        ) else {
            return;
        };

        if kind == "application/rss+xml" && title == "RSS" {
            scan.feed_url = Some(resolve_href(&href, referrer));
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the target URL with and without a `www.` host prefix, so a page
/// linking to either form counts as a match.
fn www_pair(target: &str) -> (String, String) {
    match target.split_once("://") {
        Some((scheme, rest)) => {
            if let Some(bare) = rest.strip_prefix("www.") {
                (format!("{}://{}", scheme, bare), target.to_string())
            } else {
                (target.to_string(), format!("{}://www.{}", scheme, rest))
            }
        }
        None => (target.to_string(), format!("www.{}", target)),
    }
}

/// Resolves a feed-discovery href against the referrer URL.
///
/// Root-relative hrefs keep the referrer's scheme and authority,
/// scheme-relative hrefs keep only the scheme, and bare relative hrefs are
/// resolved against the referrer's parent path.
fn resolve_href(href: &str, referrer: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    let scheme = referrer.split("://").next().unwrap_or("http");

    if let Some(rest) = href.strip_prefix("//") {
        return format!("{}://{}", scheme, rest);
    }

    if href.starts_with('/') {
        let authority = referrer
            .split_once("://")
            .map(|(_, rest)| rest.split('/').next().unwrap_or(rest))
            .unwrap_or("");
        return format!("{}://{}{}", scheme, authority, href);
    }

    match referrer.rfind('/') {
        Some(slash) => format!("{}/{}", &referrer[..slash], href),
        None => href.to_string(),
    }
}

/// Strips markup from an HTML fragment, collapsing whitespace runs.
pub fn strip_html(fragment: &str) -> String {
    let document = scraper::Html::parse_fragment(fragment);
    let text: Vec<&str> = document
        .root_element()
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect();

    text.join(" ")
}

/// Truncates an excerpt to its maximum length, appending an ellipsis.
pub fn truncate_excerpt(excerpt: &str) -> String {
    if excerpt.chars().count() > MAX_EXCERPT_CHARS {
        let cut: String = excerpt.chars().take(MAX_EXCERPT_CHARS).collect();
        format!("{}...", cut)
    } else {
        excerpt.to_string()
    }
}
