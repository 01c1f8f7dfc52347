//! OPML bookmarks import.
//!
//! Parses an OPML document into a flat list of bookmarks by walking its
//! nested `<outline>` elements. Imports land in a timestamped folder so
//! repeated imports never collide.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{ArcPath, ArcStr, fs::Fs};

/// Files above this size are rejected instead of read into memory.
pub const MAX_IMPORT_BYTES: usize = 4 * 1024000;

/// A bookmark extracted from an OPML outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Display name, from the outline's `title` or `text` attribute
    pub name: ArcStr,
    /// Feed URL, from the `xmlUrl` attribute
    pub feed_url: Option<ArcStr>,
    /// Site URL, from the `htmlUrl` attribute
    pub site_url: Option<ArcStr>,
}

#[derive(Debug, Deserialize)]
struct Opml {
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(rename = "outline", default)]
    outlines: Vec<Outline>,
}

#[derive(Debug, Deserialize)]
struct Outline {
    #[serde(rename = "@title")]
    title: Option<String>,
    #[serde(rename = "@text")]
    text: Option<String>,
    #[serde(rename = "@xmlUrl")]
    xml_url: Option<String>,
    #[serde(rename = "@htmlUrl")]
    html_url: Option<String>,
    #[serde(rename = "outline", default)]
    children: Vec<Outline>,
}

/// Parses an OPML document into bookmarks.
///
/// Outlines with children are treated as folders and recursed into; the
/// folder structure is flattened. An outline without a feed or site URL
/// contributes nothing.
pub fn parse_opml(data: &str) -> anyhow::Result<Vec<Bookmark>> {
    let opml: Opml = serde_xml_rs::from_str(data).context("Parsing OPML document")?;

    let mut bookmarks = Vec::new();
    for outline in &opml.body.outlines {
        collect(outline, &mut bookmarks);
    }

    Ok(bookmarks)
}

fn collect(outline: &Outline, bookmarks: &mut Vec<Bookmark>) {
    if outline.xml_url.is_some() || outline.html_url.is_some() {
        let name = outline
            .title
            .as_deref()
            .or(outline.text.as_deref())
            .or(outline.xml_url.as_deref())
            .or(outline.html_url.as_deref())
            .unwrap_or_default();

        bookmarks.push(Bookmark {
            name: ArcStr::from(name),
            feed_url: outline.xml_url.as_deref().map(ArcStr::from),
            site_url: outline.html_url.as_deref().map(ArcStr::from),
        });
    }

    for child in &outline.children {
        collect(child, bookmarks);
    }
}

/// Names the folder an import lands in, from the import timestamp.
pub fn folder_name(now: DateTime<Utc>) -> String {
    format!("imported-{}", now.format("%Y%m%d%H%M%S"))
}

/// Reads and parses an OPML file, enforcing the import size limit.
///
/// # Returns
/// The folder name for this import and the extracted bookmarks.
pub async fn import(fs: &Fs, path: ArcPath) -> anyhow::Result<(String, Vec<Bookmark>)> {
    let data = fs
        .read_to_string(path.clone())
        .await
        .with_context(|| format!("Reading OPML file at {}", path.display()))?;

    if data.len() >= MAX_IMPORT_BYTES {
        anyhow::bail!(
            "OPML file is {} bytes, above the {} byte import limit",
            data.len(),
            MAX_IMPORT_BYTES
        );
    }

    let bookmarks = parse_opml(&data)?;

    Ok((folder_name(Utc::now()), bookmarks))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const OPML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<opml version="1.1">
  <head><title>Subscriptions</title></head>
  <body>
    <outline title="News">
      <outline title="Example Blog"
               xmlUrl="http://blog.example.com/feed.rss"
               htmlUrl="http://blog.example.com/"/>
      <outline text="Text Only" xmlUrl="http://text.example.com/feed.rss"/>
    </outline>
    <outline xmlUrl="http://bare.example.com/feed.rss"/>
    <outline title="Empty Folder"/>
  </body>
</opml>
"#;

    #[test]
    fn test_parse_opml_flattens_nested_outlines() {
        let bookmarks = parse_opml(OPML).unwrap();

        assert_eq!(bookmarks.len(), 3);
        assert_eq!(bookmarks[0].name, "Example Blog");
        assert_eq!(
            bookmarks[0].feed_url,
            Some(ArcStr::from("http://blog.example.com/feed.rss"))
        );
        assert_eq!(
            bookmarks[0].site_url,
            Some(ArcStr::from("http://blog.example.com/"))
        );
    }

    #[test]
    fn test_parse_opml_name_fallbacks() {
        let bookmarks = parse_opml(OPML).unwrap();

        // No title: text wins, then the feed URL itself.
        assert_eq!(bookmarks[1].name, "Text Only");
        assert_eq!(bookmarks[2].name, "http://bare.example.com/feed.rss");
    }

    #[test]
    fn test_parse_opml_skips_url_less_outlines() {
        let bookmarks = parse_opml(OPML).unwrap();

        assert!(bookmarks.iter().all(|b| b.name != "Empty Folder"));
        assert!(bookmarks.iter().all(|b| b.name != "News"));
    }

    #[test]
    fn test_parse_opml_rejects_garbage() {
        assert!(parse_opml("this is not opml").is_err());
    }

    #[test]
    fn test_folder_name_is_timestamped() {
        let now = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(folder_name(now), "imported-20240102030405");
    }

    #[tokio::test]
    async fn test_import_reads_and_parses_file() {
        let fs = Fs::mock(HashMap::new());
        let path = ArcPath::from("/bookmarks.opml");
        fs.write_all(path.clone(), ArcStr::from(OPML)).await.unwrap();

        let (folder, bookmarks) = import(&fs, path).await.unwrap();

        assert!(folder.starts_with("imported-"));
        assert_eq!(bookmarks.len(), 3);
    }

    #[tokio::test]
    async fn test_import_rejects_oversized_file() {
        let fs = Fs::mock(HashMap::new());
        let path = ArcPath::from("/huge.opml");
        fs.write_all(path.clone(), ArcStr::from("x".repeat(MAX_IMPORT_BYTES)))
            .await
            .unwrap();

        assert!(import(&fs, path).await.is_err());
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let fs = Fs::mock(HashMap::new());

        assert!(import(&fs, ArcPath::from("/missing.opml")).await.is_err());
    }
}
