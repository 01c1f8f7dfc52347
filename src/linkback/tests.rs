use std::collections::HashMap;

use super::parse::Scanner;
use super::*;
use crate::net::Net;

const TARGET: &str = "http://example.com/target";

fn page(body: &str) -> String {
    format!(
        "<html><head><title>Referring Page</title></head><body>{}</body></html>",
        body
    )
}

fn extractor(responses: HashMap<ArcStr, ArcStr>) -> Linkback {
    Linkback::spawn(Net::mock(responses), Log::Mock)
}

#[tokio::test]
async fn test_excerpt_brackets_enclosing_paragraph() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = page(&format!(
        r#"<p>Some thoughts on <a href="{}">this entry</a> I read today.</p>"#,
        TARGET
    ));
    let linkback = extractor(HashMap::from([(referrer.clone(), ArcStr::from(html))]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(result.found);
    assert_eq!(result.title, "Referring Page");
    assert_eq!(
        result.excerpt,
        "Some thoughts on this entry I read today."
    );
    assert_eq!(result.permalink, None);
}

#[tokio::test]
async fn test_match_ignores_www_prefix_and_fragment() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = page(r#"<p><a href="http://www.example.com/target#comments">link</a></p>"#);
    let linkback = extractor(HashMap::from([(referrer.clone(), ArcStr::from(html))]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(result.found);
}

#[tokio::test]
async fn test_no_link_means_not_found() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = page(r#"<p><a href="http://elsewhere.example.net/">unrelated</a></p>"#);
    let linkback = extractor(HashMap::from([(referrer.clone(), ArcStr::from(html))]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(!result.found);
    assert_eq!(result.excerpt, "");
}

#[tokio::test]
async fn test_long_excerpt_is_truncated_with_ellipsis() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = page(&format!(
        r#"<p><a href="{}">link</a> {}</p>"#,
        TARGET,
        "x".repeat(600)
    ));
    let linkback = extractor(HashMap::from([(referrer.clone(), ArcStr::from(html))]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(result.found);
    assert_eq!(result.excerpt.chars().count(), 503);
    assert!(result.excerpt.ends_with("..."));
}

#[tokio::test]
async fn test_unreachable_referrer_degrades_to_empty_result() {
    let linkback = Linkback::spawn(Net::mock_empty(), Log::Mock);

    let result = linkback
        .extract(
            ArcStr::from("http://unreachable.example.org/"),
            ArcStr::from(TARGET),
        )
        .await;

    assert_eq!(result, LinkbackResult::default());
}

#[tokio::test]
async fn test_feed_phase_overrides_html_phase() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = format!(
        concat!(
            "<html><head><title>Referring Page</title>",
            r#"<link rel="alternate" type="application/rss+xml" title="RSS" href="/feed.rss"/>"#,
            "</head><body><p>Read <a href=\"{}\">this</a>.</p></body></html>"
        ),
        TARGET
    );
    let feed = format!(
        concat!(
            r#"<rss version="2.0"><channel><title>Example Feed</title>"#,
            "<item><title>A post</title><link>http://blog.example.org/post</link>",
            "<description>&lt;p&gt;See {} for details&lt;/p&gt;</description></item>",
            "</channel></rss>"
        ),
        TARGET
    );
    let linkback = extractor(HashMap::from([
        (referrer.clone(), ArcStr::from(html)),
        (
            ArcStr::from("http://blog.example.org/feed.rss"),
            ArcStr::from(feed),
        ),
    ]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(result.found);
    assert_eq!(result.title, "Example Feed: A post");
    assert_eq!(
        result.permalink,
        Some(ArcStr::from("http://blog.example.org/post"))
    );
    assert_eq!(
        result.excerpt,
        ArcStr::from(format!("See {} for details", TARGET))
    );
}

#[tokio::test]
async fn test_unparsable_feed_keeps_html_phase_result() {
    let referrer = ArcStr::from("http://blog.example.org/post");
    let html = format!(
        concat!(
            "<html><head><title>Referring Page</title>",
            r#"<link rel="alternate" type="application/rss+xml" title="RSS" href="/feed.rss"/>"#,
            "</head><body><p>Read <a href=\"{}\">this</a>.</p></body></html>"
        ),
        TARGET
    );
    let linkback = extractor(HashMap::from([
        (referrer.clone(), ArcStr::from(html)),
        (
            ArcStr::from("http://blog.example.org/feed.rss"),
            ArcStr::from("this is not xml"),
        ),
    ]));

    let result = linkback.extract(referrer, ArcStr::from(TARGET)).await;

    assert!(result.found);
    assert_eq!(result.title, "Referring Page");
    assert_eq!(result.permalink, None);
}

#[test]
fn test_title_accumulation_stops_at_threshold() {
    let scanner = Scanner::new();
    let first = "a".repeat(60);
    let html = format!(
        "<html><head><title>{}<br/>never appended</title></head><body></body></html>",
        first
    );

    let scan = scanner.scan(&html, "http://blog.example.org/", TARGET);

    // The chunk that crossed the threshold completes, later chunks do not.
    assert_eq!(scan.title, first);
}

#[test]
fn test_divider_tracking_picks_last_divider_before_match() {
    let scanner = Scanner::new();
    let html = page(&format!(
        r#"<p>first paragraph</p><p>second with <a href="{}">link</a> here</p><p>third</p>"#,
        TARGET
    ));

    let scan = scanner.scan(&html, "http://blog.example.org/", TARGET);

    assert!(scan.found);
    let excerpt = &html[scan.start..scan.end];
    assert!(excerpt.contains("second with"));
    assert!(!excerpt.contains("first paragraph"));
    assert!(!excerpt.contains("third"));
}

#[test]
fn test_feed_link_resolution() {
    let scanner = Scanner::new();
    let referrer = "http://blog.example.org:8080/entries/post";

    for (href, expected) in [
        (
            "http://feeds.example.org/blog.rss",
            "http://feeds.example.org/blog.rss".to_string(),
        ),
        (
            "/feed.rss",
            "http://blog.example.org:8080/feed.rss".to_string(),
        ),
        (
            "//feeds.example.org/blog.rss",
            "http://feeds.example.org/blog.rss".to_string(),
        ),
        (
            "feed.rss",
            "http://blog.example.org:8080/entries/feed.rss".to_string(),
        ),
    ] {
        let html = format!(
            r#"<html><head><link type="application/rss+xml" title="RSS" href="{}"/></head></html>"#,
            href
        );
        let scan = scanner.scan(&html, referrer, TARGET);
        assert_eq!(scan.feed_url.as_deref(), Some(expected.as_str()));
    }
}
