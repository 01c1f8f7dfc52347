use std::collections::HashMap;

use super::{Render, RenderError, data};
use crate::ArcStr;

fn feed_model() -> data::Model {
    HashMap::from([
        (ArcStr::from("weblog"), ArcStr::from("myblog")),
        (
            ArcStr::from("home_url"),
            ArcStr::from("http://example.com/myblog/"),
        ),
        (
            ArcStr::from("self_url"),
            ArcStr::from("http://example.com/myblog/feed/rss"),
        ),
        (
            ArcStr::from("updated"),
            ArcStr::from("Mon, 01 Jan 2024 00:00:00 +0000"),
        ),
    ])
}

#[tokio::test]
async fn test_render_rss_template() {
    let render = Render::spawn();
    let content = render
        .render(ArcStr::from("weblog-entries-rss"), feed_model())
        .await
        .unwrap();

    assert!(content.contains("<rss version=\"2.0\""));
    assert!(content.contains("<title>myblog</title>"));
    assert!(content.contains("href=\"http://example.com/myblog/feed/rss\""));
    assert!(!content.contains("${"));
}

#[tokio::test]
async fn test_render_atom_template() {
    let render = Render::spawn();
    let mut model = feed_model();
    model.insert(
        ArcStr::from("self_url"),
        ArcStr::from("http://example.com/myblog/feed/atom"),
    );

    let content = render
        .render(ArcStr::from("weblog-entries-atom"), model)
        .await
        .unwrap();

    assert!(content.contains("<feed xmlns=\"http://www.w3.org/2005/Atom\">"));
    assert!(content.contains("href=\"http://example.com/myblog/feed/atom\""));
    assert!(!content.contains("${"));
}

#[tokio::test]
async fn test_render_unknown_template() {
    let render = Render::spawn();
    let result = render
        .render(ArcStr::from("weblog-entries-opml"), feed_model())
        .await;

    assert_eq!(
        result,
        Err(RenderError::UnknownTemplate(ArcStr::from(
            "weblog-entries-opml"
        )))
    );
}

#[tokio::test]
async fn test_render_missing_model_value() {
    let render = Render::spawn();
    let mut model = feed_model();
    model.remove("updated");

    let result = render
        .render(ArcStr::from("weblog-entries-rss"), model)
        .await;

    assert_eq!(
        result,
        Err(RenderError::MissingValue {
            template: ArcStr::from("weblog-entries-rss"),
            key: ArcStr::from("updated"),
        })
    );
}

#[tokio::test]
async fn test_mock_render() {
    let render = Render::mock(HashMap::from([(
        ArcStr::from("weblog-entries-rss:myblog"),
        ArcStr::from("rendered content"),
    )]));

    let result = render
        .render(ArcStr::from("weblog-entries-rss"), feed_model())
        .await
        .unwrap();
    assert_eq!(result, ArcStr::from("rendered content"));

    let mut other = feed_model();
    other.insert(ArcStr::from("weblog"), ArcStr::from("otherblog"));
    let result = render
        .render(ArcStr::from("weblog-entries-rss"), other)
        .await;
    assert!(result.is_err());
}
