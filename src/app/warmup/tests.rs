use std::collections::HashMap;

use super::*;
use crate::app::config::{Config, Data};
use crate::arc_slice;

fn full_render_mock(weblogs: &[&str]) -> Render {
    let mut responses = HashMap::new();
    for weblog in weblogs {
        for template in ["weblog-entries-rss", "weblog-entries-atom"] {
            responses.insert(
                ArcStr::from(format!("{}:{}", template, weblog)),
                ArcStr::from(format!("{} for {}", template, weblog)),
            );
        }
    }
    Render::mock(responses)
}

#[tokio::test]
async fn test_warmup_fills_cache_for_all_weblogs() {
    let config = Config::mock(Data {
        weblogs: arc_slice!["alpha", "beta"],
        ..Data::default()
    });
    let cache = FeedCache::mock();
    let job = WarmupJob::new(
        config,
        full_render_mock(&["alpha", "beta"]),
        cache.clone(),
        Log::Mock,
    );

    job.execute().await;

    // Two weblogs, two formats each.
    assert_eq!(cache.len().await, 4);
    let key = ArcStr::from("weblog/alpha/entries/rss");
    let entry = cache.get(key).await.unwrap();
    assert_eq!(entry.content, "weblog-entries-rss for alpha");
}

#[tokio::test]
async fn test_warmup_skips_disabled_formats() {
    let config = Config::mock(Data {
        weblogs: arc_slice!["alpha"],
        feed_entries_atom: false,
        ..Data::default()
    });
    let cache = FeedCache::mock();
    let job = WarmupJob::new(config, full_render_mock(&["alpha"]), cache.clone(), Log::Mock);

    job.execute().await;

    assert_eq!(cache.len().await, 1);
    assert!(
        cache
            .get(ArcStr::from("weblog/alpha/entries/rss"))
            .await
            .is_some()
    );
    assert!(
        cache
            .get(ArcStr::from("weblog/alpha/entries/atom"))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_warmup_continues_past_failing_weblog() {
    let config = Config::mock(Data {
        weblogs: arc_slice!["broken", "healthy"],
        feed_entries_atom: false,
        ..Data::default()
    });
    let cache = FeedCache::mock();

    // The mock only knows how to render `healthy`, so `broken` fails.
    let job = WarmupJob::new(config, full_render_mock(&["healthy"]), cache.clone(), Log::Mock);

    job.execute().await;

    assert_eq!(cache.len().await, 1);
    assert!(
        cache
            .get(ArcStr::from("weblog/healthy/entries/rss"))
            .await
            .is_some()
    );
}

#[tokio::test]
async fn test_warmup_with_no_weblogs_is_a_noop() {
    let config = Config::mock_default();
    let cache = FeedCache::mock();
    let job = WarmupJob::new(config, full_render_mock(&[]), cache.clone(), Log::Mock);

    job.execute().await;

    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_feed_model_contents() {
    let config = Config::mock(Data {
        site_url: ArcStr::from("http://example.com"),
        ..Data::default()
    });
    let request = FeedRequest {
        weblog: ArcStr::from("myblog"),
        kind: FeedKind::Entries,
        format: FeedFormat::Atom,
    };

    let model = model::feed_model(&config, &request).await;

    assert_eq!(model.get("weblog").unwrap(), &"myblog");
    assert_eq!(model.get("home_url").unwrap(), &"http://example.com/myblog/");
    assert_eq!(
        model.get("self_url").unwrap(),
        &"http://example.com/myblog/feed/atom"
    );
    // RFC 3339 timestamps carry a `T` date/time separator.
    assert!(model.get("updated").unwrap().contains('T'));
}
