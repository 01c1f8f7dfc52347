use super::*;
use crate::app::config::{Config, Data, USizeOpt};
use crate::log::Log;

fn request(weblog: &str, format: FeedFormat) -> FeedRequest {
    FeedRequest {
        weblog: ArcStr::from(weblog),
        kind: FeedKind::Entries,
        format,
    }
}

#[test]
fn test_cache_key_is_deterministic() {
    let a = request("myblog", FeedFormat::Rss);
    let b = request("myblog", FeedFormat::Rss);

    assert_eq!(FeedCache::key(&a), FeedCache::key(&b));
    assert_eq!(FeedCache::key(&a), "weblog/myblog/entries/rss");
}

#[test]
fn test_cache_key_distinguishes_requests() {
    let rss = FeedCache::key(&request("myblog", FeedFormat::Rss));
    let atom = FeedCache::key(&request("myblog", FeedFormat::Atom));
    let other = FeedCache::key(&request("otherblog", FeedFormat::Rss));

    assert_ne!(rss, atom);
    assert_ne!(rss, other);
}

#[tokio::test]
async fn test_cache_put_and_get() {
    let config = Config::mock_default();
    let cache = FeedCache::spawn(config, Log::Mock).await;
    let key = FeedCache::key(&request("myblog", FeedFormat::Rss));

    cache.put(key.clone(), ArcStr::from("<rss/>")).await;

    let entry = cache.get(key.clone()).await.unwrap();
    assert_eq!(entry.key, key);
    assert_eq!(entry.content, "<rss/>");
    assert_eq!(entry.size, 6);
}

#[tokio::test]
async fn test_cache_get_missing() {
    let cache = FeedCache::spawn(Config::mock_default(), Log::Mock).await;

    assert!(cache.get(ArcStr::from("weblog/none/entries/rss")).await.is_none());
}

#[tokio::test]
async fn test_cache_replaces_existing_entry() {
    let cache = FeedCache::spawn(Config::mock_default(), Log::Mock).await;
    let key = FeedCache::key(&request("myblog", FeedFormat::Rss));

    cache.put(key.clone(), ArcStr::from("old")).await;
    cache.put(key.clone(), ArcStr::from("new")).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get(key).await.unwrap().content, "new");
}

#[tokio::test]
async fn test_cache_evicts_least_recently_used() {
    let config = Config::mock(Data {
        cache_capacity: 2,
        ..Data::default()
    });
    let cache = FeedCache::spawn(config, Log::Mock).await;

    let a = ArcStr::from("weblog/a/entries/rss");
    let b = ArcStr::from("weblog/b/entries/rss");
    let c = ArcStr::from("weblog/c/entries/rss");

    cache.put(a.clone(), ArcStr::from("a")).await;
    cache.put(b.clone(), ArcStr::from("b")).await;

    // Touch `a` so `b` becomes the eviction candidate.
    cache.get(a.clone()).await.unwrap();
    cache.put(c.clone(), ArcStr::from("c")).await;

    assert_eq!(cache.len().await, 2);
    assert!(cache.get(a).await.is_some());
    assert!(cache.get(b).await.is_none());
    assert!(cache.get(c).await.is_some());
}

#[tokio::test]
async fn test_cache_invalidate() {
    let cache = FeedCache::spawn(Config::mock_default(), Log::Mock).await;
    let key = FeedCache::key(&request("myblog", FeedFormat::Atom));

    cache.put(key.clone(), ArcStr::from("<feed/>")).await;

    assert!(cache.invalidate(key.clone()).await);
    assert!(!cache.invalidate(key.clone()).await);
    assert!(cache.get(key).await.is_none());
}

#[tokio::test]
async fn test_cache_respects_configured_capacity() {
    let config = Config::mock_default();
    config.set_usize(USizeOpt::CacheCapacity, 1).await;
    let cache = FeedCache::spawn(config, Log::Mock).await;

    cache
        .put(ArcStr::from("weblog/a/entries/rss"), ArcStr::from("a"))
        .await;
    cache
        .put(ArcStr::from("weblog/b/entries/rss"), ArcStr::from("b"))
        .await;

    assert_eq!(cache.len().await, 1);
}
