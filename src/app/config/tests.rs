use super::*;
use crate::arc_slice;

#[tokio::test]
async fn test_config_defaults() {
    let config = Config::mock_default();

    assert_eq!(config.str(StrOpt::SiteUrl).await, "http://localhost:8080");
    assert!(config.weblogs().await.is_empty());
    assert!(config.flag(FlagOpt::FeedEntriesRss).await);
    assert!(config.flag(FlagOpt::FeedEntriesAtom).await);
    assert_eq!(config.usize(USizeOpt::Timeout).await, 30);
    assert_eq!(config.usize(USizeOpt::CacheCapacity).await, 100);
}

#[tokio::test]
async fn test_config_set_and_get() {
    let config = Config::mock_default();

    config
        .set_str(StrOpt::SiteUrl, ArcStr::from("http://example.com"))
        .await;
    config.set_flag(FlagOpt::FeedEntriesAtom, false).await;
    config.set_usize(USizeOpt::CacheCapacity, 5).await;
    config.set_weblogs(arc_slice!["alpha", "beta"]).await;

    assert_eq!(config.str(StrOpt::SiteUrl).await, "http://example.com");
    assert!(!config.flag(FlagOpt::FeedEntriesAtom).await);
    assert_eq!(config.usize(USizeOpt::CacheCapacity).await, 5);
    assert_eq!(config.weblogs().await, arc_slice!["alpha", "beta"]);
}

#[tokio::test]
async fn test_config_save_and_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(&temp_dir.path().join("config.toml"));
    let fs = Fs::spawn();

    let config = Config::spawn(fs.clone(), path.clone());
    config
        .set_str(StrOpt::SiteUrl, ArcStr::from("http://example.org"))
        .await;
    config.set_weblogs(arc_slice!["myblog"]).await;
    config.set_usize(USizeOpt::Timeout, 10).await;
    config.save().await.unwrap();

    let reloaded = Config::spawn(fs, path);
    reloaded.load().await.unwrap();

    assert_eq!(reloaded.str(StrOpt::SiteUrl).await, "http://example.org");
    assert_eq!(reloaded.weblogs().await, arc_slice!["myblog"]);
    assert_eq!(reloaded.usize(USizeOpt::Timeout).await, 10);
}

#[tokio::test]
async fn test_config_load_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = ArcPath::from(&temp_dir.path().join("missing.toml"));

    let config = Config::spawn(Fs::spawn(), path);
    assert!(config.load().await.is_err());
}

#[tokio::test]
async fn test_config_toml_round_trip() {
    let data = Data {
        site_url: ArcStr::from("http://example.net"),
        weblogs: arc_slice!["a", "b", "c"],
        feed_entries_rss: false,
        ..Data::default()
    };

    let serialized = toml::to_string_pretty(&data).unwrap();
    let parsed: Data = toml::from_str(&serialized).unwrap();

    assert_eq!(parsed.site_url, data.site_url);
    assert_eq!(parsed.weblogs, data.weblogs);
    assert!(!parsed.feed_entries_rss);
}
