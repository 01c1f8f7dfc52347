use std::collections::HashMap;

use crate::{
    ArcStr,
    app::cache::feed::{FeedFormat, FeedRequest},
    app::config::{Config, StrOpt},
    render::Model,
    urls,
};

/// Builds the rendering model for a feed request.
///
/// The `updated` timestamp uses RFC 2822 for RSS and RFC 3339 for Atom, per
/// the respective feed specifications.
pub async fn feed_model(config: &Config, request: &FeedRequest) -> Model {
    let site_url = config.str(StrOpt::SiteUrl).await;
    let home_url = urls::weblog_url(&site_url, &request.weblog);
    let self_url = format!("{}feed/{}", home_url, request.format);

    let now = chrono::Utc::now();
    let updated = match request.format {
        FeedFormat::Rss => now.to_rfc2822(),
        FeedFormat::Atom => now.to_rfc3339(),
    };

    HashMap::from([
        (ArcStr::from("weblog"), request.weblog.clone()),
        (ArcStr::from("site_url"), site_url),
        (ArcStr::from("home_url"), ArcStr::from(home_url)),
        (ArcStr::from("self_url"), ArcStr::from(self_url)),
        (ArcStr::from("updated"), ArcStr::from(updated)),
    ])
}
