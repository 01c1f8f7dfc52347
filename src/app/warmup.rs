mod model;
#[cfg(test)]
mod tests;

use std::time::Instant;

use crate::{
    ArcStr,
    app::cache::feed::{FeedCache, FeedFormat, FeedKind, FeedRequest},
    app::config::{Config, FlagOpt},
    log::Log,
    render::Render,
};

/// The job that pre-renders feeds into the cache.
///
/// For each configured weblog and each enabled feed format, the job renders
/// the entry feed and stores it in the feed cache, so the first reader after
/// a restart gets a cache hit. A weblog that fails to render is logged and
/// skipped; it never aborts the run.
#[derive(Debug, Clone)]
pub struct WarmupJob {
    config: Config,
    render: Render,
    cache: FeedCache,
    log: Log,
}

impl WarmupJob {
    pub fn new(config: Config, render: Render, cache: FeedCache, log: Log) -> Self {
        Self {
            config,
            render,
            cache,
            log,
        }
    }

    /// Runs the warmup, one pass per enabled feed format.
    ///
    /// Weblogs are processed in their configured order. A run with no
    /// configured weblogs is a no-op.
    pub async fn execute(&self) {
        self.log.debug("Warmup starting");

        let weblogs = self.config.weblogs().await;
        if weblogs.is_empty() {
            self.log.debug("No weblogs configured, nothing to warm up");
            return;
        }

        if self.config.flag(FlagOpt::FeedEntriesRss).await {
            self.warmup_feed_cache(&weblogs, FeedKind::Entries, FeedFormat::Rss)
                .await;
        }

        if self.config.flag(FlagOpt::FeedEntriesAtom).await {
            self.warmup_feed_cache(&weblogs, FeedKind::Entries, FeedFormat::Atom)
                .await;
        }
    }

    /// Warms the cache for one kind/format combination across all weblogs.
    async fn warmup_feed_cache(&self, weblogs: &[ArcStr], kind: FeedKind, format: FeedFormat) {
        let started = Instant::now();

        for weblog in weblogs {
            self.log
                .debug(format!("Warming up {}/{} for weblog {}", kind, format, weblog));

            if let Err(err) = self.warm_one(weblog.clone(), kind, format).await {
                self.log
                    .error(format!("Error rendering for weblog {}: {:#}", weblog, err));
            }
        }

        self.log.info(format!(
            "Completed warmup for {}/{} in {} secs",
            kind,
            format,
            started.elapsed().as_secs()
        ));
    }

    /// Renders one feed and stores it in the cache.
    async fn warm_one(
        &self,
        weblog: ArcStr,
        kind: FeedKind,
        format: FeedFormat,
    ) -> anyhow::Result<()> {
        let request = FeedRequest {
            weblog,
            kind,
            format,
        };

        let model = model::feed_model(&self.config, &request).await;
        let template = ArcStr::from(format!("weblog-{}-{}", kind, format));
        let content = self.render.render(template, model).await?;

        self.cache.put(FeedCache::key(&request), content).await;

        Ok(())
    }
}
