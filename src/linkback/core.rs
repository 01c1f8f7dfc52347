use serde::Deserialize;
use tokio::{sync::mpsc::Receiver, task::JoinHandle};

use super::data::LinkbackResult;
use super::message::Message;
use super::parse::{self, Scanner};
use crate::{ArcStr, log::Log, net::Net};

/// The core implementation of the linkback actor.
pub struct Core {
    net: Net,
    log: Log,
    scanner: Scanner,
}

/// Minimal RSS 2.0 document shape, just enough for the feed phase.
#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

impl Core {
    /// Creates a new linkback actor core.
    pub fn new(net: Net, log: Log) -> Self {
        Self {
            net,
            log,
            scanner: Scanner::new(),
        }
    }

    /// Transforms the core into an actor ready to receive messages.
    pub fn spawn(self) -> (super::Linkback, JoinHandle<()>) {
        let (tx, rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(self.run(rx));
        (super::Linkback::Actual(tx), handle)
    }

    async fn run(self, mut rx: Receiver<Message>) {
        while let Some(msg) = rx.recv().await {
            match msg {
                Message::Extract {
                    referrer,
                    target,
                    tx,
                } => {
                    let result = self.handle_extract(referrer, target).await;
                    let _ = tx.send(result);
                }
            }
        }
    }

    /// Runs both extraction phases, degrading to a partial result on failure.
    ///
    /// The feed phase only runs when the HTML phase discovered a feed URL,
    /// and its match overrides the HTML-phase fields.
    async fn handle_extract(&self, referrer: ArcStr, target: ArcStr) -> LinkbackResult {
        let mut result = LinkbackResult::default();

        let feed_url = match self.extract_from_html(&referrer, &target, &mut result).await {
            Ok(feed_url) => feed_url,
            Err(err) => {
                self.log
                    .debug(format!("Extracting linkback from {}: {:#}", referrer, err));
                None
            }
        };

        if let Some(feed_url) = feed_url {
            if let Err(err) = self.extract_from_feed(&feed_url, &target, &mut result).await {
                self.log
                    .debug(format!("Extracting linkback from feed {}: {:#}", feed_url, err));
            }
        }

        result
    }

    /// HTML phase: fetch the referring page and scan its markup.
    ///
    /// # Returns
    /// The feed autodiscovery URL, when the page advertises one.
    async fn extract_from_html(
        &self,
        referrer: &ArcStr,
        target: &ArcStr,
        result: &mut LinkbackResult,
    ) -> anyhow::Result<Option<String>> {
        let body = self.net.get(referrer.clone(), None).await?;

        let scan = self.scanner.scan(&body, referrer, target);
        self.scanner.apply_html_scan(&body, &scan, result);

        if let Some(feed_url) = &scan.feed_url {
            self.log.debug(format!("Found RSS link {}", feed_url));
        }

        Ok(scan.feed_url)
    }

    /// Feed phase: fetch the discovered feed and scan its entries.
    ///
    /// The first entry whose description mentions the target URL wins and
    /// overwrites the HTML-phase result.
    async fn extract_from_feed(
        &self,
        feed_url: &str,
        target: &ArcStr,
        result: &mut LinkbackResult,
    ) -> anyhow::Result<()> {
        let body = self.net.get(ArcStr::from(feed_url), None).await?;
        let feed: Rss = serde_xml_rs::from_str(&body)?;

        let feed_title = feed.channel.title.unwrap_or_default();
        self.log
            .debug(format!("Feed parsed, title: {}", feed_title));

        let mut count = 0;
        for item in feed.channel.items {
            count += 1;

            let description = item.description.unwrap_or_default();
            if !description.contains(target.as_str()) {
                continue;
            }

            result.found = true;
            result.permalink = item.link.map(ArcStr::from);

            let entry_title = item.title.unwrap_or_default();
            result.title = if feed_title.trim().is_empty() {
                ArcStr::from(entry_title)
            } else {
                ArcStr::from(format!("{}: {}", feed_title, entry_title))
            };

            let excerpt = parse::truncate_excerpt(&parse::strip_html(&description));
            result.excerpt = ArcStr::from(excerpt);
            break;
        }

        self.log
            .debug(format!("Parsed {} articles, found linkback={}", count, result.found));

        Ok(())
    }
}
