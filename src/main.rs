use std::path::Path;

use clap::{Parser, Subcommand};
use bloghub::app::cache::FeedCache;
use bloghub::app::config::{Config, PathOpt, StrOpt, USizeOpt};
use bloghub::app::warmup::WarmupJob;
use bloghub::bookmarks;
use bloghub::env::Env;
use bloghub::fs::Fs;
use bloghub::linkback::Linkback;
use bloghub::log::Log;
use bloghub::net::Net;
use bloghub::render::Render;
use bloghub::urls;

use bloghub::{ArcOsStr, ArcPath, ArcStr};

#[derive(Parser)]
#[command(name = "bloghub")]
#[command(about = "Weblog feed cache warmup and linkback extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-render the configured weblog feeds into the cache
    Warmup,
    /// Check whether a remote page links back to one of our entries
    Linkback {
        /// URL of the page that supposedly links to us
        #[arg(required = true)]
        referrer: String,
        /// URL of our entry the page should link to
        #[arg(required = true)]
        target: String,
    },
    /// Import an OPML bookmarks file
    ImportBookmarks {
        /// Path to the OPML file
        #[arg(required = true)]
        file: String,
    },
    /// Print the canonical URLs for a planet group
    GroupUrl {
        /// The planet name
        #[arg(required = true)]
        planet: String,
        /// The group name
        #[arg(required = true)]
        group: String,
        /// Page number (0 means the unpaged view)
        #[arg(short, long, default_value = "0")]
        page: usize,
        /// Also print the feed URL for the given format
        #[arg(long)]
        feed: Option<String>,
        /// Also print the OPML URL
        #[arg(long)]
        opml: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize actors
    let env = Env::spawn();
    let fs = Fs::spawn();

    let config_path = env.env(ArcOsStr::from("HOME")).await?;
    let config_path = Path::new(&config_path)
        .join(".config")
        .join("bloghub")
        .join("config.toml");
    let config_path = ArcPath::from(&config_path);

    let config = Config::spawn(fs.clone(), config_path);
    let res = config.load().await;

    if res.is_err() {
        config.save().await?;
    }

    let log = Log::spawn(
        fs.clone(),
        config.log_level().await,
        config.usize(USizeOpt::MaxAge).await,
        config.path(PathOpt::LogDir).await,
    )
    .await?;
    log.collect_garbage().await;

    log.info("Starting bloghub CLI");

    match cli.command {
        Commands::Warmup => {
            handle_warmup_command(config, log.clone()).await?;
        }
        Commands::Linkback { referrer, target } => {
            handle_linkback_command(config, log.clone(), referrer, target).await?;
        }
        Commands::ImportBookmarks { file } => {
            handle_import_bookmarks_command(&fs, file).await?;
        }
        Commands::GroupUrl {
            planet,
            group,
            page,
            feed,
            opml,
        } => {
            handle_group_url_command(&config, planet, group, page, feed, opml).await;
        }
    }

    let _ = log.flush().await;

    Ok(())
}

/// Handle the warmup command by rendering every enabled feed into the cache
async fn handle_warmup_command(config: Config, log: Log) -> anyhow::Result<()> {
    let render = Render::spawn();
    let cache = FeedCache::spawn(config.clone(), log.clone()).await;

    let job = WarmupJob::new(config, render, cache.clone(), log);
    job.execute().await;

    println!("Warmup complete, {} feeds cached", cache.len().await);

    Ok(())
}

/// Handle the linkback command and print the extraction result
async fn handle_linkback_command(
    config: Config,
    log: Log,
    referrer: String,
    target: String,
) -> anyhow::Result<()> {
    let net = Net::spawn(config, log.clone()).await?;
    let linkback = Linkback::spawn(net, log);

    let result = linkback
        .extract(ArcStr::from(referrer), ArcStr::from(target))
        .await;

    println!("Found: {}", result.found);
    println!("Title: {}", result.title);
    println!("Excerpt: {}", result.excerpt);
    match result.permalink {
        Some(permalink) => println!("Permalink: {}", permalink),
        None => println!("Permalink: (none)"),
    }

    Ok(())
}

/// Handle the import-bookmarks command by parsing an OPML file
async fn handle_import_bookmarks_command(fs: &Fs, file: String) -> anyhow::Result<()> {
    let (folder, imported) = bookmarks::import(fs, ArcPath::from(file.as_str())).await?;

    println!("Imported {} bookmarks into folder {}", imported.len(), folder);
    for bookmark in &imported {
        match (&bookmark.feed_url, &bookmark.site_url) {
            (Some(feed), _) => println!("  {} - {}", bookmark.name, feed),
            (None, Some(site)) => println!("  {} - {}", bookmark.name, site),
            (None, None) => println!("  {}", bookmark.name),
        }
    }

    Ok(())
}

/// Handle the group-url command by printing the requested canonical URLs
async fn handle_group_url_command(
    config: &Config,
    planet: String,
    group: String,
    page: usize,
    feed: Option<String>,
    opml: bool,
) {
    let site = config.str(StrOpt::SiteUrl).await;
    let planet = Some(planet.as_str());
    let group = Some(group.as_str());

    match urls::group_url(&site, planet, group, page) {
        Some(url) => println!("Group: {}", url),
        None => println!("Group: (missing identifiers)"),
    }

    if let Some(format) = feed {
        if let Some(url) = urls::group_feed_url(&site, planet, group, &format) {
            println!("Feed: {}", url);
        }
    }

    if opml {
        if let Some(url) = urls::group_opml_url(&site, planet, group) {
            println!("OPML: {}", url);
        }
    }
}
