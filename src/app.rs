//! Application-level modules: configuration, the feed cache, and the cache
//! warmup job.

pub mod cache;
pub mod config;
pub mod warmup;

pub use cache::FeedCache;
pub use config::Config;
pub use warmup::WarmupJob;
