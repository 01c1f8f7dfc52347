//! In-memory caches for rendered weblog content.

pub mod feed;

pub use feed::FeedCache;
