//! Library entry point for the bloghub crate.
//! This file re-exports key types for use in the binary and in tests.

pub mod app;
pub mod bookmarks;
pub mod env;
pub mod fs;
pub mod linkback;
pub mod log;
pub mod net;
pub mod render;
pub mod urls;
pub mod utils;

#[macro_use]
pub mod macros;

pub use utils::*;

/// Default buffer size used for actor channels throughout the application.
pub const BUFFER_SIZE: usize = 128;
