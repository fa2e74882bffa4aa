//! Content loaders for reading game data from files.
//!
//! Map layouts come from JSON or RON files, motion tuning and sprite tables
//! from TOML. Every loader returns core types ready to hand to the runtime.

pub mod config;
pub mod map;

pub use config::{ConfigLoader, ContentConfig};
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
