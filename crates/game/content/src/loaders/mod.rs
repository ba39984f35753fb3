//! Loaders for operator-supplied data files.
//!
//! - `config.toml`: [`GameConfig`](rpg_core::GameConfig) tunables
//! - `story.ron`: story events overriding the built-in milestone catalog

pub mod config;
pub mod story;

pub use config::ConfigLoader;
pub use story::StoryCatalogLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
