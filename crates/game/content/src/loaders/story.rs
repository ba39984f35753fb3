//! Story catalog loader.

use std::path::Path;

use crate::catalog::StoryCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for story event catalogs from RON files.
pub struct StoryCatalogLoader;

impl StoryCatalogLoader {
    /// Load a story catalog from a RON file.
    ///
    /// Every event must be well formed (a title and one to six choices);
    /// the first offending event id is reported.
    pub fn load(path: &Path) -> LoadResult<StoryCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StoryCatalog> {
        let catalog: StoryCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse story catalog RON: {}", e))?;

        if let Some(event) = catalog.events.iter().find(|event| !event.is_well_formed()) {
            anyhow::bail!("Story event {} is malformed", event.id);
        }
        Ok(catalog)
    }
}
