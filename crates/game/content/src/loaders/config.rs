//! Game configuration loader.

use std::path::Path;

use rpg_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. A slot limit of zero is raised to one.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        let slots = config.max_inventory_slots;

        Ok(config.with_max_inventory_slots(slots))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_inventory_slots = 8").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_inventory_slots, 8);
        assert_eq!(config.starting_credits, GameConfig::DEFAULT_STARTING_CREDITS);
    }

    #[test]
    fn zero_slots_are_raised_to_one() {
        let config = ConfigLoader::parse("max_inventory_slots = 0").unwrap();
        assert_eq!(config.max_inventory_slots, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigLoader::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::parse("max_inventory_slots = \"many\"").is_err());
    }
}
