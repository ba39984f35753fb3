//! Console host configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use rpg_content::{
    ConfigLoader, FallbackContent, ProceduralContent, StoryCatalog, StoryCatalogLoader,
};
use rpg_core::{Difficulty, GameConfig};
use rpg_runtime::{OracleGenerator, Runtime, RuntimeConfig};

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// TOML file overriding [`GameConfig`] tunables.
    pub config_path: Option<PathBuf>,
    /// RON catalog replacing built-in story events by id.
    pub story_catalog: Option<PathBuf>,
    pub difficulty: Option<Difficulty>,
    pub content_timeout: Duration,
    pub player_id: String,
    pub session_id: String,
    pub save_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            story_catalog: None,
            difficulty: None,
            content_timeout: RuntimeConfig::default().content_timeout,
            player_id: "player".to_string(),
            session_id: "console".to_string(),
            save_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RPG_CONFIG_PATH` - TOML game configuration (default: built-in values)
    /// - `RPG_STORY_CATALOG` - RON story catalog (default: built-in events)
    /// - `RPG_DIFFICULTY` - `easy`, `normal`, or `hard` (default: normal)
    /// - `RPG_CONTENT_TIMEOUT_MS` - Bound on each content request (default: 5000)
    /// - `RPG_PLAYER_ID` - Player name used as the session host (default: player)
    /// - `RPG_SESSION_ID` - Session identifier and save-file name (default: console)
    /// - `RPG_SAVE_DIR` - Directory for saved sessions (default: platform-specific)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = env::var("RPG_CONFIG_PATH").ok().map(PathBuf::from);
        config.story_catalog = env::var("RPG_STORY_CATALOG").ok().map(PathBuf::from);
        config.difficulty = read_env::<Difficulty>("RPG_DIFFICULTY");
        if let Some(ms) = read_env::<u64>("RPG_CONTENT_TIMEOUT_MS") {
            config.content_timeout = Duration::from_millis(ms.max(1));
        }
        if let Some(player) = read_env::<String>("RPG_PLAYER_ID").filter(|id| !id.is_empty()) {
            config.player_id = player;
        }
        if let Some(session) = read_env::<String>("RPG_SESSION_ID").filter(|id| !id.is_empty()) {
            config.session_id = session;
        }
        config.save_dir = env::var("RPG_SAVE_DIR").ok().map(PathBuf::from);

        config
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("loading game config from {}", path.display())),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn story_catalog(&self) -> Result<StoryCatalog> {
        match &self.story_catalog {
            Some(path) => StoryCatalogLoader::load(path)
                .with_context(|| format!("loading story catalog from {}", path.display())),
            None => Ok(StoryCatalog::default()),
        }
    }

    /// Seeded procedural content backed by the deterministic fallback.
    pub fn build_runtime(&self) -> Result<Runtime> {
        let catalog = self.story_catalog()?;
        if !catalog.events.is_empty() {
            let merged = StoryCatalog::builtin().merged(catalog.clone());
            if !merged.covers_milestones() {
                warn!("story catalog leaves some milestones without an event");
            }
        }

        Ok(Runtime::builder()
            .config(RuntimeConfig {
                game_config: self.game_config()?,
                content_timeout: self.content_timeout,
                ..Default::default()
            })
            .generator(OracleGenerator::new(ProceduralContent::with_catalog(
                catalog.clone(),
            )))
            .fallback(FallbackContent::with_catalog(catalog))
            .build())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_built_in_content() {
        let config = CliConfig::default();
        assert_eq!(config.game_config().unwrap(), GameConfig::default());
        assert!(config.story_catalog().unwrap().events.is_empty());
        assert_eq!(config.content_timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_file_overrides_tunables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "max_inventory_slots = 5\nstarting_credits = 40\n").unwrap();

        let config = CliConfig {
            config_path: Some(path),
            ..Default::default()
        };
        let game = config.game_config().unwrap();
        assert_eq!(game.max_inventory_slots, 5);
        assert_eq!(game.starting_credits, 40);
    }

    #[test]
    fn missing_files_are_reported() {
        let config = CliConfig {
            story_catalog: Some(PathBuf::from("/nonexistent/story.ron")),
            ..Default::default()
        };
        assert!(config.story_catalog().is_err());
    }
}
