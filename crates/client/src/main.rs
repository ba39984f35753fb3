//! Console host for the role-playing game.
//!
//! Reads chat-style commands (`begin`, `move:north`, `attack`, ...) from
//! stdin, drives one session through the runtime, and prints every message
//! the game sends back.
//!
//! ```bash
//! RPG_DIFFICULTY=hard RUST_LOG=debug cargo run -p rpg-cli
//! ```
mod app;
mod config;
mod logging;

use anyhow::Result;

use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(&config.session_id)?;

    app::run(config).await
}
