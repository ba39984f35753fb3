//! File logging under the platform cache directory.
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory:
/// - macOS: `~/Library/Caches/rpg/logs`
/// - Linux: `~/.cache/rpg/logs` (or `$XDG_CACHE_HOME/rpg/logs`)
/// - Windows: `%LOCALAPPDATA%\rpg\cache\logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "rpg")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("rpg"))
        .join("logs")
}

/// Platform-specific directory for saved sessions.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "rpg")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Routes `tracing` output to `<log dir>/<session>/client.log`.
///
/// Logs stay out of the terminal so they never interleave with game text.
/// The returned guard flushes the writer when dropped.
pub fn setup_logging(session_id: &str) -> Result<WorkerGuard> {
    let session_log_dir = log_dir().join(session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}
