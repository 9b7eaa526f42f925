use photoscout_core::paths;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "photoscout.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub fn default_log_file() -> PathBuf {
    paths::cache_dir().join(LOG_FILE_NAME)
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<PathBuf> {
    let log_file = default_log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("photoscout logging initialised (level={level})");
    Ok(log_file)
}
