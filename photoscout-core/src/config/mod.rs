pub mod theme;

use crate::paths;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub use theme::{NamedColor, ThemeColor, ThemeConfig};

pub const APP_NAME: &str = "photoscout";

/// Environment variable consulted for the API key when no `--api-key` is given.
pub const API_KEY_ENV: &str = "PHOTOSCOUT_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://www.flickr.com/services/rest/";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SCROLL_THRESHOLD: usize = 3;

/// Flickr's own upper bound for `per_page`.
const MAX_PER_PAGE: u32 = 500;

pub fn config_file() -> PathBuf {
    paths::config_dir().join("config.toml")
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Flickr API key. `--api-key` and `PHOTOSCOUT_API_KEY` take precedence.
    pub api_key: Option<String>,

    #[serde(default)]
    pub api: ApiConfig,

    /// Search-as-you-type behaviour.
    #[serde(default)]
    pub search: SearchConfig,

    /// Persisted query history offered as suggestions.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// REST endpoint requests are sent to.
    #[serde(default = "ApiConfig::default_endpoint")]
    pub endpoint: String,
    /// Results per page. The service default applies when unset.
    pub per_page: Option<u32>,
    /// Request timeout in seconds. Requests never time out when unset.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    fn default_endpoint() -> String {
        DEFAULT_ENDPOINT.to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            per_page: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is sent (default: 300).
    #[serde(default = "SearchConfig::default_debounce_ms")]
    pub debounce_ms: u64,
    /// How many rows from the end of the list count as "near the end" (default: 3).
    #[serde(default = "SearchConfig::default_scroll_threshold")]
    pub scroll_threshold: usize,
}

impl SearchConfig {
    fn default_debounce_ms() -> u64 {
        DEFAULT_DEBOUNCE_MS
    }
    fn default_scroll_threshold() -> usize {
        DEFAULT_SCROLL_THRESHOLD
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
            scroll_threshold: Self::default_scroll_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Record submitted queries (default: true).
    #[serde(default = "HistoryConfig::default_enabled")]
    pub enabled: bool,
    /// Keep at most this many entries, dropping the oldest. Unbounded when unset.
    pub max_entries: Option<usize>,
    /// Store file location. Supports `~`. Defaults to the XDG state directory.
    pub file: Option<String>,
}

impl HistoryConfig {
    fn default_enabled() -> bool {
        true
    }

    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file.as_deref().and_then(paths::expand_tilde)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            max_entries: None,
            file: None,
        }
    }
}

impl Config {
    /// API key by precedence: explicit override, then the environment, then the file.
    /// Blank values are skipped.
    pub fn resolved_api_key(&self, cli_override: Option<&str>) -> Option<String> {
        let env_key = env::var(API_KEY_ENV).ok();
        [cli_override, env_key.as_deref(), self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty())
            .map(ToString::to_string)
    }

    fn validate(&self) -> Result<()> {
        if let Some(per_page) = self.api.per_page
            && !(1..=MAX_PER_PAGE).contains(&per_page)
        {
            anyhow::bail!("api.per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}");
        }
        if self.api.endpoint.trim().is_empty() {
            anyhow::bail!("api.endpoint must not be empty");
        }
        if self.history.max_entries == Some(0) {
            anyhow::bail!("history.max_entries must be at least 1");
        }
        Ok(())
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file. A missing default file yields the defaults; a missing
/// explicitly requested file is an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_file();
            if !path.exists() {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            path
        }
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("Invalid config at {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert!(config.api.per_page.is_none());
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.scroll_threshold, 3);
        assert!(config.history.enabled);
        assert!(config.history.max_entries.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"
api_key = "abc123"

[api]
endpoint = "http://localhost:8080/rest"
per_page = 50
timeout_secs = 10

[search]
debounce_ms = 0
scroll_threshold = 5

[history]
enabled = false
max_entries = 20
file = "/tmp/history.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.api.endpoint, "http://localhost:8080/rest");
        assert_eq!(config.api.per_page, Some(50));
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.search.debounce(), Duration::ZERO);
        assert_eq!(config.search.scroll_threshold, 5);
        assert!(!config.history.enabled);
        assert_eq!(config.history.max_entries, Some(20));
        assert_eq!(
            config.history.resolved_file(),
            Some(PathBuf::from("/tmp/history.toml"))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(load_config_from_str("unknown_field = true").is_err());
        assert!(load_config_from_str("[search]\ndelay = 5").is_err());
    }

    #[test]
    fn test_per_page_out_of_range_rejected() {
        let err = load_config_from_str("[api]\nper_page = 0")
            .unwrap_err()
            .to_string();
        assert!(err.contains("per_page"), "Error was: {err}");
        assert!(load_config_from_str("[api]\nper_page = 501").is_err());
        assert!(load_config_from_str("[api]\nper_page = 500").is_ok());
    }

    #[test]
    fn test_zero_max_entries_rejected() {
        assert!(load_config_from_str("[history]\nmax_entries = 0").is_err());
    }

    #[test]
    fn test_history_file_tilde_expanded() {
        let config = load_config_from_str("[history]\nfile = \"~/h.toml\"").unwrap();
        let path = config.history.resolved_file().unwrap();
        assert!(!path.to_string_lossy().contains('~'));
        assert!(path.ends_with("h.toml"));
    }

    #[test]
    fn test_api_key_override_wins() {
        let config = load_config_from_str(r#"api_key = "from-file""#).unwrap();
        assert_eq!(
            config.resolved_api_key(Some("from-cli")).as_deref(),
            Some("from-cli")
        );
    }

    #[test]
    fn test_blank_api_key_override_skipped() {
        let config = load_config_from_str(r#"api_key = "from-file""#).unwrap();
        let key = config.resolved_api_key(Some("  ")).unwrap();
        // Either the environment or the file supplies it, never the blank value
        assert!(!key.trim().is_empty());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml")))
            .unwrap_err()
            .to_string();
        assert!(err.contains("not found"), "Error was: {err}");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\ndebounce_ms = 120\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.search.debounce_ms, 120);
    }

    #[test]
    fn test_load_invalid_file_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = 5\n").unwrap();
        let err = format!("{:#}", load_config(Some(&path)).unwrap_err());
        assert!(err.contains("config.toml"), "Error was: {err}");
    }
}
