use crate::config::APP_NAME;
use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// Returns `None` when the path starts with `~` but the home directory
/// cannot be determined. Non-tilde paths are always returned as-is.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if path == "~" {
        dirs::home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        Some(PathBuf::from(path))
    }
}

/// Resolve `$<xdg_var>/photoscout`, falling back to `~/<fallback>/photoscout`.
#[cfg(unix)]
fn xdg_dir(xdg_var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(value) = std::env::var(xdg_var)
        && !value.is_empty()
    {
        return PathBuf::from(value).join(APP_NAME);
    }
    let mut dir = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    for part in fallback {
        dir.push(part);
    }
    dir.join(APP_NAME)
}

/// Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

pub fn state_dir() -> PathBuf {
    #[cfg(unix)]
    {
        xdg_dir("XDG_STATE_HOME", &[".local", "state"])
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        xdg_dir("XDG_CACHE_HOME", &[".cache"])
    }
    #[cfg(windows)]
    {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(
            expand_tilde("/absolute/path"),
            Some(PathBuf::from("/absolute/path"))
        );
    }

    #[test]
    fn tilde_with_rest_expands() {
        let result = expand_tilde("~/history.toml").expect("home dir should exist in test env");
        assert!(result.to_string_lossy().ends_with("history.toml"));
        assert!(!result.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn tilde_in_middle_not_expanded() {
        assert_eq!(
            expand_tilde("/some/~/path"),
            Some(PathBuf::from("/some/~/path"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn xdg_override_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("xdg");

        unsafe { std::env::set_var("PHOTOSCOUT_TEST_XDG", &custom) };
        let overridden = xdg_dir("PHOTOSCOUT_TEST_XDG", &[".state"]);
        unsafe { std::env::set_var("PHOTOSCOUT_TEST_XDG", "") };
        let fallback = xdg_dir("PHOTOSCOUT_TEST_XDG", &[".state"]);
        unsafe { std::env::remove_var("PHOTOSCOUT_TEST_XDG") };

        assert_eq!(overridden, custom.join(APP_NAME));
        assert!(
            fallback.ends_with(format!(".state/{APP_NAME}").as_str()),
            "expected fallback under ~/.state, got: {fallback:?}"
        );
    }
}
