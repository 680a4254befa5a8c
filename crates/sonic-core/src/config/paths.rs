//! Path utilities for studio configuration files

use std::path::PathBuf;

/// Main settings file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Theme file name
pub const THEME_FILE: &str = "theme.yaml";

/// Get the studio config directory
///
/// Returns: `~/.config/sonic-remix` (platform config dir), or `./sonic-remix`
/// when the platform has none.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonic-remix")
}

/// Get the path of a config file inside [`config_dir`]
pub fn default_config_path(filename: &str) -> PathBuf {
    config_dir().join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        assert!(config_dir().ends_with("sonic-remix"));
    }

    #[test]
    fn test_config_path_includes_filename() {
        let path = default_config_path(THEME_FILE);
        assert!(path.ends_with("sonic-remix/theme.yaml"));
    }
}
