//! Generic YAML configuration I/O

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Load configuration from a YAML file
///
/// A missing file yields the default config. An unreadable or invalid file
/// logs a warning and also yields the default; loading never fails.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: No config at {:?}, using defaults", path);
        return T::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("load_config: Failed to read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Failed to parse {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories
///
/// The YAML is written to a sibling `.tmp` file first and renamed over
/// `path`, so a failed write leaves the previous file intact.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Cannot serialize config")?;
    let bytes = yaml.len();
    let staging = staging_path(path);
    std::fs::write(&staging, yaml).with_context(|| format!("Cannot write {:?}", staging))?;
    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(e).with_context(|| format!("Cannot replace {:?}", path));
    }

    log::debug!("save_config: {} bytes committed to {:?}", bytes, path);
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudioConfig;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: StudioConfig = load_config(Path::new("/nonexistent/sonic-remix/config.yaml"));
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_roundtrip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = StudioConfig::default();
        config.remix.style_id = "drill-edit".to_string();
        config.remix.intensity = 55.0;
        config.display.master_volume = 40;

        save_config(&config, &path).unwrap();
        let loaded: StudioConfig = load_config(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "stale: true\n").unwrap();

        let mut config = StudioConfig::default();
        config.remix.randomness = 12.0;
        save_config(&config, &path).unwrap();

        let loaded: StudioConfig = load_config(&path);
        assert_eq!(loaded.remix.randomness, 12.0);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(staging_path(&path), dir.path().join("config.yaml.tmp"));
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "remix: [not, a, map").unwrap();

        let config: StudioConfig = load_config(&path);
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timing:\n  playback_tick_ms: 50\n").unwrap();

        let config: StudioConfig = load_config(&path);
        assert_eq!(config.timing.playback_tick_ms, 50);
        assert_eq!(config.timing.progress_tick_ms, 50);
        assert_eq!(config.remix.style_id, "trap-flip");
    }
}
