//! Configuration for the remix studio
//!
//! - Generic YAML config loading/saving
//! - Standard config paths (`~/.config/sonic-remix/`)
//! - [`StudioConfig`]: remix defaults, timer cadence and display sizes
//!
//! # Usage
//!
//! ```ignore
//! use sonic_core::config::{load_config, save_config, default_config_path, StudioConfig};
//!
//! let path = default_config_path(CONFIG_FILE);
//! let config: StudioConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;
mod studio;

pub use io::{load_config, save_config};
pub use paths::{config_dir, default_config_path, CONFIG_FILE, THEME_FILE};
pub use studio::{DisplayConfig, RemixDefaults, StudioConfig, TimingConfig};
