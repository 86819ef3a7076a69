//! Configuration file handling for khepri.
//!
//! Settings live in `config.toml` inside the platform config directory
//! (e.g. `~/.config/khepri/config.toml` on Linux). Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use khepri_core::{DEFAULT_SCROLL_SPEED, Palette, SceneMode};
use log::{LevelFilter, debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneMode,
    /// LED color palette.
    pub palette: Palette,
    /// World scroll per frame for the scrolling scene.
    pub scroll_speed: f32,
    /// Frames per second.
    pub frame_rate: u32,
    /// Fixed RNG seed for reproducible grids.
    pub seed: Option<u64>,
    /// Show the key help line.
    pub show_help: bool,
    /// Log file verbosity.
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneMode::default(),
            palette: Palette::default(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            frame_rate: 30,
            seed: None,
            show_help: true,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    pub const MIN_FRAME_RATE: u32 = 1;
    pub const MAX_FRAME_RATE: u32 = 120;

    /// Platform directories for khepri.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "khepri")
    }

    /// Path of the config file.
    pub fn path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config, falling back to defaults on any problem.
    ///
    /// Problems are reported through `log`, so install a logger first.
    pub fn load() -> Self {
        Self::load_or_default(Self::path())
    }

    fn load_or_default(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            warn!("no config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("failed to load config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Read and sanitize the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config.sanitized())
    }

    /// Write the config to its default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range values with usable ones.
    pub fn sanitized(mut self) -> Self {
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            warn!(
                "scroll_speed {} is invalid, using {}",
                self.scroll_speed, DEFAULT_SCROLL_SPEED
            );
            self.scroll_speed = DEFAULT_SCROLL_SPEED;
        }
        self.frame_rate = self
            .frame_rate
            .clamp(Self::MIN_FRAME_RATE, Self::MAX_FRAME_RATE);
        self
    }
}
