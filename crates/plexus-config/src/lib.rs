//! Configuration for the plexus terminal app.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file means defaults; a malformed one is an error the caller can
//! report.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use plexus_core::{AnimationSpeed, ColorTheme};
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame rate of the animation.
    pub speed: AnimationSpeed,
    /// Accent colour for text.
    pub theme: ColorTheme,
    /// RGB colour that transparency is blended against.
    pub backdrop: [u8; 3],
    /// Virtual pixels per terminal column.
    pub cell_width_px: u16,
    /// Virtual pixels per terminal row.
    pub cell_height_px: u16,
    pub splash: SplashConfig,
    pub background: BackgroundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: AnimationSpeed::default(),
            theme: ColorTheme::default(),
            backdrop: [4, 8, 18],
            cell_width_px: 8,
            cell_height_px: 16,
            splash: SplashConfig::default(),
            background: BackgroundConfig::default(),
        }
    }
}

/// Splash screen settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Show the splash screen before the main screen.
    pub enabled: bool,
    /// Show narrated captions.
    pub narration: bool,
    /// Delay before the statistics start counting up.
    pub counters_delay_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            narration: true,
            counters_delay_ms: 7000,
        }
    }
}

/// Main screen effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Particles drift toward the mouse pointer.
    pub attraction: bool,
    /// Sparks follow the mouse pointer.
    pub trail: bool,
    /// Clicks emit particle bursts.
    pub bursts: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            attraction: true,
            trail: true,
            bursts: true,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = toml::from_str(&text)?;
                tracing::debug!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(path.to_path_buf(), e)),
        }
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(parent.to_path_buf(), e))?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "plexus")
}

/// Path of the config file on this platform.
pub fn default_path() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Directory for runtime files such as the log.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}
