//! Configuration management for color-match
//!
//! Config file location:
//! - Linux: ~/.config/color-match/config.toml
//! - macOS: ~/Library/Application Support/com.colormatch.color-match/config.toml
//! - Windows: %APPDATA%/colormatch/color-match/config/config.toml
//!
//! You can override the config location by setting `COLOR_MATCH_CONFIG_PATH`.

use anyhow::{anyhow, ensure, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::Rules;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Game rules and difficulty curve
    #[serde(default)]
    pub rules: Rules,

    /// Terminal display preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config
            .rules
            .validate()
            .map_err(|reason| anyhow!("Invalid rules in {}: {reason}", path.display()))?;

        ensure!(
            (1..=MAX_SWATCH_WIDTH).contains(&config.display.swatch_width),
            "Invalid display settings in {}: swatch_width must be between 1 and {MAX_SWATCH_WIDTH}",
            path.display()
        );

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("COLOR_MATCH_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("com", "colormatch", "color-match")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Create default config file if it doesn't exist
    pub fn init() -> Result<Self> {
        let config = Self::load()?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            config.save()?;
        }

        Ok(config)
    }
}

/// Widest swatch the terminal front end will draw
pub const MAX_SWATCH_WIDTH: usize = 40;

/// Terminal display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width of a color swatch in terminal cells
    #[serde(default = "default_swatch_width")]
    pub swatch_width: usize,

    /// Print the hex code under each swatch
    #[serde(default)]
    pub show_hex: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            swatch_width: default_swatch_width(),
            show_hex: false,
        }
    }
}

fn default_swatch_width() -> usize {
    6
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}

/// Initialize configuration (load or create default)
pub fn init_config() -> Result<Config> {
    Config::init()
}
