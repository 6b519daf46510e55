//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-inliner.toml` in current directory
//! 4. `~/.config/sql-inliner/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [inline]
//! limit = true      # inline LIMIT/OFFSET parameters
//! strings = false   # keep string parameters bound
//!
//! [output]
//! format = "json"   # text, json, yaml
//! colored = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_INLINER_FORMAT` | Default output format |
//! | `SQL_INLINER_NO_COLOR` | Disable colored output when set to anything but `0`/`false` |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    inliner::InlineOptions
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub inline: InlineConfig,
    #[serde(default)]
    pub output: OutputConfig
}

/// Which placeholders `inline` rewrites by default
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InlineConfig {
    pub limit:   bool,
    pub strings: bool
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            limit:   true,
            strings: true
        }
    }
}

impl From<&InlineConfig> for InlineOptions {
    fn from(config: &InlineConfig) -> Self {
        Self {
            limit:   config.limit,
            strings: config.strings
        }
    }
}

/// Output defaults
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Format name used when `--format` is not given
    pub format:  Option<String>,
    pub colored: bool
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format:  None,
            colored: true
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-inliner.toml)
    /// 3. Config file in home directory (~/.config/sql-inliner/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-inliner")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-inliner.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML configuration document.
    pub fn parse(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::parse(&content)
    }

    /// Override settings from environment variables read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("SQL_INLINER_FORMAT") {
            self.output.format = Some(format);
        }
        if let Some(no_color) = lookup("SQL_INLINER_NO_COLOR") {
            let disabled = !matches!(no_color.trim().to_ascii_lowercase().as_str(), "0" | "false");
            if disabled {
                self.output.colored = false;
            }
        }
    }
}
