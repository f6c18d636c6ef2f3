//! Configuration file support.

use proftab::ConvertOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default CLI options.
    pub defaults: Defaults,
    /// Profile output settings.
    pub profile: ProfileConfig,
}

/// Default CLI options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Enable verbose output by default.
    pub verbose: bool,
    /// Enable quiet output by default.
    pub quiet: bool,
}

/// `[profile]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Values per line inside a column block.
    pub values_per_line: usize,
    /// Fail on column length mismatches instead of warning.
    pub strict: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            values_per_line: options.values_per_line,
            strict: options.strict,
        }
    }
}

impl Config {
    /// Load config from the default location (~/.config/proftab/config.toml).
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(Self::default_path())
    }

    /// Load config from a specific path.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is an error; callers fall back to the defaults and report it
    /// once logging is up.
    pub fn load_from_path(path: Option<PathBuf>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::read(&path)
    }

    fn read(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("proftab").join("config.toml"))
    }

    /// Conversion options from the `[profile]` section.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            values_per_line: self.profile.values_per_line,
            strict: self.profile.strict,
        }
    }
}
