use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::vocabulary::{Language, Units};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "DARKSKY_API_KEY";

/// Client configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "si"
/// language = "de"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Provider unit code, e.g. "si" or "us".
    pub units: Option<String>,

    /// Provider language code, e.g. "en" or "zh-tw".
    pub language: Option<String>,

    /// Base URL override. Defaults to the public Dark Sky endpoint.
    pub endpoint: Option<String>,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Stored units as a typed value. An unknown stored code is an error.
    pub fn units(&self) -> Result<Option<Units>> {
        self.units
            .as_deref()
            .map(Units::try_from)
            .transpose()
            .context("Invalid `units` in configuration")
    }

    pub fn set_units(&mut self, units: Option<Units>) {
        self.units = units.map(|u| u.as_str().to_string());
    }

    pub fn language(&self) -> Result<Option<Language>> {
        self.language
            .as_deref()
            .map(Language::try_from)
            .transpose()
            .context("Invalid `language` in configuration")
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.language = language.map(|l| l.as_str().to_string());
    }

    /// Replace the stored key with `value` when it is set and non-empty.
    pub fn override_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    /// `DARKSKY_API_KEY` takes precedence over the stored key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            Self::load_from(&path)?
        } else {
            // First run: no config file.
            Self::default()
        };

        cfg.override_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "darksky", "darksky-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
