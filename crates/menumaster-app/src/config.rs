//! Configuration management for menumaster
//!
//! Config stored at: ~/.config/menumaster/config.toml

use menumaster_types::{ConfigError, DiningScenario, OutputFormat, Preferences, Result, SpiceLevel};
use menumaster_vision::{GeminiBackend, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables checked for the API credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (without the `/models/...` suffix)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API key stored in the file. Environment variables take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Spice level new sessions start with
    #[serde(default)]
    pub spice_level: SpiceLevel,

    /// Dining goal new sessions start with
    #[serde(default)]
    pub dining_scenario: DiningScenario,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key: None,
            output_format: OutputFormat::default(),
            spice_level: SpiceLevel::default(),
            dining_scenario: DiningScenario::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("menumaster");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// API key from the environment, falling back to the config file
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key_with(|name| std::env::var(name).ok(), self.api_key.as_deref())
    }

    /// Gemini client for this configuration.
    ///
    /// Built even without a credential; calls then fail with `MissingApiKey`.
    pub fn backend(&self) -> GeminiBackend {
        GeminiBackend::new(self.resolve_api_key(), self.model.clone())
            .with_base_url(self.api_base_url.clone())
    }

    /// Preferences a fresh session starts from
    pub fn initial_preferences(&self) -> Preferences {
        Preferences::default()
            .with_spice_level(self.spice_level)
            .with_dining_scenario(self.dining_scenario.clone())
    }
}

fn resolve_api_key_with<F>(lookup: F, file_value: Option<&str>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .chain(file_value.map(str::to_string))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Show only the last four characters of a credential
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MenuMaster Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Model:          {}", self.model)?;
        writeln!(f, "API base URL:   {}", self.api_base_url)?;
        writeln!(
            f,
            "API key:        {}",
            self.resolve_api_key()
                .map(|k| mask_key(&k))
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Spice level:    {}", self.spice_level)?;
        writeln!(f, "Dining goal:    {}", self.dining_scenario)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
