use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const DEFAULT_LOOKUP_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_WEATHER_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_LANGUAGE: &str = "pt";

/// Postal code lookup service (ViaCEP) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_LOOKUP_URL.to_string() }
    }
}

/// Weather service (WeatherAPI.com) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub language: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// bind = "0.0.0.0:8080"
/// timeout_secs = 10
///
/// [weather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Socket address the HTTP server listens on.
    pub bind: String,

    /// Timeout applied to every outbound request.
    pub timeout_secs: u64,

    pub lookup: LookupConfig,
    pub weather: WeatherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            lookup: LookupConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Outbound request timeout, never shorter than [`MIN_TIMEOUT_SECS`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// Returns the weather API key, or an error with a hint on how to set one.
    pub fn weather_api_key(&self) -> Result<&str> {
        self.weather
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No WeatherAPI key configured.\n\
                     Hint: run `postal-weather configure` or set WEATHER_API_KEY."
                )
            })
    }

    /// Replace the weather API key. Blank keys clear it.
    pub fn set_weather_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.weather.api_key = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    }

    /// Load config from the default location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if cfg.timeout_secs < MIN_TIMEOUT_SECS {
            bail!(
                "Invalid config file {}: timeout_secs must be at least {MIN_TIMEOUT_SECS}",
                path.display()
            );
        }

        Ok(cfg)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
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
        let dirs = ProjectDirs::from("dev", "postal-weather", "postal-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
