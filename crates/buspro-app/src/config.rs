//! Configuration management for School Bus Pro
//!
//! Config stored at: ~/.config/buspro/config.toml

use buspro_assistant::ai::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use buspro_assistant::GeminiConfig;
use buspro_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Shortest assistant request timeout in seconds
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Environment variables checked for the assistant API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key; environment variables take precedence
    #[serde(default)]
    pub api_key: Option<String>,

    /// Assistant request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Simulated purchase delay in milliseconds
    #[serde(default = "default_purchase_delay_ms")]
    pub purchase_delay_ms: u64,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.3
}

fn default_purchase_delay_ms() -> u64 {
    2500
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            model: default_model(),
            api_base: default_api_base(),
            api_key: None,
            request_timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            purchase_delay_ms: default_purchase_delay_ms(),
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("buspro");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the stored roster and Pro flag
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("buspro");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// API key from the environment, else from the file
    pub fn resolved_api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .chain(self.api_key.clone())
            .find(|key| !key.trim().is_empty())
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            temperature: self.temperature,
            ..GeminiConfig::default()
        }
        .with_api_key(self.resolved_api_key())
        .with_api_base(self.api_base.clone())
        .with_model(self.model.clone())
        .with_timeout(self.request_timeout())
    }

    /// Set the assistant timeout; zero is rejected
    pub fn set_request_timeout(&mut self, secs: u64) -> Result<()> {
        if secs < MIN_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue(format!(
                "request timeout must be at least {} s",
                MIN_REQUEST_TIMEOUT_SECS
            ))
            .into());
        }
        self.request_timeout_secs = secs;
        Ok(())
    }

    /// Timeout for assistant calls; a hand-edited zero is raised to the minimum
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }

    pub fn purchase_delay(&self) -> Duration {
        Duration::from_millis(self.purchase_delay_ms)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "School Bus Pro Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Model:          {}", self.model)?;
        writeln!(f, "API base:       {}", self.api_base)?;
        writeln!(
            f,
            "API key:        {}",
            if self.resolved_api_key().is_some() {
                "(set)"
            } else {
                "(not set)"
            }
        )?;
        writeln!(f, "Timeout:        {} s", self.request_timeout_secs)?;
        writeln!(f, "Temperature:    {}", self.temperature)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Log level:      {}", self.log_level)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            request_timeout_secs: 5,
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert_eq!(config.data_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn test_zero_timeout_rejected_and_clamped() {
        let mut config = Config::default();
        assert!(config.set_request_timeout(0).is_err());
        assert_eq!(config.request_timeout_secs, 30);
        config.set_request_timeout(5).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let hand_edited = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(hand_edited.request_timeout(), Duration::from_secs(1));
        assert_eq!(hand_edited.gemini_config().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = \"gemini-2.5-flash\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.purchase_delay_ms, 2500);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, buspro_types::Error::Config(ConfigError::ParseError(_))));
    }
}
