//! Configuration management for BlueBot
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.bluebot/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_CHAT_PATH, DEFAULT_HEALTH_PATH};
use crate::conversation::DEFAULT_GREETING;
use crate::errors::{ChatError, Result};
use crate::streaming::{DEFAULT_TICK_MS, MAX_TICK_MS, MIN_TICK_MS};
use crate::types::Language;

/// Complete configuration for BlueBot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub chat_path: String,
    pub health_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Conversation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Language tag, or "none" to omit the field
    pub language: String,
    pub greeting: String,
}

/// Terminal display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub reveal_interval_ms: u64,
    pub cursor: String,
    pub color_output: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            language: Language::default().tag().to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: DEFAULT_TICK_MS,
            cursor: "|".to_string(),
            color_output: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ChatError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".bluebot").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ChatError::ConfigError(
                "base_url must not be empty".to_string(),
            ));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ChatError::ConfigError(format!(
                "base_url must start with http:// or https://: {}",
                base_url
            )));
        }

        for (name, path) in [
            ("chat_path", &self.server.chat_path),
            ("health_path", &self.server.health_path),
        ] {
            if !path.starts_with('/') {
                return Err(ChatError::ConfigError(format!(
                    "{} must start with '/': {}",
                    name, path
                )));
            }
        }

        if self.server.request_timeout_secs == Some(0) {
            return Err(ChatError::ConfigError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.display.reveal_interval_ms) {
            return Err(ChatError::ConfigError(format!(
                "reveal_interval_ms must be between {} and {}",
                MIN_TICK_MS, MAX_TICK_MS
            )));
        }

        Language::parse_optional(&self.chat.language)
            .map_err(|e| ChatError::ConfigError(e.to_string()))?;

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChatError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ChatError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ChatError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Selected language (None when "none")
    pub fn language(&self) -> Result<Option<Language>> {
        Language::parse_optional(&self.chat.language)
    }

    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.display.reveal_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.server.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full chat endpoint URL
    pub fn chat_url(&self) -> String {
        format!(
            "{}{}",
            self.server.base_url.trim_end_matches('/'),
            self.server.chat_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.chat_url(), "http://localhost:8000/chat");
        assert_eq!(config.language().unwrap(), Some(Language::Python));
        assert_eq!(config.reveal_interval(), Duration::from_millis(5));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = Config::default();
        config.server.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.server.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_path() {
        let mut config = Config::default();
        config.server.chat_path = "chat".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_interval() {
        let mut config = Config::default();
        config.display.reveal_interval_ms = 4;
        assert!(config.validate().is_err());
        config.display.reveal_interval_ms = 16;
        assert!(config.validate().is_err());
        config.display.reveal_interval_ms = 15;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_language() {
        let mut config = Config::default();
        config.chat.language = "Cobol".to_string();
        assert!(config.validate().is_err());

        config.chat.language = "none".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.language().unwrap(), None);
    }

    #[test]
    fn test_config_validation_timeout() {
        let mut config = Config::default();
        config.server.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());
        config.server.request_timeout_secs = Some(30);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nlanguage = \"Rust\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.language().unwrap(), Some(Language::Rust));
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.base_url = "https://bot.example.com".to_string();
        config.display.reveal_interval_ms = 10;
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.base_url, "https://bot.example.com");
        assert_eq!(loaded.display.reveal_interval_ms, 10);
    }

    #[test]
    fn test_invalid_file_reports_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nreveal_interval_ms = 500\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ChatError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file_reports_config_error() {
        let err = Config::load_from_file(Path::new("/nonexistent/bluebot.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
