//! Application configuration
//!
//! Defaults are embedded from `config.toml`; a file on disk may replace them.

use crate::audio::SpeechConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const CONFIG_TOML: &str = include_str!("../config.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub repository: RepositoryConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Lesson repository endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Base URL of the REST endpoint (e.g., "https://project.supabase.co")
    pub url: String,
    /// Table holding one row per phoneme
    pub table: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Public media storage layout
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub public_base: String,
    pub audio_subpath: String,
    pub audio_extension: String,
    pub tracing_subpath: String,
    pub tracing_extension: String,
}

fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file on disk
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load the embedded default configuration
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(CONFIG_TOML)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.repository.url)
            .map_err(|e| ConfigError::Invalid(format!("repository.url: {}", e)))?;
        url::Url::parse(&self.media.public_base)
            .map_err(|e| ConfigError::Invalid(format!("media.public_base: {}", e)))?;
        if self.repository.table.trim().is_empty() {
            return Err(ConfigError::Invalid("repository.table is empty".into()));
        }
        if self.speech.rate <= 0.0 || self.speech.pitch <= 0.0 {
            return Err(ConfigError::Invalid(
                "speech.rate and speech.pitch must be positive".into(),
            ));
        }
        Ok(())
    }
}
