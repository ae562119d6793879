//! Configuration system for Agentica
//!
//! Supports loading configuration from:
//! 1. CLI --config argument
//! 2. ~/.config/agentica/config.{AGENTICA_ENV}.json
//! 3. Default values
//!
//! Where AGENTICA_ENV can be: production (default), development, test
//!
//! # Examples
//!
//! ```
//! use agentica::config::{AppConfig, ModelProvider};
//!
//! let mut config = AppConfig::default();
//! config.model.provider = ModelProvider::OpenAI;
//! config.model.model = "gpt-4.1-mini".to_string();
//!
//! // Validate before using
//! config.validate().unwrap();
//! ```
//!
//! ## Environment Variables
//!
//! Environment variables override config file values:
//! - AGENTICA_MODEL
//! - AGENTICA_PROVIDER_URL
//! - AGENTICA_COUNTRIES_URL
//! - AGENTICA_LANG
//! - OPENAI_API_KEY (or whichever variable `model.api_key` names)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

/// Supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    OpenAI,
    Groq,
    Ollama,
}

impl ModelProvider {
    /// Base URL used when the config does not name one
    pub fn default_url(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Environment variable holding the key when the config names none
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Ollama => None,
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Groq => write!(f, "groq"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "groq" => Ok(Self::Groq),
            "ollama" => Ok(Self::Ollama),
            _ => Err(ConfigError::ValidationError(format!(
                "Unknown provider: {}",
                s
            ))),
        }
    }
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider type
    #[serde(default)]
    pub provider: ModelProvider,

    /// Base URL of the API; filled from the provider when left out
    #[serde(default)]
    pub url: String,

    /// Model identifier, opaque to the orchestration code
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (can be environment variable name like "OPENAI_API_KEY");
    /// filled with the provider's usual variable when left out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout at the transport boundary
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::OpenAI,
            url: ModelProvider::OpenAI.default_url().to_string(),
            model: default_model(),
            api_key: ModelProvider::OpenAI.default_api_key_env().map(String::from),
            timeout_secs: default_request_timeout(),
        }
    }
}

impl ModelConfig {
    /// Fill the URL and key variable the file left out from the provider's defaults
    pub fn normalize(&mut self) {
        if self.url.trim().is_empty() {
            self.url = self.provider.default_url().to_string();
        }
        if self.api_key.is_none() {
            self.api_key = self.provider.default_api_key_env().map(String::from);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "URL cannot be empty".to_string(),
            ));
        }

        if self.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "Model name cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.provider.requires_api_key() && self.api_key.is_none() {
            return Err(ConfigError::ValidationError(format!(
                "API key required for {} provider",
                self.provider
            )));
        }

        Ok(())
    }

    /// Resolve API key from environment variable if needed
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.as_ref().and_then(|key| {
            // If the key looks like an env var name, try to resolve it
            if key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
                std::env::var(key).ok().filter(|v| !v.trim().is_empty())
            } else {
                Some(key.clone())
            }
        })
    }

    /// Startup check: the credential must be available before any call is made
    pub fn require_api_key(&self) -> Result<Option<String>, ConfigError> {
        if !self.provider.requires_api_key() {
            return Ok(self.resolve_api_key());
        }
        let name = self
            .api_key
            .clone()
            .or_else(|| self.provider.default_api_key_env().map(String::from))
            .unwrap_or_default();
        self.resolve_api_key()
            .map(Some)
            .ok_or(ConfigError::MissingCredential(name))
    }
}

/// Country data service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesConfig {
    /// REST Countries base URL; lookups go to `{base_url}/name/{country}`
    #[serde(default = "default_countries_url")]
    pub base_url: String,

    #[serde(default = "default_countries_timeout")]
    pub timeout_secs: u64,
}

fn default_countries_url() -> String {
    "https://restcountries.com/v3.1".to_string()
}

fn default_countries_timeout() -> u64 {
    15
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            base_url: default_countries_url(),
            timeout_secs: default_countries_timeout(),
        }
    }
}

/// Sampling policy per call site.
///
/// Extraction must lean deterministic; synthesis and the chain need fluent
/// prose. Both temperatures are validated to lie in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,

    #[serde(default = "default_synthesis_temperature")]
    pub synthesis_temperature: f32,

    #[serde(default = "default_synthesis_temperature")]
    pub chain_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_extraction_temperature() -> f32 {
    0.3
}

fn default_synthesis_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            extraction_temperature: default_extraction_temperature(),
            synthesis_temperature: default_synthesis_temperature(),
            chain_temperature: default_synthesis_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let temperatures = [
            ("extraction_temperature", self.extraction_temperature),
            ("synthesis_temperature", self.synthesis_temperature),
            ("chain_temperature", self.chain_temperature),
        ];
        for (name, value) in temperatures {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub countries: CountriesConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Language for prompts and messages ("es" or "en"); Spanish when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;

        config.model.normalize();
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with standard priority:
    /// 1. Explicit path
    /// 2. ~/.config/agentica/config.{AGENTICA_ENV}.json
    /// 3. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            if path.exists() {
                tracing::info!("Loading config from: {:?}", path);
                return Self::from_file(path);
            } else {
                return Err(ConfigError::ValidationError(format!(
                    "Config file not found: {:?}",
                    path
                )));
            }
        }

        let env = std::env::var("AGENTICA_ENV").unwrap_or_else(|_| "production".to_string());

        if let Some(config_dir) = Self::config_dir() {
            let config_path = config_dir.join(format!("config.{}.json", env));

            if config_path.exists() {
                tracing::info!("Loading config from: {:?}", config_path);
                return Self::from_file(&config_path);
            }
        }

        tracing::info!("Using default configuration with environment overrides");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("AGENTICA_MODEL") {
            self.model.model = model;
        }

        if let Ok(url) = std::env::var("AGENTICA_PROVIDER_URL") {
            self.model.url = url;
        }

        if let Ok(url) = std::env::var("AGENTICA_COUNTRIES_URL") {
            self.countries.base_url = url;
        }

        if let Ok(lang) = std::env::var("AGENTICA_LANG") {
            self.language = Some(lang);
        }

        // API keys are resolved on-demand via resolve_api_key()
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        self.sampling.validate()?;

        if self.countries.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "countries.base_url cannot be empty".to_string(),
            ));
        }

        if self.countries.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "countries.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agentica"))
    }
}
