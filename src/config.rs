//! Configuration management for TeachAssist
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TeachAssistError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for TeachAssist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Key-value store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Draft session behaviour
    #[serde(default)]
    pub session: SessionConfig,
}

/// Provider configuration
///
/// Points at an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL; `/chat/completions` is appended
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; usually supplied through `OPENROUTER_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "anthropic/claude-3.5-haiku".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the sled database; platform data dir when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Draft session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Record a history entry for each successful refinement
    #[serde(default = "default_record_refinements")]
    pub record_refinements: bool,
}

fn default_record_refinements() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            record_refinements: default_record_refinements(),
        }
    }
}

impl Config {
    /// Load configuration from file, then apply environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(TeachAssistError::from)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(TeachAssistError::from)?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            self.provider.api_key = Some(key);
        }

        if let Ok(key) = std::env::var("TEACHASSIST_API_KEY") {
            self.provider.api_key = Some(key);
        }

        if let Ok(api_base) = std::env::var("TEACHASSIST_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("TEACHASSIST_MODEL") {
            self.provider.model = model;
        }

        if let Ok(timeout) = std::env::var("TEACHASSIST_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid TEACHASSIST_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(path) = std::env::var("TEACHASSIST_STORE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(flag) = std::env::var("TEACHASSIST_RECORD_REFINEMENTS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.session.record_refinements = true,
                "0" | "false" | "no" => self.session.record_refinements = false,
                _ => tracing::warn!("Invalid TEACHASSIST_RECORD_REFINEMENTS: {}", flag),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(store) = &cli.store {
            self.storage.path = Some(store.clone());
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_base.trim().is_empty() {
            return Err(TeachAssistError::Config("provider.api_base cannot be empty".into()).into());
        }

        if !self.provider.api_base.starts_with("http://")
            && !self.provider.api_base.starts_with("https://")
        {
            return Err(TeachAssistError::Config(format!(
                "provider.api_base must be an http(s) URL: {}",
                self.provider.api_base
            ))
            .into());
        }

        if self.provider.model.trim().is_empty() {
            return Err(TeachAssistError::Config("provider.model cannot be empty".into()).into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(TeachAssistError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.timeout_seconds > 600 {
            return Err(TeachAssistError::Config(
                "provider.timeout_seconds must be less than or equal to 600".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
