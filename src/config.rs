use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppError;

const DEFAULT_CONFIG_FILE: &str = "stylist";
const CONFIG_PATH_VAR: &str = "STYLIST_CONFIG";
const ENV_PREFIX: &str = "STYLIST";

/// Top level settings for the stylist service.
///
/// Values are layered: built-in defaults, then an optional config file
/// (`stylist.toml` or the path in `STYLIST_CONFIG`), then environment
/// variables such as `STYLIST_SERVICE__TIMEOUT_MS=2000`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub service: ServiceSettings,
    pub recommendation: RecommendationSettings,
}

/// Limits applied around the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub concurrency_limit: usize,
    pub timeout_ms: u64,
}

/// Parameters of the chat-completion call used for outfit recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub outfit_count: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            service: ServiceSettings::default(),
            recommendation: RecommendationSettings::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            concurrency_limit: 16,
            timeout_ms: 10_000,
        }
    }
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.8,
            max_tokens: 2000,
            outfit_count: 4,
        }
    }
}

impl Settings {
    /// Load settings from the default file location and the environment.
    pub fn load() -> Result<Self, AppError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load_from(Some(Path::new(&path))),
            Err(_) => Self::load_from(None),
        }
    }

    /// Load settings, reading `path` if given instead of `stylist.toml`.
    pub fn load_from(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.service.validate()?;
        self.recommendation.validate()
    }

    /// The configured log level, falling back to INFO when unparsable.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl ServiceSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.concurrency_limit == 0 {
            return Err(AppError::InvalidSettings(
                "Concurrency limit must be greater than 0".to_string(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(AppError::InvalidSettings(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl RecommendationSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidSettings(
                "Model name must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidSettings(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(AppError::InvalidSettings(
                "Max tokens must be greater than 0".to_string(),
            ));
        }

        if self.outfit_count == 0 {
            return Err(AppError::InvalidSettings(
                "Outfit count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
