//! Catalogue configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid configuration JSON
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value failed validation
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "CATALOG_CONFIG_IO",
            ConfigError::Parse(_) => "CATALOG_CONFIG_PARSE",
            ConfigError::Invalid(_) => "CATALOG_CONFIG_INVALID",
        }
    }
}

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Sort field used when a query leaves `sort_by` empty (default: "name")
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,

    /// Body fields a search term is matched against (default: name, sku)
    #[serde(default = "default_searchable_fields")]
    pub searchable_fields: Vec<String>,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_sort_field() -> String {
    "name".to_string()
}

fn default_searchable_fields() -> Vec<String> {
    vec!["name".to_string(), "sku".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_sort_field: default_sort_field(),
            searchable_fields: default_searchable_fields(),
            log_level: default_log_level(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;

        let path_display = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("path", &path_display),
                ("default_sort_field", &config.default_sort_field),
                ("log_level", &config.log_level),
            ],
        );

        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: CatalogConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_sort_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_sort_field must not be blank".to_string(),
            ));
        }

        if self.searchable_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "searchable_fields must name at least one field".to_string(),
            ));
        }

        if self.searchable_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "searchable_fields must not contain blank names".to_string(),
            ));
        }

        self.min_severity()?;

        Ok(())
    }

    /// Maps `log_level` to a logger severity
    pub fn min_severity(&self) -> ConfigResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error or fatal.",
                self.log_level
            ))
        })
    }

    /// Installs `log_level` as the process-wide logger threshold
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.min_severity()?);
        Ok(())
    }
}
