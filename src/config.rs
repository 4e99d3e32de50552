//! Configuration System
//!
//! Layered configuration for the crawler and logging: built-in defaults, the
//! global config file, workspace config files, then `HMTREE_` environment
//! variables. Later layers override earlier ones.

use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmtreeConfig {
    /// Directory crawl settings
    #[serde(default)]
    pub crawler: WalkerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Crawler(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Crawler(msg) => write!(f, "Crawler: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl HmtreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.crawler.max_depth == Some(0) {
            errors.push(ValidationError::Crawler(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if let Some(ext) = &self.crawler.extension {
            if ext.trim_start_matches('.').is_empty() {
                errors.push(ValidationError::Crawler(
                    "extension filter cannot be empty".to_string(),
                ));
            }
        }
        if self.crawler.ignore_patterns.iter().any(|p| p.is_empty()) {
            errors.push(ValidationError::Crawler(
                "ignore patterns cannot be empty".to_string(),
            ));
        }

        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "unknown level '{}'",
                self.logging.level
            )));
        }
        if self.logging.format != "text" && self.logging.format != "json" {
            errors.push(ValidationError::Logging(format!(
                "unknown format '{}'",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
