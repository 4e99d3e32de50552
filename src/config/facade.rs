//! Config facade: single entry point for loading configuration.

use super::merge::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::HmtreeConfig;
use crate::error::ApiError;
use config::{Environment, File};
use std::path::Path;
use tracing::debug;

/// Loads and validates `HmtreeConfig` from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace
    /// files, then `HMTREE_` environment variables (`__` separates sections,
    /// e.g. `HMTREE_CRAWLER__MIN_SIZE=1024`).
    pub fn load(workspace_root: &Path) -> Result<HmtreeConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config: HmtreeConfig = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Self::validated(config)
    }

    /// Load configuration from an explicit file, still honoring defaults and
    /// environment overrides.
    pub fn load_from_file(path: &Path) -> Result<HmtreeConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: HmtreeConfig = builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        debug!(config_path = %path.display(), "Configuration loaded from file");
        Self::validated(config)
    }

    fn validated(config: HmtreeConfig) -> Result<HmtreeConfig, ApiError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HMTREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
