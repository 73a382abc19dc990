//! `snapfind-config` — snapfind runtime configuration management.
//!
//! Provides:
//! - Typed config schema (gateway, catalog, vision, generation, logging)
//! - YAML loading with missing-file fallback to defaults
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Schema validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::{
    apply_all_defaults, DEFAULT_CATALOG_PATH, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL,
    DEFAULT_PORT,
};
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use schema::{
    CatalogConfig, GatewayConfig, LoggingConfig, ProviderConfig, SnapfindConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a config file, substitute env vars, and apply defaults.
///
/// This is the main entry point for loading a config at runtime. Callers
/// that want validation diagnostics run [`validate`] on the result once
/// their logging is up.
pub async fn load_and_prepare(path: &Path) -> Result<SnapfindConfig> {
    let raw_config = load_config(path).await?;

    // Serialize to Value for the env substitution pass.
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: SnapfindConfig = serde_json::from_value(value)
        .context("Failed to deserialize config after processing")?;

    Ok(apply_all_defaults(config))
}
