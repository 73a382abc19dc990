//! Config validation: schema checks with user-friendly error messages.

use crate::schema::{ProviderConfig, SnapfindConfig};
use thiserror::Error;

/// Provider names the understanding layer knows how to build.
const KNOWN_PROVIDERS: &[&str] = &["openai", "gemini"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SnapfindConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_gateway(config, &mut report);
    validate_catalog(config, &mut report);
    validate_provider(config.vision.as_ref(), "vision", &mut report);
    validate_provider(config.generation.as_ref(), "generation", &mut report);
    report
}

fn validate_gateway(config: &SnapfindConfig, report: &mut ValidationReport) {
    let Some(gw) = &config.gateway else { return };
    if let Some(port) = gw.port {
        if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "gateway.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(host) = &gw.host {
        if host.trim().is_empty() {
            report.error("gateway.host", "Host cannot be empty");
        }
    }
}

fn validate_catalog(config: &SnapfindConfig, report: &mut ValidationReport) {
    let Some(catalog) = &config.catalog else { return };
    if let Some(path) = &catalog.path {
        if path.trim().is_empty() {
            report.error("catalog.path", "Catalog path cannot be empty");
        }
    }
}

fn validate_provider(provider: Option<&ProviderConfig>, section: &str, report: &mut ValidationReport) {
    let Some(provider) = provider else { return };

    if let Some(name) = &provider.provider {
        if !KNOWN_PROVIDERS.contains(&name.as_str()) {
            report.error(
                format!("{section}.provider"),
                format!("Unknown provider '{name}'. Use 'openai' or 'gemini'"),
            );
        }
    }

    if provider.api_key.as_deref().map(str::is_empty).unwrap_or(true) {
        report.warn(
            format!("{section}.apiKey"),
            "No API key set; this provider will be disabled",
        );
    }

    if let Some(model) = &provider.model {
        if model.trim().is_empty() {
            report.error(format!("{section}.model"), "Model cannot be empty when set");
        }
    }
}
