//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{CatalogConfig, GatewayConfig, LoggingConfig, SnapfindConfig};

/// Default HTTP bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default catalog file path, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.json";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: SnapfindConfig) -> SnapfindConfig {
    let config = apply_gateway_defaults(config);
    let config = apply_catalog_defaults(config);
    let config = apply_logging_defaults(config);
    config
}

fn apply_gateway_defaults(mut config: SnapfindConfig) -> SnapfindConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    if gateway.host.is_none() {
        gateway.host = Some(DEFAULT_HOST.to_string());
    }
    if gateway.port.is_none() {
        gateway.port = Some(DEFAULT_PORT);
    }
    config
}

fn apply_catalog_defaults(mut config: SnapfindConfig) -> SnapfindConfig {
    let catalog = config.catalog.get_or_insert_with(CatalogConfig::default);
    if catalog.path.is_none() {
        catalog.path = Some(DEFAULT_CATALOG_PATH.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: SnapfindConfig) -> SnapfindConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.dir.is_none() {
        logging.dir = Some(DEFAULT_LOG_DIR.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_gateway_defaults() {
        let cfg = apply_all_defaults(SnapfindConfig::default());
        let gateway = cfg.gateway.unwrap();
        assert_eq!(gateway.host.as_deref(), Some(DEFAULT_HOST));
        assert_eq!(gateway.port, Some(DEFAULT_PORT));
    }

    #[test]
    fn applies_catalog_path_default() {
        let cfg = apply_all_defaults(SnapfindConfig::default());
        assert_eq!(
            cfg.catalog.unwrap().path.as_deref(),
            Some(DEFAULT_CATALOG_PATH)
        );
    }

    #[test]
    fn does_not_override_user_set_port() {
        let mut cfg = SnapfindConfig::default();
        cfg.gateway = Some(GatewayConfig {
            port: Some(3000),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.gateway.unwrap().port, Some(3000));
    }
}
