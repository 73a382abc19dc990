use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};

use logging::{init_logger, redact_sensitive_data};
use snapfind_catalog::{find_product, load_catalog};
use snapfind_config::{
    config_dir, config_file_path, load_and_prepare, validate, ProviderConfig, SnapfindConfig,
    DEFAULT_CATALOG_PATH, DEFAULT_HOST, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
};
use snapfind_gateway::{start_server, GatewayState};
use snapfind_understanding::{LabelProvider, TextProvider};

#[derive(Parser)]
#[command(name = "snapfind")]
#[command(about = "snapfind — snap a product photo, get a listing match")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to the snapfind config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the identification gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the health of a running instance
    Status,
    /// Match a filename or free-text query against the catalog
    Match {
        /// Query to match, e.g. "iphone-11-pro.jpg"
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Serve { port } => serve(&config_path, port).await,
        Commands::Status => status(&config_path).await,
        Commands::Match { query } => match_query(&config_path, &query).await,
    }
}

async fn serve(config_path: &Path, port_override: Option<u16>) -> Result<()> {
    let config = load_and_prepare(config_path).await?;

    let logging_cfg = config.logging.clone().unwrap_or_default();
    init_logger(
        logging_cfg.dir.as_deref().unwrap_or(DEFAULT_LOG_DIR),
        logging_cfg.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL),
    );

    // Surface config problems now that a subscriber exists.
    let report = validate(&config);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for err in &report.errors {
        error!(path = %err.path, message = %err.message, "Config error");
    }

    if let Ok(echo) = serde_json::to_string(&config) {
        debug!(config = %redact_sensitive_data(&echo), "Effective config");
    }

    let catalog_path = catalog_path(&config);
    let catalog = load_catalog(Path::new(&catalog_path)).await;
    if catalog.is_empty() {
        warn!("Catalog is empty; every identification will go to the vision provider");
    }

    let labels = config.vision.as_ref().and_then(label_provider);
    match &labels {
        Some(p) => info!(provider = p.name(), "Registered label provider"),
        None => warn!("No label provider configured; unmatched uploads will not be identified"),
    }

    let generation = config.generation.as_ref().and_then(text_provider);
    if let Some(p) = &generation {
        info!(provider = p.name(), "Registered generation provider");
    }

    let gateway_cfg = config.gateway.clone().unwrap_or_default();
    let host = gateway_cfg.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = port_override.or(gateway_cfg.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let state = GatewayState::new(catalog, labels, generation);
    start_server(addr, state).await
}

async fn status(config_path: &Path) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    let port = config
        .gateway
        .as_ref()
        .and_then(|g| g.port)
        .unwrap_or(DEFAULT_PORT);

    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("snapfind is not running on port {port}");
        }
    }

    Ok(())
}

async fn match_query(config_path: &Path, query: &str) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    let catalog_path = catalog_path(&config);
    let catalog = load_catalog(Path::new(&catalog_path)).await;
    if catalog.is_empty() {
        println!("Catalog at {catalog_path} is empty or unreadable");
        return Ok(());
    }

    match find_product(query, &catalog) {
        Some(product) => println!("{}", serde_json::to_string_pretty(product)?),
        None => println!("no match"),
    }

    Ok(())
}

fn catalog_path(config: &SnapfindConfig) -> String {
    config
        .catalog
        .as_ref()
        .and_then(|c| c.path.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
}

fn label_provider(cfg: &ProviderConfig) -> Option<LabelProvider> {
    let api_key = cfg.api_key.clone().filter(|k| !k.is_empty())?;
    match cfg.provider.as_deref().unwrap_or("gemini") {
        "openai" => Some(match &cfg.model {
            Some(model) => LabelProvider::OpenAi {
                api_key,
                model: model.clone(),
            },
            None => LabelProvider::openai(api_key),
        }),
        "gemini" => Some(LabelProvider::gemini(api_key)),
        other => {
            warn!(provider = other, "Unknown vision provider; label detection disabled");
            None
        }
    }
}

fn text_provider(cfg: &ProviderConfig) -> Option<TextProvider> {
    let api_key = cfg.api_key.clone().filter(|k| !k.is_empty())?;
    match cfg.provider.as_deref().unwrap_or("gemini") {
        "openai" => Some(match &cfg.model {
            Some(model) => TextProvider::OpenAi {
                api_key,
                model: model.clone(),
            },
            None => TextProvider::openai(api_key),
        }),
        "gemini" => Some(TextProvider::gemini(api_key)),
        other => {
            warn!(provider = other, "Unknown generation provider; descriptions disabled");
            None
        }
    }
}
