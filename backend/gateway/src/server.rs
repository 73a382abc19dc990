//! Main HTTP Gateway Server.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

use snapfind_core::Product;
use snapfind_understanding::{LabelProvider, TextProvider};

use crate::{health_api, identify_api};

/// Uploads beyond this size are rejected by the multipart extractor.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    /// Read-only product catalog, loaded once at startup.
    pub catalog: Arc<Vec<Product>>,
    /// Label detection; `None` disables the cloud fallback.
    pub labels: Option<Arc<LabelProvider>>,
    /// Description generation; `None` falls back to joined labels.
    pub generation: Option<Arc<TextProvider>>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(
        catalog: Vec<Product>,
        labels: Option<LabelProvider>,
        generation: Option<TextProvider>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            labels: labels.map(Arc::new),
            generation: generation.map(Arc::new),
            started_at: Instant::now(),
        }
    }
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/identify", post(identify_api::identify))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the main Axum HTTP server for the gateway.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
