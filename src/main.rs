//! geo-redirect - country detection and safe redirects at the edge
//!
//! This is the composition root that wires together all the components.

use geo_redirect::adapters::inbound::HttpServer;
use geo_redirect::adapters::outbound::{
    FileConfigProvider, HttpConfigProvider, StaticConfigProvider,
};
use geo_redirect::infrastructure::init_logging;
use geo_redirect::{load_config, AppConfig, ConfigProvider, GeoService, RedirectConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (no-op outside production unless enabled)
    init_logging(&cfg);

    tracing::info!(
        "starting geo-redirect env={} listen={}",
        cfg.environment,
        cfg.listen_addr
    );

    // ===== COMPOSITION ROOT =====

    // 1. Redirect config source
    let provider = config_provider(&cfg);

    // 2. Application service
    let service = Arc::new(
        GeoService::from_provider(provider.as_ref(), cfg.environment, cfg.diagnostics()).await,
    );

    // 3. Inbound adapter
    let server = HttpServer::new(cfg.listen_addr.clone(), service);

    server.run().await
}

/// Pick the redirect config source: URL, then file, then built-in defaults.
fn config_provider(cfg: &AppConfig) -> Box<dyn ConfigProvider> {
    if let Some(url) = &cfg.config_url {
        match HttpConfigProvider::new(url.clone(), cfg.config_timeout()) {
            Ok(p) => return Box::new(p),
            Err(e) => tracing::error!("failed to build HTTP config client: {}", e),
        }
    }

    match &cfg.config_path {
        Some(path) => Box::new(FileConfigProvider::new(path)),
        None => {
            tracing::info!("no redirect config source configured, using defaults");
            Box::new(StaticConfigProvider::new(RedirectConfig::default()))
        }
    }
}
