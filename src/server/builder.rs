//! Server startup with automatic configuration loading

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the server with automatic configuration loading
///
/// Loads `config/gateway.yaml` when present, otherwise falls back to
/// environment variables and built-in defaults.
pub async fn run_server() -> Result<()> {
    info!("Starting mintgate");

    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            info!("Configuration file not usable ({}), using environment", e);
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!("Server starting at: http://{}", config.server().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/mint - Batch mint run (NDJSON stream)");

    server.start().await
}
