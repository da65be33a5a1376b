use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::load_config;
use crate::interfaces::http::start_server;

/// Load configuration, install logging and serve the HTTP API until shutdown
pub async fn run() -> std::io::Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let config = load_config()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting harmonizer");

    start_server(&config)?.await
}
