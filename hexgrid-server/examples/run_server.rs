//! Example to run the HEXGRID server standalone
//!
//! Run with: cargo run -p hexgrid-server --example run_server

use hexgrid_core::GridConfig;
use hexgrid_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig {
        port: 8003,
        static_dir: None,
        grid: GridConfig {
            origin: hexgrid_core::Pixel::new(100.0, 100.0),
            ..GridConfig::default()
        },
        ..ServerConfig::default()
    };

    println!("Starting HEXGRID server on port {}", config.port);
    println!("Create a session: curl -X POST http://localhost:{}/api/sessions", config.port);

    run_server(config).await
}
