//! HEXGRID Server - HTTP front end for grid sessions
//!
//! This crate exposes the core over a small JSON API:
//! - Session lifecycle (each session owns its own grid and input state)
//! - Raw input events in, gesture and tile changes out
//! - Full snapshots (centres and corners included) for renderers
//! - Optional static file serving for a browser client

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use hexgrid_core::GridConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::{ServerState, Session, MAX_SESSIONS};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served for unmatched paths, if any
    pub static_dir: Option<String>,
    /// Parameters for every new session
    pub grid: GridConfig,
    /// Open sessions allowed at once; creation answers 503 beyond this
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: None,
            grid: GridConfig::default(),
            max_sessions: MAX_SESSIONS,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let router = Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Sessions API
        .route(
            "/api/sessions",
            get(routes::sessions::list_sessions).post(routes::sessions::create_session),
        )
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        // Input API
        .route(
            "/api/sessions/:id/events",
            post(routes::events::post_event),
        )
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Static file serving (must be last)
    match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = ServerState::new(config.grid.clone())?.with_max_sessions(config.max_sessions);
    let state = Arc::new(state);
    let router = create_router(&config, state);

    tracing::info!("HEXGRID server starting on http://0.0.0.0:{}", config.port);
    tracing::info!(
        "New sessions get a {}x{} grid, radius {}",
        config.grid.width,
        config.grid.height,
        config.grid.hex_radius
    );
    tracing::info!("At most {} open sessions", config.max_sessions);
    if let Some(dir) = &config.static_dir {
        tracing::info!("Static files served from: {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
