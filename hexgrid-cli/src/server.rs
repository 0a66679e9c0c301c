//! Server command - start the HTTP front end
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to hexgrid-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use hexgrid_server::{run_server, ServerConfig, MAX_SESSIONS};

use crate::grid_args::GridArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory of static files for a browser client
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Put the middle of each grid at pixel (0, 0)
    #[arg(long)]
    pub centered: bool,

    /// Open sessions allowed at once
    #[arg(long, default_value_t = MAX_SESSIONS)]
    pub max_sessions: usize,

    #[command(flatten)]
    pub grid: GridArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting HEXGRID server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    if let Some(dir) = &args.static_dir {
        validate_static_dir(dir)?;
    }

    let mut grid = args.grid.resolve()?;
    grid.centered |= args.centered;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args
            .static_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string()),
        grid,
        max_sessions: args.max_sessions,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 4 - VALIDATION
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServerArgs {
        ServerArgs {
            port: 8003,
            static_dir: None,
            centered: false,
            max_sessions: MAX_SESSIONS,
            grid: GridArgs::default(),
        }
    }

    #[test]
    fn test_configure_server_defaults() {
        let config = configure_server(&args()).unwrap();
        assert_eq!(config.port, 8003);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.grid.width, 16);
        assert!(!config.grid.centered);
        assert_eq!(config.max_sessions, MAX_SESSIONS);
    }

    #[test]
    fn test_configure_server_overrides() {
        let mut args = args();
        args.static_dir = Some(PathBuf::from("test_static"));
        args.centered = true;
        args.grid.height = Some(3);
        args.max_sessions = 8;

        let config = configure_server(&args).unwrap();
        assert_eq!(config.static_dir.as_deref(), Some("test_static"));
        assert!(config.grid.centered);
        assert_eq!(config.grid.height, 3);
        assert_eq!(config.max_sessions, 8);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let mut args = args();
        args.grid.radius = Some(-4.0);
        assert!(configure_server(&args).is_err());
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }
}
