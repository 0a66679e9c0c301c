//! Status endpoint

use crate::state::ServerState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// Liveness plus the shape of grids new sessions will get
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let sessions = state.sessions.read().unwrap().len();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions,
        grid_width: state.config.width,
        grid_height: state.config.height,
    })
}
