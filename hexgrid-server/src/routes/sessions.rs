//! Session lifecycle and snapshot endpoints

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hexgrid_core::{Grid, Hex, InputClassifier, Pixel, TileType};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// One tile as a renderer needs it
#[derive(Serialize)]
pub struct TileView {
    pub q: i32,
    pub r: i32,
    pub tile: TileType,
    pub center: Pixel,
    pub corners: [Pixel; 6],
}

/// Full session state
#[derive(Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub hex_radius: f32,
    pub selected: TileType,
    pub dragging: bool,
    pub exit: Option<Hex>,
    pub tiles: Vec<TileView>,
}

impl SessionSnapshot {
    fn new(id: String, grid: &Grid, input: &InputClassifier) -> Self {
        let layout = grid.layout();
        let tiles = grid
            .iter()
            .map(|(hex, tile)| {
                let center = layout.hex_to_pixel(hex);
                TileView {
                    q: hex.q,
                    r: hex.r,
                    tile,
                    center,
                    corners: layout.corners(center),
                }
            })
            .collect();

        Self {
            id,
            width: grid.width(),
            height: grid.height(),
            hex_radius: layout.radius,
            selected: input.selected(),
            dragging: input.is_dragging(),
            exit: grid.exit(),
            tiles,
        }
    }
}

/// List session ids
pub async fn list_sessions(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let sessions = state.sessions.read().unwrap();
    let mut ids: Vec<&String> = sessions.keys().collect();
    ids.sort();
    Json(json!({ "sessions": ids }))
}

/// Create a session with an empty grid
pub async fn create_session(
    State(state): State<Arc<ServerState>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = state.create_session()?;
    tracing::info!("Created session {}", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": id,
        })),
    ))
}

/// Get a session snapshot
pub async fn get_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let sessions = state.sessions.read().unwrap();
    let session = sessions
        .get(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;

    Ok(Json(SessionSnapshot::new(id, &session.grid, &session.input)))
}

/// Drop a session
pub async fn delete_session(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.sessions.write().unwrap().remove(&id);
    if removed.is_none() {
        return Err(ApiError::SessionNotFound(id));
    }
    tracing::info!("Deleted session {}", id);

    Ok(Json(json!({ "success": true })))
}
