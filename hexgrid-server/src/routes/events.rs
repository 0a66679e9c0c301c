//! Input event endpoint
//!
//! A browser client posts pointer and key events as they happen; the
//! response carries what changed so it can patch its view without
//! fetching a full snapshot.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use hexgrid_core::{Gesture, InputEvent, TileChange, TileType};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct EventResponse {
    pub success: bool,
    pub gesture: Option<Gesture>,
    pub selected: TileType,
    pub changes: Vec<TileChange>,
}

/// Apply one input event to a session
pub async fn post_event(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(event): Json<InputEvent>,
) -> Result<Json<EventResponse>, ApiError> {
    let mut sessions = state.sessions.write().unwrap();
    let session = sessions
        .get_mut(&id)
        .ok_or(ApiError::SessionNotFound(id))?;

    let gesture = session.input.handle(&mut session.grid, event);
    let changes = session.grid.take_changes();

    Ok(Json(EventResponse {
        success: true,
        gesture,
        selected: session.input.selected(),
        changes,
    }))
}
