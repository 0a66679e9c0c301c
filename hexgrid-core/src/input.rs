//! Click-vs-drag input classification
//!
//! A pointer-down / pointer-up pair becomes either a click (paint the
//! selected tile type at the press position) or a drag (swap the tiles
//! under the press and release positions), depending on how far the
//! pointer travelled.

use crate::coord::{Hex, Pixel};
use crate::grid::{Grid, GridError};
use crate::tile::TileType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum pointer travel for a drag, in pixels
pub const DRAG_THRESHOLD: f32 = 10.0;

/// Raw input forwarded by a front end
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Key { key: char },
    Select { tile: TileType },
}

/// How a completed press was interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    Click { hex: Hex },
    Drag { from: Hex, to: Hex },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging { start_hex: Hex, start_pixel: Pixel },
}

/// Turns pointer and key events into grid edits
#[derive(Clone, Debug)]
pub struct InputClassifier {
    selected: TileType,
    drag_threshold: f32,
    state: DragState,
}

impl Default for InputClassifier {
    fn default() -> Self {
        Self {
            selected: TileType::Player,
            drag_threshold: DRAG_THRESHOLD,
            state: DragState::Idle,
        }
    }
}

impl InputClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag_threshold(drag_threshold: f32) -> Result<Self, GridError> {
        if !drag_threshold.is_finite() || drag_threshold < 0.0 {
            return Err(GridError::InvalidDragThreshold(drag_threshold));
        }
        Ok(Self {
            drag_threshold,
            ..Self::default()
        })
    }

    pub fn selected(&self) -> TileType {
        self.selected
    }

    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Whether a press is waiting for its release
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Dispatch one raw event. Returns the gesture if the event completed one.
    pub fn handle(&mut self, grid: &mut Grid, event: InputEvent) -> Option<Gesture> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(grid, Pixel::new(x, y));
                None
            }
            InputEvent::PointerUp { x, y } => self.pointer_up(grid, Pixel::new(x, y)),
            InputEvent::Key { key } => {
                self.key_press(key);
                None
            }
            InputEvent::Select { tile } => {
                self.select(tile);
                None
            }
        }
    }

    /// Change the type future clicks will paint. Does not touch a drag in progress.
    pub fn select(&mut self, tile: TileType) {
        self.selected = tile;
    }

    /// Select by key; unbound keys are ignored
    pub fn key_press(&mut self, key: char) {
        match TileType::from_key(key) {
            Some(tile) => self.select(tile),
            None => debug!(?key, "unbound key"),
        }
    }

    /// Start tracking a press. A second press restarts the drag.
    pub fn pointer_down(&mut self, grid: &Grid, pixel: Pixel) {
        let start_hex = grid.screen_to_axial(pixel);
        self.state = DragState::Dragging {
            start_hex,
            start_pixel: pixel,
        };
    }

    /// Resolve the press as a click or a drag and apply it to the grid
    pub fn pointer_up(&mut self, grid: &mut Grid, pixel: Pixel) -> Option<Gesture> {
        let DragState::Dragging {
            start_hex,
            start_pixel,
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            debug!(?pixel, "pointer up without pointer down");
            return None;
        };

        let end_hex = grid.screen_to_axial(pixel);
        let distance = start_pixel.distance_to(pixel);

        if distance < self.drag_threshold {
            self.paint(grid, start_hex);
            debug!(hex = ?start_hex, selected = %self.selected, "click");
            return Some(Gesture::Click { hex: start_hex });
        }

        if end_hex != start_hex {
            grid.swap(start_hex, end_hex);
        }
        debug!(from = ?start_hex, to = ?end_hex, distance, "drag");
        Some(Gesture::Drag {
            from: start_hex,
            to: end_hex,
        })
    }

    /// Toggle the selected type on a tile
    fn paint(&self, grid: &mut Grid, hex: Hex) {
        let Some(current) = grid.get(hex) else {
            return;
        };

        let next = if current == self.selected {
            TileType::Empty
        } else {
            self.selected
        };
        grid.set(hex, next);
    }
}
