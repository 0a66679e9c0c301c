//! HEXGRID Core - Hex tile grid and input rules
//!
//! This crate provides the UI-agnostic logic shared by every front end:
//! - Offset-row hex coordinates and the pixel layout (pointy-top, odd-r)
//! - Tile types and their selection keys
//! - Grid storage with the single-exit and immovable-exit rules
//! - Click-vs-drag classification of pointer input
//!
//! Front ends forward raw events to an [`InputClassifier`] and read the
//! [`Grid`] back (or drain its [`TileChange`]s) to render.

pub mod coord;
pub mod layout;
pub mod tile;
pub mod grid;
pub mod input;
pub mod config;

// Re-exports for convenient access
pub use coord::{Hex, Pixel};
pub use layout::HexLayout;
pub use tile::{TileType, TILE_TYPES, ParseTileTypeError};
pub use grid::{Grid, GridError, TileChange, MAX_DIMENSION};
pub use input::{InputClassifier, InputEvent, Gesture, DRAG_THRESHOLD};
pub use config::GridConfig;
