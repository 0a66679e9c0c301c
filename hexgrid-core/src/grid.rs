//! Tile storage and placement rules
//!
//! Out-of-bounds coordinates are never an error: reads return `None` and
//! writes are silently ignored, so pointer input that lands off the grid
//! needs no special handling upstream.

use crate::coord::{Hex, Pixel};
use crate::layout::HexLayout;
use crate::tile::TileType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Construction-time contract violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be between 1 and 2147483647, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("hex radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),

    #[error("drag threshold must be a non-negative finite number, got {0}")]
    InvalidDragThreshold(f32),
}

/// A tile whose type changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChange {
    pub hex: Hex,
    pub from: TileType,
    pub to: TileType,
}

/// Fixed-size hex grid
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    layout: HexLayout,

    /// Column-major: index = q * height + r
    tiles: Vec<TileType>,

    /// Changes not yet taken by a presentation adapter; `None` unless
    /// a consumer opted in with `with_change_log`
    changes: Option<Vec<TileChange>>,
}

/// Largest width or height; coordinates are `i32`
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Reject sizes that cannot be addressed with `Hex` coordinates
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    let valid = |d: u32| (1..=MAX_DIMENSION).contains(&d);
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GridError::InvalidDimensions { width, height })
    }
}

impl Grid {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create an all-empty grid
    pub fn new(width: u32, height: u32, layout: HexLayout) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        if !layout.radius.is_finite() || layout.radius <= 0.0 {
            return Err(GridError::InvalidRadius(layout.radius));
        }

        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            layout,
            tiles: vec![TileType::Empty; size],
            changes: None,
        })
    }

    /// Record a `TileChange` for every mutation until taken
    pub fn with_change_log(mut self) -> Self {
        self.changes.get_or_insert_with(Vec::new);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    // ========================================================================
    // TILE ACCESS
    // ========================================================================

    pub fn contains(&self, hex: Hex) -> bool {
        self.index(hex).is_some()
    }

    /// Current type of a tile, `None` when off the grid
    pub fn get(&self, hex: impl Into<Hex>) -> Option<TileType> {
        self.index(hex.into()).map(|i| self.tiles[i])
    }

    /// Set a tile's type, keeping at most one exit on the grid
    pub fn set(&mut self, hex: impl Into<Hex>, tile: TileType) {
        let hex = hex.into();
        let Some(index) = self.index(hex) else {
            debug!(?hex, ?tile, "set ignored: off grid");
            return;
        };

        if tile == TileType::Exit {
            self.clear_exit();
        }

        if self.tiles[index] == TileType::Exit && tile != TileType::Exit {
            self.write(index, TileType::Empty);
        }

        self.write(index, tile);
    }

    /// Exchange two tiles' types. Exits never move.
    pub fn swap(&mut self, a: impl Into<Hex>, b: impl Into<Hex>) {
        let (a, b) = (a.into(), b.into());
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            debug!(?a, ?b, "swap ignored: off grid");
            return;
        };

        let (ta, tb) = (self.tiles[ia], self.tiles[ib]);
        if ta == TileType::Exit || tb == TileType::Exit {
            debug!(?a, ?b, "swap ignored: exit cannot move");
            return;
        }

        self.write(ia, tb);
        self.write(ib, ta);
    }

    /// Reset every tile to empty
    pub fn clear(&mut self) {
        for index in 0..self.tiles.len() {
            self.write(index, TileType::Empty);
        }
    }

    /// Position of the exit, if one is placed
    pub fn exit(&self) -> Option<Hex> {
        self.iter()
            .find(|&(_, tile)| tile == TileType::Exit)
            .map(|(hex, _)| hex)
    }

    /// All tiles, column by column
    pub fn iter(&self) -> impl Iterator<Item = (Hex, TileType)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| (self.hex_at(i), tile))
    }

    /// Drain the changes recorded since the last call, oldest first.
    /// Always empty without a change log.
    pub fn take_changes(&mut self) -> Vec<TileChange> {
        self.changes.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Number of changes waiting to be taken
    pub fn pending_changes(&self) -> usize {
        self.changes.as_ref().map_or(0, Vec::len)
    }

    // ========================================================================
    // COORDINATE CONVERSION
    // ========================================================================

    /// Centre of a tile in screen space
    pub fn axial_to_screen(&self, hex: impl Into<Hex>) -> Pixel {
        self.layout.hex_to_pixel(hex.into())
    }

    /// Nearest tile to a screen position; may be off the grid
    pub fn screen_to_axial(&self, pixel: impl Into<Pixel>) -> Hex {
        self.layout.pixel_to_hex(pixel.into())
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn index(&self, hex: Hex) -> Option<usize> {
        let in_bounds = (0..self.width as i32).contains(&hex.q)
            && (0..self.height as i32).contains(&hex.r);
        in_bounds.then(|| hex.q as usize * self.height as usize + hex.r as usize)
    }

    fn hex_at(&self, index: usize) -> Hex {
        let height = self.height as usize;
        Hex::new((index / height) as i32, (index % height) as i32)
    }

    fn clear_exit(&mut self) {
        for index in 0..self.tiles.len() {
            if self.tiles[index] == TileType::Exit {
                self.write(index, TileType::Empty);
            }
        }
    }

    fn write(&mut self, index: usize, tile: TileType) {
        let from = self.tiles[index];
        if from == tile {
            return;
        }
        self.tiles[index] = tile;
        let hex = self.hex_at(index);
        if let Some(log) = self.changes.as_mut() {
            log.push(TileChange { hex, from, to: tile });
        }
    }
}
