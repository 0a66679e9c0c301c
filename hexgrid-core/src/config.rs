//! GridConfig - construction parameters for a grid session

use crate::coord::Pixel;
use crate::grid::{check_dimensions, Grid, GridError};
use crate::input::{InputClassifier, DRAG_THRESHOLD};
use crate::layout::HexLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid size, hex size and input tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Centre-to-corner distance in pixels
    pub hex_radius: f32,
    /// Minimum pointer travel for a drag
    pub drag_threshold: f32,
    /// Pixel position of tile (0, 0); ignored when `centered` is set
    pub origin: Pixel,
    /// Put the middle of the grid at (0, 0) instead of using `origin`
    pub centered: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 10,
            hex_radius: 40.0,
            drag_threshold: DRAG_THRESHOLD,
            origin: Pixel::ORIGIN,
            centered: false,
        }
    }
}

impl GridConfig {
    /// Check every parameter before anything is allocated
    pub fn validate(&self) -> Result<(), GridError> {
        check_dimensions(self.width, self.height)?;
        if !self.hex_radius.is_finite() || self.hex_radius <= 0.0 {
            return Err(GridError::InvalidRadius(self.hex_radius));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(GridError::InvalidDragThreshold(self.drag_threshold));
        }
        Ok(())
    }

    pub fn layout(&self) -> HexLayout {
        if self.centered {
            HexLayout::centered(self.hex_radius, self.width, self.height)
        } else {
            HexLayout::new(self.hex_radius).with_origin(self.origin)
        }
    }

    /// Build an empty grid and a fresh classifier
    pub fn build(&self) -> Result<(Grid, InputClassifier), GridError> {
        self.validate()?;
        let grid = Grid::new(self.width, self.height, self.layout())?;
        let input = InputClassifier::with_drag_threshold(self.drag_threshold)?;
        Ok((grid, input))
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GridConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
