//! Grid options shared by every command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexgrid_core::GridConfig;

#[derive(Args, Clone, Debug, Default)]
pub struct GridArgs {
    /// Grid configuration JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<u32>,

    /// Hex radius (centre to corner) in pixels
    #[arg(long)]
    pub radius: Option<f32>,

    /// Minimum pointer travel that counts as a drag
    #[arg(long)]
    pub drag_threshold: Option<f32>,
}

impl GridArgs {
    /// File values (or defaults), then flag overrides, then validation
    pub fn resolve(&self) -> Result<GridConfig> {
        let mut config = match &self.config {
            Some(path) => GridConfig::load(path)
                .with_context(|| format!("Failed to load grid config: {}", path.display()))?,
            None => GridConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(radius) = self.radius {
            config.hex_radius = radius;
        }
        if let Some(threshold) = self.drag_threshold {
            config.drag_threshold = threshold;
        }

        config.validate().context("Invalid grid configuration")?;
        Ok(config)
    }
}
