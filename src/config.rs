//! Per-dataset configuration.
//!
//! Every constant the builders depend on lives in [`TerrainConfig`] so that differently
//! scaled datasets can be processed without recompiling. `Default` matches the
//! reference dataset (max height 6724, sea level 1).

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{data_structures::color::Color, error::DataError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Highest cell height of the dataset, used to normalize colors.
    pub max_height: f32,
    /// Extrusion depth of every cell at or below height zero.
    pub sea_level: f32,
    /// Height units per scene unit above sea level. Usually `max_height / 2`.
    pub height_scale: f32,

    pub valley_color: Color,
    pub hill_color: Color,
    pub peak_color: Color,
    pub water_color: Color,
    pub land_jitter: f32,
    pub water_jitter: f32,
    pub shininess: f32,

    pub outline_color: Color,
    pub outline_opacity: f32,
    /// Lift of the outline above the top face to avoid z-fighting.
    pub outline_offset: f32,

    /// Uniform scale applied to the whole scene.
    pub scale: f32,

    pub river_start_width: f32,
    /// Lift of the ribbon above the terrain it follows.
    pub river_elevation_offset: f32,
    pub river_color: Color,

    pub marker_clearance: f32,
    pub stem_thickness: f32,
    pub stem_color: Color,

    pub highlight_color: Color,
    /// Put cell solids on the pick layer in addition to marker props.
    pub pick_cells: bool,
    pub marker_spin_rps: f32,

    /// Seed for the color jitter. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::for_dataset(6724.0, 1.0)
    }
}

impl TerrainConfig {
    /// Configuration for a dataset with the given height range. The height scale is
    /// derived as `max_height / 2`.
    pub fn for_dataset(max_height: f32, sea_level: f32) -> Self {
        Self {
            max_height,
            sea_level,
            height_scale: max_height / 2.0,
            valley_color: Color::from_hex(0x69BDA9),
            hill_color: Color::from_hex(0xFBF8B0),
            peak_color: Color::from_hex(0xA71147),
            water_color: Color::from_hex(0x6B8BBB),
            land_jitter: 0.03,
            water_jitter: 0.04,
            shininess: 15.0,
            outline_color: Color::WHITE,
            outline_opacity: 0.2,
            outline_offset: 0.02,
            scale: 2.0,
            river_start_width: 0.1,
            river_elevation_offset: 0.1,
            river_color: Color::from_hex(0x6B8BBB),
            marker_clearance: 0.05,
            stem_thickness: 0.01,
            stem_color: Color::BLACK,
            highlight_color: Color::from_hex(0xFF0000),
            pick_cells: false,
            marker_spin_rps: 0.5,
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: TerrainConfig =
            serde_json::from_str(json).context("Failed to parse terrain config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read terrain config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let positive = [
            ("max_height", self.max_height),
            ("height_scale", self.height_scale),
            ("scale", self.scale),
            ("river_start_width", self.river_start_width),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(DataError::InvalidConfig {
                    reason: format!("{name} must be a positive finite number, got {value}"),
                });
            }
        }
        if self.land_jitter < 0.0 || self.water_jitter < 0.0 {
            return Err(DataError::InvalidConfig {
                reason: "jitter bounds must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Scene depth of a cell: `sea_level + max(0, height) / height_scale`.
    pub fn scene_depth(&self, height: f32) -> f32 {
        self.sea_level + height.max(0.0) / self.height_scale
    }
}
