//! Cell extrusion: one colored solid and one outline per cell.

use rand::Rng;

use crate::{
    config::TerrainConfig,
    data_structures::{
        color::Color,
        map::Cell,
        mesh::{Layers, Material, Mesh, MeshSource, Topology},
        terrain::Bounds,
    },
    error::DataError,
    geometry::primitives::{extrude_polygon, line_loop},
};

pub struct TerrainMeshes {
    pub meshes: Vec<Mesh>,
    pub bounds: Bounds,
}

pub struct TerrainMeshBuilder<'a> {
    config: &'a TerrainConfig,
}

impl<'a> TerrainMeshBuilder<'a> {
    pub fn new(config: &'a TerrainConfig) -> Self {
        Self { config }
    }

    /// Builds solids and outlines for every cell, in input order, and the bounding box
    /// over every ring vertex.
    pub fn build<R: Rng + ?Sized>(&self, cells: &[Cell], rng: &mut R) -> Result<TerrainMeshes, DataError> {
        let mut meshes = Vec::with_capacity(cells.len() * 2);
        let mut bounds = Bounds::empty();

        for (idx, cell) in cells.iter().enumerate() {
            let ring = cell.open_ring();
            if ring.len() < 3 {
                return Err(DataError::DegenerateRing {
                    cell: cell.id,
                    points: ring.len(),
                });
            }
            ring.iter().for_each(|p| bounds.extend(*p));

            let depth = self.config.scene_depth(cell.height);
            let geometry = extrude_polygon(ring, depth)
                .ok_or(DataError::UntriangulableRing { cell: cell.id })?;
            let color = self.cell_color(cell.height, rng);
            let mut solid = Mesh::new(
                geometry,
                Topology::Triangles,
                Material::phong(color, self.config.shininess),
                MeshSource::Cell(idx),
            );
            if self.config.pick_cells {
                solid.layers.enable(Layers::PICK);
            }
            meshes.push(solid);

            meshes.push(Mesh::new(
                line_loop(ring, depth + self.config.outline_offset),
                Topology::LineLoop,
                Material::basic(self.config.outline_color).transparent(self.config.outline_opacity),
                MeshSource::CellOutline(idx),
            ));
        }

        if cells.is_empty() {
            bounds = Bounds {
                min_x: 0.0,
                max_x: 0.0,
                min_y: 0.0,
                max_y: 0.0,
            };
        }

        Ok(TerrainMeshes { meshes, bounds })
    }

    /**
     * Land blends valley→hill up to half the max height and hill→peak above it, both
     * interpolated by the raw height percentage. Water uses a fixed color. Either way the
     * result gets per-channel jitter and is clamped to `[0, 1]`.
     */
    pub fn cell_color<R: Rng + ?Sized>(&self, height: f32, rng: &mut R) -> Color {
        let config = self.config;
        if height > 0.0 {
            let percent = height / config.max_height;
            let (bottom, top) = if percent <= 0.5 {
                (config.valley_color, config.hill_color)
            } else {
                (config.hill_color, config.peak_color)
            };
            bottom.lerp(&top, percent).jitter(config.land_jitter, rng)
        } else {
            config.water_color.jitter(config.water_jitter, rng)
        }
    }
}
