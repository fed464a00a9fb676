//! River ribbons: a continuous, widening strip through the centroids of a river's cells.

use cgmath::{InnerSpace, Vector2, Vector3};
use log::warn;

use crate::{
    config::TerrainConfig,
    data_structures::{
        map::{Cell, MapData},
        mesh::{Geometry, Material, Mesh, MeshSource, Topology},
    },
    error::{DataError, GeometryError},
};

pub struct RiverMeshes {
    pub meshes: Vec<Mesh>,
    pub warnings: Vec<GeometryError>,
}

/// One ribbon. `skipped` lists the pair indices that had coincident centroids.
pub struct Ribbon {
    pub geometry: Geometry,
    pub skipped: Vec<usize>,
}

pub struct RiverMeshBuilder<'a> {
    config: &'a TerrainConfig,
}

impl<'a> RiverMeshBuilder<'a> {
    pub fn new(config: &'a TerrainConfig) -> Self {
        Self { config }
    }

    /// One double-sided mesh per river, in input order.
    pub fn build(&self, map: &MapData) -> Result<RiverMeshes, DataError> {
        let mut meshes = Vec::with_capacity(map.rivers().len());
        let mut warnings = Vec::new();

        for (river_idx, river) in map.rivers().iter().enumerate() {
            if !(river.width_factor > 0.0) || !river.width_factor.is_finite() {
                return Err(DataError::InvalidRiver {
                    river: river_idx,
                    width_factor: river.width_factor,
                });
            }
            let cells = river
                .cells
                .iter()
                .map(|&id| {
                    map.cell_by_id(id).ok_or(DataError::UnknownRiverCell {
                        river: river_idx,
                        cell: id,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() < 2 {
                warn!(
                    "River {} passes through {} cell(s) and produces no ribbon",
                    river_idx,
                    cells.len()
                );
            }

            let ribbon = self.ribbon(&cells, river.width_factor);
            for segment in ribbon.skipped {
                let warning = GeometryError::ZeroLengthSegment {
                    river: river_idx,
                    segment,
                };
                warn!("{}", warning);
                warnings.push(warning);
            }

            meshes.push(Mesh::new(
                ribbon.geometry,
                Topology::Triangles,
                Material::basic(self.config.river_color).double_sided(),
                MeshSource::River(river_idx),
            ));
        }

        Ok(RiverMeshes { meshes, warnings })
    }

    /**
     * Emits a quad (two triangles, six vertices) per pair of consecutive cells.
     *
     * The first quad computes its leading edge at the first centroid; every later quad
     * starts from the previous quad's trailing edge, so consecutive quads share their
     * edge vertices exactly. Pairs with coincident centroids emit nothing and leave the
     * trailing edge untouched.
     */
    pub fn ribbon(&self, cells: &[&Cell], width_factor: f32) -> Ribbon {
        let mut geometry = Geometry::default();
        let mut skipped = Vec::new();
        let segments = cells.len().saturating_sub(1);
        let mut trailing: Option<[Vector3<f32>; 2]> = None;

        for (j, pair) in cells.windows(2).enumerate() {
            let (from, to) = (pair[0].centroid(), pair[1].centroid());
            if from == to {
                skipped.push(j);
                continue;
            }
            let z_from = self.config.scene_depth(pair[0].height) + self.config.river_elevation_offset;
            let z_to = self.config.scene_depth(pair[1].height) + self.config.river_elevation_offset;

            let dir = to - from;
            let width = self.segment_width(j, segments, width_factor);
            let half = Vector2::new(-dir.y, dir.x).normalize() * width / 2.0;

            let [lead_minus, lead_plus] = trailing
                .unwrap_or([(from - half).extend(z_from), (from + half).extend(z_from)]);
            let trail_minus = (to - half).extend(z_to);
            let trail_plus = (to + half).extend(z_to);

            let base = geometry.positions.len() as u32;
            geometry.positions.extend_from_slice(&[
                lead_minus,
                lead_plus,
                trail_minus,
                trail_minus,
                lead_plus,
                trail_plus,
            ]);
            geometry.normals.extend_from_slice(&[Vector3::unit_z(); 6]);
            geometry.indices.extend(base..base + 6);

            trailing = Some([trail_minus, trail_plus]);
        }

        Ribbon { geometry, skipped }
    }

    /// Width of segment `index` out of `segments`, interpolated linearly by index from
    /// the start width to `start * width_factor`.
    pub fn segment_width(&self, index: usize, segments: usize, width_factor: f32) -> f32 {
        let start = self.config.river_start_width;
        let end = start * width_factor;
        if segments == 0 {
            return start;
        }
        start + (end - start) * (index as f32 / segments as f32)
    }
}
