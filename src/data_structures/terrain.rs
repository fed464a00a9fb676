//! The generated scene: every mesh plus the global centering transform.

use cgmath::{Quaternion, Rad, Rotation3, Vector2, Vector3};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    config::TerrainConfig,
    data_structures::{
        color::Color,
        instance::Instance,
        map::MapData,
        mesh::{Mesh, MeshSource},
    },
    error::{DataError, GeometryError},
    geometry::{marker::MarkerPlacer, river::RiverMeshBuilder, terrain::TerrainMeshBuilder},
};

/// Axis-aligned 2D bounds over every cell ring vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            min_y: f32::INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    pub fn extend(&mut self, [x, y]: [f32; 2]) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/**
 * Owns every generated mesh and the single global transform.
 *
 * Built once from [`MapData`] and never rebuilt. After construction only mesh colors
 * (hover highlighting) and marker spin change. Meshes refer back to their features by
 * index through [`MeshSource`]; `cell_meshes` and `marker_meshes` map feature indices
 * to mesh indices for the reverse direction.
 */
#[derive(Debug)]
pub struct TerrainModel {
    map: MapData,
    config: TerrainConfig,
    meshes: Vec<Mesh>,
    cell_meshes: Vec<usize>,
    marker_meshes: Vec<usize>,
    marker_spin: Vec<f32>,
    bounds: Bounds,
    global: Instance,
    warnings: Vec<GeometryError>,
}

impl TerrainModel {
    pub fn build(map: MapData, config: TerrainConfig) -> Result<Self, DataError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let terrain = TerrainMeshBuilder::new(&config).build(map.cells(), &mut rng)?;
        let rivers = RiverMeshBuilder::new(&config).build(&map)?;
        let markers = MarkerPlacer::new(&config).place(&map)?;

        let mut meshes = Vec::with_capacity(
            terrain.meshes.len() + rivers.meshes.len() + markers.meshes.len(),
        );
        let mut cell_meshes = vec![0; map.cells().len()];
        let mut marker_meshes = vec![0; map.markers().len()];
        for mesh in terrain
            .meshes
            .into_iter()
            .chain(rivers.meshes)
            .chain(markers.meshes)
        {
            match mesh.source {
                MeshSource::Cell(idx) => cell_meshes[idx] = meshes.len(),
                MeshSource::Marker(idx) => marker_meshes[idx] = meshes.len(),
                _ => (),
            }
            meshes.push(mesh);
        }

        let global = scene_transform(&terrain.bounds, config.scale);
        info!(
            "Built terrain: {} cells, {} rivers, {} markers, {} meshes, bounds x {}..{} y {}..{}",
            map.cells().len(),
            map.rivers().len(),
            map.markers().len(),
            meshes.len(),
            terrain.bounds.min_x,
            terrain.bounds.max_x,
            terrain.bounds.min_y,
            terrain.bounds.max_y,
        );

        Ok(Self {
            marker_spin: vec![0.0; map.markers().len()],
            map,
            config,
            meshes,
            cell_meshes,
            marker_meshes,
            bounds: terrain.bounds,
            global,
            warnings: rivers.warnings,
        })
    }

    pub fn map(&self) -> &MapData {
        &self.map
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, idx: usize) -> Option<&Mesh> {
        self.meshes.get(idx)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn global_transform(&self) -> &Instance {
        &self.global
    }

    /// Horizontal translation applied before scaling: `(-(minX+maxX)/2, (minY+maxY)/2)`.
    pub fn centering(&self) -> Vector2<f32> {
        let center = self.bounds.center();
        Vector2::new(-center.x, center.y)
    }

    /// World transform of a mesh: global transform, then its local transform.
    pub fn world_transform(&self, idx: usize) -> Instance {
        &self.global * &self.meshes[idx].local
    }

    pub fn warnings(&self) -> &[GeometryError] {
        &self.warnings
    }

    pub fn cell_mesh(&self, cell: usize) -> Option<usize> {
        self.cell_meshes.get(cell).copied()
    }

    pub fn marker_mesh(&self, marker: usize) -> Option<usize> {
        self.marker_meshes.get(marker).copied()
    }

    pub fn mesh_color(&self, idx: usize) -> Color {
        self.meshes[idx].material.color
    }

    pub fn set_mesh_color(&mut self, idx: usize, color: Color) {
        self.meshes[idx].material.color = color;
    }

    pub fn marker_spin(&self, marker: usize) -> Option<f32> {
        self.marker_spin.get(marker).copied()
    }

    /// Stores the marker's spin angle and rotates its prop about the vertical axis.
    pub fn set_marker_spin(&mut self, marker: usize, angle: f32) {
        let Some(mesh_idx) = self.marker_mesh(marker) else {
            return;
        };
        self.marker_spin[marker] = angle;
        let local = self.meshes[mesh_idx].local;
        self.meshes[mesh_idx].local = local.with_spin(angle);
    }
}

/// `p_scene = scale * (R * p + t)`: realigns the map's Z-up plane to the scene's Y-up
/// ground plane and moves the bounding box midpoint to the horizontal origin.
fn scene_transform(bounds: &Bounds, scale: f32) -> Instance {
    let center = bounds.center();
    let centering = Vector3::new(-center.x, 0.0, center.y);
    Instance {
        position: centering * scale,
        rotation: Quaternion::from_angle_x(Rad(-std::f32::consts::FRAC_PI_2)),
        scale: Vector3::new(scale, scale, scale),
    }
}
