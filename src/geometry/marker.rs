//! Marker props hovering above the terrain, each tied down by a thin stem.

use cgmath::Vector3;

use crate::{
    config::TerrainConfig,
    data_structures::{
        color::Color,
        instance::Instance,
        map::{MapData, MarkerCategory},
        mesh::{Layers, Material, Mesh, MeshSource, Topology},
    },
    error::DataError,
    geometry::primitives::{cone, cuboid},
};

/// Prop geometry and base color of a marker category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropShape {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
    pub color: Color,
}

impl PropShape {
    pub fn of(category: MarkerCategory) -> Self {
        match category {
            MarkerCategory::City => PropShape {
                radius: 0.15,
                height: 0.3,
                segments: 5,
                color: Color::from_hex(0xFFFF00),
            },
            MarkerCategory::Military => PropShape {
                radius: 0.22,
                height: 0.5,
                segments: 4,
                color: Color::from_hex(0x04822A),
            },
            MarkerCategory::Capital => PropShape {
                radius: 0.27,
                height: 0.7,
                segments: 6,
                color: Color::from_hex(0x800000),
            },
        }
    }
}

pub struct MarkerMeshes {
    pub meshes: Vec<Mesh>,
}

pub struct MarkerPlacer<'a> {
    config: &'a TerrainConfig,
}

impl<'a> MarkerPlacer<'a> {
    pub fn new(config: &'a TerrainConfig) -> Self {
        Self { config }
    }

    /// Emits a pickable prop and a stem per marker, in input order.
    pub fn place(&self, map: &MapData) -> Result<MarkerMeshes, DataError> {
        let mut meshes = Vec::with_capacity(map.markers().len() * 2);

        for (idx, marker) in map.markers().iter().enumerate() {
            let category = map
                .marker_category(idx)
                .map_or_else(|| marker.resolve_category(idx), Ok)?;
            let shape = PropShape::of(category);
            let cell = map
                .cell_by_id(marker.cell)
                .ok_or(DataError::UnknownMarkerCell {
                    marker: idx,
                    cell: marker.cell,
                })?;

            let surface = self.config.scene_depth(cell.height);
            let center = self.placement_height(surface, &shape);
            let [x, y] = marker.position;

            let mut prop = Mesh::new(
                cone(shape.radius, shape.height, shape.segments),
                Topology::Triangles,
                Material::phong(shape.color, self.config.shininess),
                MeshSource::Marker(idx),
            );
            prop.local = Instance::from_translation(Vector3::new(x, y, center));
            prop.layers.enable(Layers::PICK);
            meshes.push(prop);

            let length = center - surface;
            let thickness = self.config.stem_thickness;
            let mut stem = Mesh::new(
                cuboid(thickness, thickness, length),
                Topology::Triangles,
                Material::basic(self.config.stem_color),
                MeshSource::MarkerStem(idx),
            );
            stem.local = Instance::from_translation(Vector3::new(x, y, surface + length / 2.0));
            meshes.push(stem);
        }

        Ok(MarkerMeshes { meshes })
    }

    /// Height of the prop's center: terrain surface, clearance, then half the prop so
    /// its base floats just above the surface.
    pub fn placement_height(&self, surface: f32, shape: &PropShape) -> f32 {
        surface + self.config.marker_clearance + shape.height / 2.0
    }
}
