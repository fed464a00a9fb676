//! Renderer-agnostic mesh descriptors.
//!
//! A [`Mesh`] is plain CPU data: positions, normals and triangle (or line) indices in
//! the map's local space (X/Y horizontal, Z up), plus a local transform, a material and
//! a back-reference to the feature it was generated from.

use cgmath::Vector3;

use crate::data_structures::{color::Color, instance::Instance};

/// Bitmask of scene layers, used to restrict raycasts to interactive meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Layers(u32);

impl Layers {
    pub const DEFAULT: Layers = Layers(1 << 0);
    pub const PICK: Layers = Layers(1 << 1);

    pub fn enable(&mut self, layer: Layers) {
        self.0 |= layer.0;
    }

    pub fn contains(&self, layer: Layers) -> bool {
        self.0 & layer.0 == layer.0
    }
}

/// Which feature a mesh was generated from, as an index into the map tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshSource {
    Cell(usize),
    CellOutline(usize),
    River(usize),
    Marker(usize),
    MarkerStem(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    /// Closed line loop; indices list consecutive vertices.
    LineLoop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Lit with specular highlights.
    Phong,
    /// Unlit, flat color.
    Basic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub shininess: f32,
    pub shading: Shading,
    pub double_sided: bool,
}

impl Material {
    pub fn phong(color: Color, shininess: f32) -> Self {
        Self {
            color,
            opacity: 1.0,
            shininess,
            shading: Shading::Phong,
            double_sided: false,
        }
    }

    pub fn basic(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            shininess: 0.0,
            shading: Shading::Basic,
            double_sided: false,
        }
    }

    pub fn transparent(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Raw vertex/index data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates triangles as vertex triples. Empty for line geometry.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| {
            [
                self.positions[c[0] as usize],
                self.positions[c[1] as usize],
                self.positions[c[2] as usize],
            ]
        })
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Geometry,
    pub topology: Topology,
    pub material: Material,
    pub local: Instance,
    pub layers: Layers,
    pub source: MeshSource,
}

impl Mesh {
    pub fn new(geometry: Geometry, topology: Topology, material: Material, source: MeshSource) -> Self {
        Self {
            geometry,
            topology,
            material,
            local: Instance::default(),
            layers: Layers::DEFAULT,
            source,
        }
    }

    pub fn pickable(&self) -> bool {
        self.topology == Topology::Triangles && self.layers.contains(Layers::PICK)
    }
}
