//! Pointer picking and hover highlighting.
//!
//! Picking runs on the CPU against the generated meshes: a ray is built from the pointer
//! position and the camera's view-projection, intersected with every mesh on the pick
//! layer, and the nearest hit drives a two-state machine:
//!
//! - `Idle` + hit → cache the target's color, highlight it, describe it
//! - `Hovering(T)` + no hit → restore `T`'s cached color
//! - `Hovering(T)` + hit on `T` → nothing
//! - `Hovering(T1)` + hit on `T2` → restore `T1`, then cache, highlight and describe `T2`
//!
//! The cached original lives inside the `Hovering` state, so there is never a target
//! without a color to restore. Colors carry random jitter and are never recomputed.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Transform, Vector2, Vector3, Vector4};
use log::debug;

use crate::data_structures::{color::Color, mesh::MeshSource, terrain::TerrainModel};

const EPSILON: f32 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// A ray with a normalized direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /**
     * Unprojects a pointer position in normalized device coordinates through the inverse
     * view-projection (wgpu clip space, depth in `[0, 1]`). Returns `None` for a singular
     * matrix.
     */
    pub fn from_ndc(ndc: Vector2<f32>, view_proj: &Matrix4<f32>) -> Option<Self> {
        let inverse = view_proj.invert()?;
        let near = inverse * Vector4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inverse * Vector4::new(ndc.x, ndc.y, 1.0, 1.0);
        if near.w.abs() < EPSILON || far.w.abs() < EPSILON {
            return None;
        }
        let near = Point3::from_homogeneous(near);
        let far = Point3::from_homogeneous(far);
        Some(Self::new(near, far - near))
    }

    /// Moves the ray into another space without renormalizing, so that distances along
    /// the transformed ray stay comparable with the original.
    fn transform(&self, matrix: &Matrix4<f32>) -> Ray {
        Ray {
            origin: matrix.transform_point(self.origin),
            direction: matrix.transform_vector(self.direction),
        }
    }

    /// Möller–Trumbore, hitting both faces. Returns the ray parameter of the hit.
    pub fn intersect_triangle(&self, [a, b, c]: [Vector3<f32>; 3]) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin.to_vec() - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t > EPSILON).then_some(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub mesh: usize,
    pub distance: f32,
}

/// Nearest hit among the meshes on the pick layer.
pub fn raycast(model: &TerrainModel, ray: &Ray) -> Option<Hit> {
    let mut nearest: Option<Hit> = None;
    for (idx, mesh) in model.meshes().iter().enumerate() {
        if !mesh.pickable() {
            continue;
        }
        let Some(to_local) = model.world_transform(idx).to_matrix().invert() else {
            continue;
        };
        let local = ray.transform(&to_local);
        for triangle in mesh.geometry.triangles() {
            if let Some(distance) = local.intersect_triangle(triangle) {
                if nearest.is_none_or(|hit| distance < hit.distance) {
                    nearest = Some(Hit { mesh: idx, distance });
                }
            }
        }
    }
    nearest
}

/// An entity that can be hovered, by index into the map tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickTarget {
    Cell(usize),
    Marker(usize),
}

impl PickTarget {
    pub fn from_source(source: MeshSource) -> Option<Self> {
        match source {
            MeshSource::Cell(idx) => Some(PickTarget::Cell(idx)),
            MeshSource::Marker(idx) => Some(PickTarget::Marker(idx)),
            _ => None,
        }
    }

    fn mesh(&self, model: &TerrainModel) -> Option<usize> {
        match *self {
            PickTarget::Cell(idx) => model.cell_mesh(idx),
            PickTarget::Marker(idx) => model.marker_mesh(idx),
        }
    }

    /// Info panel text: name and legend for markers, id and scene height for cells.
    pub fn describe(&self, model: &TerrainModel) -> String {
        let map = model.map();
        match *self {
            PickTarget::Marker(idx) => {
                let marker = &map.markers()[idx];
                format!("{} {}", marker.name, marker.legend)
            }
            PickTarget::Cell(idx) => {
                let cell = &map.cells()[idx];
                format!(
                    "Target cell: {} height: {}",
                    cell.id,
                    model.config().scene_depth(cell.height)
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverState {
    Idle,
    Hovering {
        target: PickTarget,
        mesh: usize,
        original: Color,
    },
}

impl HoverState {
    pub fn target(&self) -> Option<PickTarget> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering { target, .. } => Some(*target),
        }
    }
}

/// What a call to [`PickingController::update`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Entered,
    Switched,
    Cleared,
}

#[derive(Debug)]
pub struct PickingController {
    state: HoverState,
    info: String,
    highlight: Color,
}

impl PickingController {
    pub fn new(highlight: Color) -> Self {
        Self {
            state: HoverState::Idle,
            info: String::new(),
            highlight,
        }
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn hovered(&self) -> Option<PickTarget> {
        self.state.target()
    }

    /// Text for the overlay; empty while idle.
    pub fn info_text(&self) -> &str {
        &self.info
    }

    /// Raycasts and feeds the nearest pickable hit into [`update`](Self::update).
    /// `None` (e.g. the pointer left the window) counts as no hit.
    pub fn pick(&mut self, ray: Option<&Ray>, model: &mut TerrainModel) -> Transition {
        let hit = ray
            .and_then(|ray| raycast(model, ray))
            .and_then(|hit| PickTarget::from_source(model.meshes()[hit.mesh].source));
        self.update(hit, model)
    }

    pub fn update(&mut self, hit: Option<PickTarget>, model: &mut TerrainModel) -> Transition {
        let hit = hit.and_then(|target| {
            let mesh = target.mesh(model);
            debug_assert!(mesh.is_some(), "{target:?} has no mesh");
            mesh.map(|mesh| (target, mesh))
        });

        match (self.state, hit) {
            (HoverState::Idle, None) => Transition::Unchanged,
            (HoverState::Hovering { target, .. }, Some((next, _))) if target == next => {
                Transition::Unchanged
            }
            (HoverState::Hovering { target, mesh, original }, None) => {
                model.set_mesh_color(mesh, original);
                self.state = HoverState::Idle;
                self.info.clear();
                debug!("Hover left {:?}", target);
                Transition::Cleared
            }
            (HoverState::Hovering { target, mesh, original }, Some((next, next_mesh))) => {
                model.set_mesh_color(mesh, original);
                self.enter(next, next_mesh, model);
                debug!("Hover moved from {:?} to {:?}", target, next);
                Transition::Switched
            }
            (HoverState::Idle, Some((next, next_mesh))) => {
                self.enter(next, next_mesh, model);
                debug!("Hover entered {:?}", next);
                Transition::Entered
            }
        }
    }

    fn enter(&mut self, target: PickTarget, mesh: usize, model: &mut TerrainModel) {
        let original = model.mesh_color(mesh);
        model.set_mesh_color(mesh, self.highlight);
        self.info = target.describe(model);
        self.state = HoverState::Hovering {
            target,
            mesh,
            original,
        };
    }
}
