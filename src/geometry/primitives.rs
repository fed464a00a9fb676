//! Geometry primitives in map-local space (Z up).

use std::f32::consts::TAU;

use cgmath::{InnerSpace, Vector2, Vector3};

use crate::data_structures::mesh::Geometry;

/// Twice the signed area of a ring; positive for counter-clockwise winding.
fn signed_area2(ring: &[Vector2<f32>]) -> f32 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

fn push_triangle(geometry: &mut Geometry, corners: [Vector3<f32>; 3], normal: Vector3<f32>) {
    let base = geometry.positions.len() as u32;
    geometry.positions.extend_from_slice(&corners);
    geometry.normals.extend_from_slice(&[normal; 3]);
    geometry.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

fn push_quad(geometry: &mut Geometry, corners: [Vector3<f32>; 4], normal: Vector3<f32>) {
    let base = geometry.positions.len() as u32;
    geometry.positions.extend_from_slice(&corners);
    geometry.normals.extend_from_slice(&[normal; 4]);
    geometry
        .indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/**
 * Extrudes an open ring (no closing duplicate) from `z = 0` up to `z = depth`.
 *
 * The caps are triangulated with earcut and the walls get one quad per ring edge with
 * a flat outward normal. Returns `None` when the ring cannot be triangulated, e.g. a
 * zero-area or collinear ring.
 */
pub fn extrude_polygon(ring: &[[f32; 2]], depth: f32) -> Option<Geometry> {
    let mut ring: Vec<Vector2<f32>> = ring.iter().map(|p| Vector2::from(*p)).collect();
    if ring.len() < 3 {
        return None;
    }
    let area2 = signed_area2(&ring);
    if area2 == 0.0 || !area2.is_finite() {
        return None;
    }
    // walls and caps below assume counter-clockwise winding
    if area2 < 0.0 {
        ring.reverse();
    }

    let flat: Vec<f64> = ring
        .iter()
        .flat_map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();
    let triangles = earcutr::earcut(&flat, &[], 2).ok()?;
    if triangles.is_empty() {
        return None;
    }

    let mut geometry = Geometry::default();
    let up = Vector3::unit_z();
    for tri in triangles.chunks_exact(3) {
        let [a, b, c] = [ring[tri[0]], ring[tri[1]], ring[tri[2]]];
        // earcut does not promise an orientation, so fix each triangle up here
        let (b, c) = if (b - a).perp_dot(c - a) < 0.0 { (c, b) } else { (b, c) };
        push_triangle(
            &mut geometry,
            [a.extend(depth), b.extend(depth), c.extend(depth)],
            up,
        );
        push_triangle(&mut geometry, [a.extend(0.0), c.extend(0.0), b.extend(0.0)], -up);
    }

    for (a, b) in ring.iter().zip(ring.iter().cycle().skip(1)) {
        let edge = b - a;
        if edge.magnitude2() == 0.0 {
            continue;
        }
        let normal = Vector3::new(edge.y, -edge.x, 0.0).normalize();
        push_quad(
            &mut geometry,
            [a.extend(0.0), b.extend(0.0), b.extend(depth), a.extend(depth)],
            normal,
        );
    }

    Some(geometry)
}

/// A closed line loop through the ring at height `z`.
pub fn line_loop(ring: &[[f32; 2]], z: f32) -> Geometry {
    let positions: Vec<Vector3<f32>> = ring.iter().map(|[x, y]| Vector3::new(*x, *y, z)).collect();
    Geometry {
        normals: vec![Vector3::unit_z(); positions.len()],
        indices: (0..positions.len() as u32).collect(),
        positions,
    }
}

/// A cone centered on the origin with its base at `z = -height / 2` and its apex at
/// `z = height / 2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let half = height / 2.0;
    let apex = Vector3::new(0.0, 0.0, half);
    let rim: Vec<Vector3<f32>> = (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            Vector3::new(radius * angle.cos(), radius * angle.sin(), -half)
        })
        .collect();

    let mut geometry = Geometry::default();
    for (a, b) in rim.iter().zip(rim.iter().cycle().skip(1)) {
        let normal = (b - a).cross(apex - a).normalize();
        push_triangle(&mut geometry, [*a, *b, apex], normal);
        push_triangle(
            &mut geometry,
            [Vector3::new(0.0, 0.0, -half), *b, *a],
            -Vector3::unit_z(),
        );
    }
    geometry
}

/// An axis-aligned box centered on the origin.
pub fn cuboid(width: f32, depth: f32, height: f32) -> Geometry {
    let (x, y, z) = (width / 2.0, depth / 2.0, height / 2.0);
    let v = |sx: f32, sy: f32, sz: f32| Vector3::new(sx * x, sy * y, sz * z);
    let mut geometry = Geometry::default();
    let faces = [
        ([v(1., -1., -1.), v(1., 1., -1.), v(1., 1., 1.), v(1., -1., 1.)], Vector3::unit_x()),
        ([v(-1., 1., -1.), v(-1., -1., -1.), v(-1., -1., 1.), v(-1., 1., 1.)], -Vector3::unit_x()),
        ([v(1., 1., -1.), v(-1., 1., -1.), v(-1., 1., 1.), v(1., 1., 1.)], Vector3::unit_y()),
        ([v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)], -Vector3::unit_y()),
        ([v(-1., -1., 1.), v(1., -1., 1.), v(1., 1., 1.), v(-1., 1., 1.)], Vector3::unit_z()),
        ([v(-1., 1., -1.), v(1., 1., -1.), v(1., -1., -1.), v(-1., -1., -1.)], -Vector3::unit_z()),
    ];
    for (corners, normal) in faces {
        push_quad(&mut geometry, corners, normal);
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extruded_square_is_closed_and_spans_depth() {
        let ring = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let geometry = extrude_polygon(&ring, 2.5).expect("square triangulates");
        // two cap triangles each side plus four wall quads
        assert_eq!(geometry.indices.len(), (2 + 2) * 3 + 4 * 6);
        let max_z = geometry.positions.iter().map(|p| p.z).fold(f32::MIN, f32::max);
        let min_z = geometry.positions.iter().map(|p| p.z).fold(f32::MAX, f32::min);
        assert_eq!(max_z, 2.5);
        assert_eq!(min_z, 0.0);
    }

    #[test]
    fn clockwise_rings_get_outward_walls() {
        let ring = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        let geometry = extrude_polygon(&ring, 1.0).unwrap();
        let center = Vector3::new(0.5, 0.5, 0.5);
        for (tri, n) in geometry
            .indices
            .chunks_exact(3)
            .map(|c| geometry.positions[c[0] as usize])
            .zip(geometry.indices.chunks_exact(3).map(|c| geometry.normals[c[0] as usize]))
        {
            assert!((tri - center).dot(n) > 0.0);
        }
    }

    #[test]
    fn collinear_ring_is_rejected() {
        let ring = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]];
        assert!(extrude_polygon(&ring, 1.0).is_none());
    }

    #[test]
    fn cone_spans_its_height() {
        let geometry = cone(0.15, 0.3, 5);
        assert_eq!(geometry.indices.len(), 5 * 2 * 3);
        assert!(geometry.positions.iter().all(|p| p.z >= -0.15 - 1e-6 && p.z <= 0.15 + 1e-6));
    }
}
