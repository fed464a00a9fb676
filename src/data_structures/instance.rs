//! Affine transforms for generated meshes.
//!
//! An [`Instance`] is a translation, a rotation (quaternion) and a scale, applied in
//! the order scale → rotate → translate. The scene's global transform and every
//! per-mesh local transform are instances; a mesh's world transform is
//! `global * local`.

use std::ops::Mul;

use cgmath::{Matrix4, One, Point3, Quaternion, Rotation3, Transform, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// Identity transform (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Rotation of `angle` radians about the local Z axis, the map's "up".
    pub fn with_spin(mut self, angle: f32) -> Self {
        self.rotation = Quaternion::from_angle_z(cgmath::Rad(angle));
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn transform_point(&self, p: Point3<f32>) -> Point3<f32> {
        self.to_matrix().transform_point(p)
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * Composition: `(a * b)` applies `b` first, then `a`.
 *
 * Only exact for uniform scales on `a`, which is all the scene ever uses.
 */
impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let scaled_rhs_pos = Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        Instance {
            position: self.position + (self.rotation * scaled_rhs_pos),
            rotation: self.rotation * rhs.rotation,
            scale: Vector3::new(
                self.scale.x * rhs.scale.x,
                self.scale.y * rhs.scale.y,
                self.scale.z * rhs.scale.z,
            ),
        }
    }
}

impl Mul<Instance> for Instance {
    type Output = Instance;

    fn mul(self, rhs: Instance) -> Self::Output {
        &self * &rhs
    }
}
