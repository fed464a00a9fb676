//! A look-at perspective camera.
//!
//! Navigation is left to the embedding application; this only turns an eye/target pair
//! and a projection into the view-projection matrix used for rendering and picking.

use cgmath::{Deg, Matrix4, Point3, Vector3, perspective};

/// Converts OpenGL clip space (z in `[-1, 1]`) to wgpu clip space (z in `[0, 1]`).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, aspect: f32) -> Self {
        Self {
            eye,
            target,
            aspect,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

impl Default for Camera {
    /// The overview the map viewer opens with: above and behind the map, looking down.
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 12.5, -5.0),
            target: Point3::new(0.0, 5.0, -12.5),
            up: Vector3::unit_y(),
            aspect: 16.0 / 9.0,
            fovy: Deg(70.0),
            znear: 0.01,
            zfar: 1000.0,
        }
    }
}
