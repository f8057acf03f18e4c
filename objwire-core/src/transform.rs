//! Model placement and viewer rotation

use nalgebra::{Matrix4, Point3, Vector3};

/// Where a mesh lands in the world: `world = start + vertex * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub start: Point3<f32>,
    pub scale: f32,
}

impl Placement {
    pub fn new(start: Point3<f32>, scale: f32) -> Self {
        Self { start, scale }
    }

    /// Map a model-space point into world space.
    pub fn to_world(&self, vertex: &Point3<f32>) -> Point3<f32> {
        self.start + vertex.coords * self.scale
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Point3::origin(), 1.0)
    }
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Matrix constructors for viewing the rendered lines.
pub struct Transform;

impl Transform {
    /// Rotation about `pivot`, applied Z, Y, X.
    pub fn rotation_about(rotation: &RotationState, pivot: &Point3<f32>) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        Matrix4::new_translation(&pivot.coords) * rz * ry * rx
            * Matrix4::new_translation(&-pivot.coords)
    }
}
