//! Single point-light Lambertian shading.
//!
//! Every face gets one brightness from the light direction at its center.
//! Fill samples are re-shaded at their own world position with the same
//! face normal.

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Mesh;
use crate::math::{self, UP};
use crate::transform::Placement;

/// Lowest brightness a line can get, even when facing away from the light.
pub const AMBIENT_FLOOR: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceShading {
    pub normal: Vector3<f32>,
    /// Model-space mean of the first three vertices.
    pub center: Point3<f32>,
    pub brightness: f32,
}

/// Normal, center and brightness of one face.
///
/// Only the first three vertices are used, so quads and larger polygons get
/// the normal and center of their first triangle. Faces with fewer than three
/// indices point up from the origin.
pub fn compute_face_shading(
    mesh: &Mesh,
    face: &[usize],
    placement: &Placement,
    light: &Point3<f32>,
) -> GeometryResult<FaceShading> {
    mesh.validate_face(face)?;
    for &index in face {
        if !mesh.vertices[index].coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }
    }

    let (normal, center) = match face {
        [i0, i1, i2, ..] => {
            let (v0, v1, v2) = (mesh.vertices[*i0], mesh.vertices[*i1], mesh.vertices[*i2]);
            let edge1 = math::subtract(&v1, &v0);
            let edge2 = math::subtract(&v2, &v0);
            let normal = math::normalize(&math::cross(&edge1, &edge2)).unwrap_or_else(|_| {
                log::debug!("collinear face {:?}, using up normal", face);
                UP
            });
            let center = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0);
            (normal, center)
        }
        _ => (UP, Point3::origin()),
    };

    let brightness = point_brightness(&normal, &placement.to_world(&center), light);
    Ok(FaceShading {
        normal,
        center,
        brightness,
    })
}

/// Lambertian term at a world-space point, clamped to `[AMBIENT_FLOOR, 1]`.
///
/// A light sitting exactly on the point counts as straight overhead.
pub fn point_brightness(normal: &Vector3<f32>, point: &Point3<f32>, light: &Point3<f32>) -> f32 {
    let to_light = math::normalize_or(&math::subtract(light, point), *normal);
    math::dot(normal, &to_light).clamp(AMBIENT_FLOOR, 1.0)
}
