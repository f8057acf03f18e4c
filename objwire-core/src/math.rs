//! Vector helpers used by shading and the fill pass

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// Direction used when a face cannot produce a normal of its own.
pub const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

pub fn subtract(a: &Point3<f32>, b: &Point3<f32>) -> Vector3<f32> {
    a - b
}

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.dot(b)
}

pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Scale `v` to unit length.
///
/// Zero-length and non-finite inputs are rejected instead of producing NaN.
pub fn normalize(v: &Vector3<f32>) -> GeometryResult<Vector3<f32>> {
    let length = v.norm();
    if !length.is_finite() || length <= f32::EPSILON {
        return Err(GeometryError::DegenerateVector);
    }
    Ok(v / length)
}

/// [`normalize`], substituting `fallback` for degenerate input.
pub fn normalize_or(v: &Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    normalize(v).unwrap_or(fallback)
}

/// Weighted combination `a*p0 + b*p1 + c*p2`; weights are expected to sum to 1.
pub fn barycentric(
    p0: &Point3<f32>,
    p1: &Point3<f32>,
    p2: &Point3<f32>,
    (a, b, c): (f32, f32, f32),
) -> Point3<f32> {
    Point3::from(p0.coords * a + p1.coords * b + p2.coords * c)
}
