//! Mesh data and debug-line primitives

use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};

/// Ordered 0-based indices into [`Mesh::vertices`].
pub type Face = Vec<usize>;

/// An indexed polygon mesh as read from OBJ `v`/`f` lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        self.vertices.push(Point3::new(x, y, z));
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Look up a vertex, failing for indices past the end.
    pub fn vertex(&self, index: usize) -> GeometryResult<Point3<f32>> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            })
    }

    /// Check that every index of `face` refers to an existing vertex.
    pub fn validate_face(&self, face: &[usize]) -> GeometryResult<()> {
        match face.iter().find(|&&i| i >= self.vertices.len()) {
            Some(&index) => Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }

    /// Check every face.
    pub fn validate(&self) -> GeometryResult<()> {
        self.faces.iter().try_for_each(|face| self.validate_face(face))
    }

    /// Axis-aligned bounds of all finite vertices, `None` if there are none.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut finite = self
            .vertices
            .iter()
            .filter(|v| v.coords.iter().all(|c| c.is_finite()));
        let first = *finite.next()?;
        Some(finite.fold((first, first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        }))
    }

    /// A unit cube made of six quads, centered on the origin.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::new();
        for &(x, y, z) in &[
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ] {
            mesh.add_vertex(x, y, z);
        }

        // Counter-clockwise when seen from outside
        mesh.add_face(vec![4, 5, 6, 7]); // front (+z)
        mesh.add_face(vec![1, 0, 3, 2]); // back (-z)
        mesh.add_face(vec![3, 7, 6, 2]); // top (+y)
        mesh.add_face(vec![0, 1, 5, 4]); // bottom (-y)
        mesh.add_face(vec![1, 2, 6, 5]); // right (+x)
        mesh.add_face(vec![0, 4, 7, 3]); // left (-x)
        mesh
    }
}

/// Per-channel brightness of a debug line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// All three channels set to `brightness`.
    pub fn gray(brightness: f32) -> Self {
        Self::new(brightness, brightness, brightness)
    }

    /// Mean of the three channels.
    pub fn luminance(&self) -> f32 {
        (self.red + self.green + self.blue) / 3.0
    }
}

/// A world-space line segment handed to a [`LineSink`](crate::sink::LineSink).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub from: Point3<f32>,
    pub to: Point3<f32>,
    pub color: Color,
}

impl DebugLine {
    pub fn new(from: Point3<f32>, to: Point3<f32>, color: Color) -> Self {
        Self { from, to, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face(vec![0, 1, 2]);
        mesh
    }

    #[test]
    fn test_validate_face() {
        let mesh = triangle();
        assert!(mesh.validate().is_ok());
        assert_eq!(
            mesh.validate_face(&[0, 1, 3]),
            Err(GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_vertex_lookup() {
        let mesh = triangle();
        assert_eq!(mesh.vertex(1).unwrap(), Point3::new(1.0, 0.0, 0.0));
        assert!(mesh.vertex(3).is_err());
    }

    #[test]
    fn test_bounds_skip_nan() {
        let mut mesh = triangle();
        mesh.add_vertex(f32::NAN, 9.0, 9.0);
        mesh.add_vertex(-2.0, 0.5, 4.0);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 4.0));
        assert!(Mesh::new().bounds().is_none());
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 6);
        assert!(cube.faces.iter().all(|f| f.len() == 4));
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_gray_color() {
        let c = Color::gray(0.4);
        assert_eq!(c, Color::new(0.4, 0.4, 0.4));
        assert!((c.luminance() - 0.4).abs() < 1e-6);
    }
}
