//! Viewer camera for looking at rendered lines

use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for viewing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// A look-at camera. Only the viewer uses it; shading never depends on it.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Point the camera at the box `min..max` from slightly above and in
    /// front, far enough back that the whole box fits the field of view.
    pub fn frame(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        let center = nalgebra::center(min, max);
        let radius = ((max - min).norm() / 2.0).max(1e-3);
        let distance = radius / (self.fov / 2.0).sin();
        let direction = Vector3::new(0.0, 0.35, 1.0).normalize();

        self.target = center;
        self.position = center + direction * distance;
        self.near = (distance - radius).max(distance * 0.01);
        self.far = distance + radius * 2.0;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a world point to screen space as `(x, y, depth)`.
    ///
    /// Returns `None` for points outside the near/far range. Points left or
    /// right of the screen are still returned so lines can be clipped.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        // Behind the camera or degenerate
        if clip.w.abs() < 1e-6 || (self.mode == ProjectionMode::Perspective && clip.w < 0.0) {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = Camera::new(80, 40);
        camera.frame(&Point3::new(-1.0, 199.0, -1.0), &Point3::new(1.0, 201.0, 1.0));
        let (x, y, _) = camera
            .project_to_screen(&camera.target, &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_centers_target() {
        let mut camera = Camera::new(80, 40);
        camera.frame(&Point3::new(-1.0, -1.0, -1.0), &Point3::new(1.0, 1.0, 1.0));
        camera.mode = ProjectionMode::Orthographic;
        let (x, y, _) = camera
            .project_to_screen(&camera.target, &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera() {
        let camera = Camera::new(80, 40);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_framed_box_fits() {
        let mut camera = Camera::new(80, 80);
        let (min, max) = (Point3::new(-3.0, -2.0, -1.0), Point3::new(5.0, 4.0, 2.0));
        camera.frame(&min, &max);
        for corner in [min, max] {
            let (x, y, _) = camera
                .project_to_screen(&corner, &Matrix4::identity(), 80, 80)
                .unwrap();
            assert!((0.0..=80.0).contains(&x) && (0.0..=80.0).contains(&y));
        }
    }
}
