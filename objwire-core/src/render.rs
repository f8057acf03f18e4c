//! Incremental wireframe renderer.
//!
//! A [`RenderJob`] turns a [`Mesh`] into shaded [`DebugLine`]s one face per
//! step. Each step draws the face's closing edge loop and, for triangles
//! with `fill > 1`, a barycentric grid of sample points joined to the three
//! corners. Once every face has been drawn, the next step reports the total
//! through the status channel and the job is done for good.
//!
//! ```ignore
//! let mut lines: Vec<DebugLine> = Vec::new();
//! let mut chat: Vec<String> = Vec::new();
//! let mut job = RenderJob::new(mesh, RenderParams::default(), &mut lines, &mut chat)?;
//! while let StepOutcome::Face(_) = job.step() {}
//! assert_eq!(chat[0], format!("Loaded model with {} lines", lines.len()));
//! ```

use nalgebra::Point3;

use crate::error::{GeometryError, RenderError, RenderResult};
use crate::geometry::{Color, DebugLine, Mesh};
use crate::math;
use crate::scheduler::{Job, JobStatus};
use crate::shading::{compute_face_shading, point_brightness, FaceShading};
use crate::sink::{LineSink, StatusChannel};
use crate::transform::Placement;

/// Inputs of a render run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub placement: Placement,
    /// Subdivisions per triangle edge for the fill grid; 1 draws edges only.
    pub fill: u32,
    pub light: Point3<f32>,
}

impl RenderParams {
    pub fn new(start: Point3<f32>, scale: f32) -> Self {
        Self {
            placement: Placement::new(start, scale),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: u32) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_light(mut self, light: Point3<f32>) -> Self {
        self.light = light;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        let scale = self.placement.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidParams(format!(
                "scale must be positive, got {scale}"
            )));
        }
        if self.fill == 0 {
            return Err(RenderError::InvalidParams("fill must be at least 1".into()));
        }
        let finite = |p: &Point3<f32>| p.coords.iter().all(|c| c.is_finite());
        if !finite(&self.placement.start) {
            return Err(RenderError::InvalidParams("start position is not finite".into()));
        }
        if !finite(&self.light) {
            return Err(RenderError::InvalidParams("light position is not finite".into()));
        }
        Ok(())
    }
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            fill: 1,
            light: Point3::new(10.0, 20.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    /// `face` is the next face to draw.
    Running { face: usize },
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FaceOutcome {
    Drawn { face: usize, lines: usize },
    Skipped { face: usize, error: GeometryError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    pub lines: usize,
    pub faces_rendered: usize,
    pub faces_skipped: usize,
}

impl RenderReport {
    pub fn message(&self) -> String {
        format!("Loaded model with {} lines", self.lines)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// One face was processed; the job is suspended.
    Face(FaceOutcome),
    /// All faces were processed and the report was sent.
    Finished(RenderReport),
    /// The job had already finished.
    Exhausted,
}

/// One render run over an owned mesh.
///
/// The line counter lives in the job, so separate runs never share a total.
pub struct RenderJob<L, S> {
    mesh: Mesh,
    params: RenderParams,
    sink: L,
    status: S,
    state: RenderState,
    report: RenderReport,
}

impl<L: LineSink, S: StatusChannel> RenderJob<L, S> {
    pub fn new(mesh: Mesh, params: RenderParams, sink: L, status: S) -> RenderResult<Self> {
        params.validate()?;
        Ok(Self {
            mesh,
            params,
            sink,
            status,
            state: RenderState::Idle,
            report: RenderReport::default(),
        })
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Totals so far.
    pub fn report(&self) -> RenderReport {
        self.report
    }

    /// Draw the next face, or finish the run if none are left.
    pub fn step(&mut self) -> StepOutcome {
        let face = match self.state {
            RenderState::Done => return StepOutcome::Exhausted,
            RenderState::Idle => {
                log::info!(
                    "rendering {} faces ({} vertices, fill {})",
                    self.mesh.faces.len(),
                    self.mesh.vertices.len(),
                    self.params.fill
                );
                0
            }
            RenderState::Running { face } => face,
        };

        if face >= self.mesh.faces.len() {
            self.state = RenderState::Done;
            self.status.send_message(&self.report.message());
            return StepOutcome::Finished(self.report);
        }

        let outcome = self.render_face(face);
        self.state = RenderState::Running { face: face + 1 };
        StepOutcome::Face(outcome)
    }

    fn render_face(&mut self, index: usize) -> FaceOutcome {
        let face = &self.mesh.faces[index];
        let shading = match compute_face_shading(
            &self.mesh,
            face,
            &self.params.placement,
            &self.params.light,
        ) {
            Ok(shading) => shading,
            Err(error) => {
                log::warn!("skipping face {}: {}", index, error);
                self.report.faces_skipped += 1;
                return FaceOutcome::Skipped { face: index, error };
            }
        };

        let mut lines = draw_edges(&self.mesh, face, &self.params, &shading, &mut self.sink);
        if self.params.fill > 1 && face.len() == 3 {
            lines += draw_fill(&self.mesh, face, &self.params, &shading, &mut self.sink);
        }
        log::debug!(
            "face {}: {} lines, brightness {:.3}",
            index,
            lines,
            shading.brightness
        );

        self.report.lines += lines;
        self.report.faces_rendered += 1;
        FaceOutcome::Drawn { face: index, lines }
    }
}

/// Closed loop `face[i] -> face[(i + 1) % len]` in the face color.
fn draw_edges<L: LineSink>(
    mesh: &Mesh,
    face: &[usize],
    params: &RenderParams,
    shading: &FaceShading,
    sink: &mut L,
) -> usize {
    let color = Color::gray(shading.brightness);
    let world = |i: usize| params.placement.to_world(&mesh.vertices[i]);
    for (i, &a) in face.iter().enumerate() {
        let b = face[(i + 1) % face.len()];
        sink.add_line(DebugLine::new(world(a), world(b), color));
    }
    face.len()
}

/// Barycentric sub-grid of a triangle, each sample joined to all corners.
///
/// Rows `1..fill` hold `row + 1` samples each; every sample is re-shaded
/// at its own position with the face normal.
fn draw_fill<L: LineSink>(
    mesh: &Mesh,
    face: &[usize],
    params: &RenderParams,
    shading: &FaceShading,
    sink: &mut L,
) -> usize {
    let [v0, v1, v2] = [face[0], face[1], face[2]].map(|i| mesh.vertices[i]);
    let corners = [v0, v1, v2].map(|v| params.placement.to_world(&v));
    let fill = params.fill;
    let n = fill as f32;

    let mut lines = 0;
    for row in 1..fill {
        for col in 0..=row {
            let weights = (
                1.0 - row as f32 / n,
                (row - col) as f32 / n,
                col as f32 / n,
            );
            let p = params
                .placement
                .to_world(&math::barycentric(&v0, &v1, &v2, weights));
            let color = Color::gray(point_brightness(&shading.normal, &p, &params.light));
            for corner in &corners {
                sink.add_line(DebugLine::new(p, *corner, color));
                lines += 1;
            }
        }
    }
    lines
}

impl<L: LineSink, S: StatusChannel> Iterator for RenderJob<L, S> {
    type Item = FaceOutcome;

    /// One face per item; the item after the last face finishes the run.
    fn next(&mut self) -> Option<FaceOutcome> {
        match self.step() {
            StepOutcome::Face(outcome) => Some(outcome),
            StepOutcome::Finished(_) | StepOutcome::Exhausted => None,
        }
    }
}

impl<L: LineSink, S: StatusChannel> Job for RenderJob<L, S> {
    fn resume(&mut self) -> JobStatus {
        match self.step() {
            StepOutcome::Face(_) => JobStatus::Pending,
            StepOutcome::Finished(_) | StepOutcome::Exhausted => JobStatus::Complete,
        }
    }

    fn name(&self) -> &str {
        "render-mesh"
    }
}

/// Lines a triangle produces: 3 edges plus 3 per fill sample.
pub fn triangle_line_count(fill: u32) -> usize {
    let n = fill.max(1) as usize;
    3 + 3 * ((n - 1) * (n + 2) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::AMBIENT_FLOOR;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face(vec![0, 1, 2]);
        mesh
    }

    fn run(mesh: Mesh, params: RenderParams) -> (Vec<DebugLine>, Vec<String>, RenderReport) {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        let report = {
            let mut job = RenderJob::new(mesh, params, &mut lines, &mut chat).unwrap();
            loop {
                if let StepOutcome::Finished(report) = job.step() {
                    break report;
                }
            }
        };
        (lines, chat, report)
    }

    #[test]
    fn test_single_triangle_edges() {
        let (lines, chat, report) = run(triangle(), RenderParams::default());
        assert_eq!(lines.len(), 3);
        assert_eq!(report.lines, 3);
        assert_eq!(chat, vec!["Loaded model with 3 lines".to_string()]);

        let expected = [
            (Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
            (Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
            (Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
        ];
        for (line, (from, to)) in lines.iter().zip(expected) {
            assert_eq!(line.from, from);
            assert_eq!(line.to, to);
            assert_eq!(line.color, lines[0].color);
        }
        let c = lines[0].color;
        assert!(c.red == c.green && c.green == c.blue);
    }

    #[test]
    fn test_fill_two() {
        let (lines, _, report) = run(triangle(), RenderParams::default().with_fill(2));
        assert_eq!(lines.len(), 9);
        assert_eq!(report.lines, 9);

        // Samples at row 1: (a, b, c) = (0.5, 0.5, 0) and (0.5, 0, 0.5)
        let fill_lines = &lines[3..];
        assert_eq!(fill_lines[0].from, Point3::new(0.5, 0.0, 0.0));
        assert_eq!(fill_lines[0].to, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(fill_lines[2].to, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(fill_lines[3].from, Point3::new(0.0, 0.5, 0.0));
        assert_eq!(fill_lines[0].color, fill_lines[2].color);
    }

    #[test]
    fn test_fill_counts() {
        for fill in 1..6 {
            let (lines, _, _) = run(triangle(), RenderParams::default().with_fill(fill));
            assert_eq!(lines.len(), triangle_line_count(fill), "fill {fill}");
        }
        assert_eq!(triangle_line_count(1), 3);
        assert_eq!(triangle_line_count(2), 9);
        assert_eq!(triangle_line_count(3), 18);
    }

    #[test]
    fn test_fill_skips_quads() {
        let (lines, _, _) = run(Mesh::cube(2.0), RenderParams::default().with_fill(4));
        assert_eq!(lines.len(), 24);
    }

    #[test]
    fn test_placement_applied() {
        let params = RenderParams::new(Point3::new(0.0, 200.0, 0.0), 0.5);
        let (lines, _, _) = run(triangle(), params);
        assert_eq!(lines[0].from, Point3::new(0.0, 200.0, 0.0));
        assert_eq!(lines[0].to, Point3::new(0.5, 200.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        let mut job = RenderJob::new(Mesh::new(), RenderParams::default(), &mut lines, &mut chat)
            .unwrap();
        assert_eq!(job.state(), RenderState::Idle);
        assert_eq!(job.step(), StepOutcome::Finished(RenderReport::default()));
        assert_eq!(job.state(), RenderState::Done);
        assert_eq!(job.step(), StepOutcome::Exhausted);
        drop(job);
        assert!(lines.is_empty());
        assert_eq!(chat, vec!["Loaded model with 0 lines".to_string()]);
    }

    #[test]
    fn test_one_face_per_step() {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        let mut job =
            RenderJob::new(Mesh::cube(1.0), RenderParams::default(), &mut lines, &mut chat)
                .unwrap();
        for face in 0..6 {
            assert_eq!(
                job.step(),
                StepOutcome::Face(FaceOutcome::Drawn { face, lines: 4 })
            );
            assert_eq!(job.state(), RenderState::Running { face: face + 1 });
            assert_eq!(job.report().lines, 4 * (face + 1));
        }
        assert!(matches!(job.step(), StepOutcome::Finished(r) if r.lines == 24));
        drop(job);
        assert_eq!(chat.len(), 1);
    }

    #[test]
    fn test_abandoned_job_sends_nothing() {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        {
            let mut job =
                RenderJob::new(Mesh::cube(1.0), RenderParams::default(), &mut lines, &mut chat)
                    .unwrap();
            job.step();
            job.step();
        }
        assert_eq!(lines.len(), 8);
        assert!(chat.is_empty());
    }

    #[test]
    fn test_bad_faces_are_skipped() {
        let mut mesh = triangle();
        mesh.add_face(vec![0, 1, 9]);
        mesh.add_face(vec![2, 1, 0]);
        let (lines, chat, report) = run(mesh, RenderParams::default());
        assert_eq!(report.faces_rendered, 2);
        assert_eq!(report.faces_skipped, 1);
        assert_eq!(lines.len(), 6);
        assert_eq!(chat, vec!["Loaded model with 6 lines".to_string()]);
    }

    #[test]
    fn test_iterator_view() {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        let outcomes: Vec<FaceOutcome> =
            RenderJob::new(Mesh::cube(1.0), RenderParams::default(), &mut lines, &mut chat)
                .unwrap()
                .collect();
        assert_eq!(outcomes.len(), 6);
        assert_eq!(chat, vec!["Loaded model with 24 lines".to_string()]);
    }

    #[test]
    fn test_brightness_floor_on_lines() {
        let params = RenderParams::default()
            .with_fill(3)
            .with_light(Point3::new(0.0, 0.0, -100.0));
        let (lines, _, _) = run(triangle(), params);
        assert!(lines.iter().all(|l| l.color.red == AMBIENT_FLOOR));
    }

    #[test]
    fn test_invalid_params() {
        let mut lines: Vec<DebugLine> = Vec::new();
        let mut chat: Vec<String> = Vec::new();
        let params = RenderParams::new(Point3::origin(), 0.0);
        assert!(RenderJob::new(triangle(), params, &mut lines, &mut chat).is_err());
        assert!(RenderParams::default().with_fill(0).validate().is_err());
        assert!(RenderParams::default()
            .with_light(Point3::new(f32::NAN, 0.0, 0.0))
            .validate()
            .is_err());
    }
}
