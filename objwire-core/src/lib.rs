//! objwire core library - OBJ wireframe rendering as debug lines
//!
//! Parses the `v`/`f` subset of Wavefront OBJ, shades every face from a
//! single point light and emits the result as colored line segments, one
//! face per cooperative step.

pub mod assets;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod math;
pub mod obj;
pub mod projection;
pub mod render;
pub mod scheduler;
pub mod shading;
pub mod sink;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, HostError, ObjError, ParseErrorKind, RenderError};
pub use geometry::{Color, DebugLine, Face, Mesh};
pub use host::{install_model_renderer, Host, ModelConfig, PlayerSpawned};
pub use obj::{load_mesh, load_mesh_with, LoadOptions, ParseMode};
pub use projection::{Camera, ProjectionMode};
pub use render::{FaceOutcome, RenderJob, RenderParams, RenderReport, RenderState, StepOutcome};
pub use scheduler::{Job, JobStatus, Scheduler};
pub use sink::{ChatLog, LineSink, SharedLineSink, StatusChannel};
pub use transform::{Placement, RotationState, Transform};
