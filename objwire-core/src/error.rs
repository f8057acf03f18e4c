//! Error types for mesh loading, geometry and rendering

use std::path::PathBuf;
use thiserror::Error;

/// What went wrong on a single OBJ line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected 3 vertex components, found {0}")]
    MissingComponent(usize),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid face index {0:?}")]
    InvalidIndex(String),

    #[error("face has no vertex indices")]
    EmptyFace,
}

/// Geometry problems scoped to one vertex or face.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("vertex index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange { index: usize, vertex_count: usize },

    #[error("cannot normalize a zero-length or non-finite vector")]
    DegenerateVector,

    #[error("vertex {index} has non-finite coordinates")]
    NonFinite { index: usize },
}

/// Errors returned by the OBJ loader.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("line {line}: {kind}")]
    Parse {
        line: usize,
        #[source]
        kind: ParseErrorKind,
    },

    #[error("invalid mesh: {0}")]
    Geometry(#[from] GeometryError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised before a render job starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid render parameters: {0}")]
    InvalidParams(String),
}

/// Errors raised while the host sets up a render.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Load(#[from] ObjError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type ObjResult<T> = std::result::Result<T, ObjError>;
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
