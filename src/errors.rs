//! Mesh construction and subdivision errors

use crate::float_types::Real;
use nalgebra::Point3;

/// All the possible failures while building or refining a sphere mesh
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeodomeError {
    /// (InvalidArgument) A negative subdivision level was requested
    #[error("(InvalidArgument) Subdivision level must be non-negative, got {levels}")]
    InvalidArgument { levels: i32 },

    /// (DegenerateInput) A position with (near) zero magnitude cannot be
    /// projected onto the unit sphere. `index` is the offending input vertex,
    /// or `None` when the zero vector is a midpoint of two antipodal vertices.
    #[error("(DegenerateInput) Cannot project {position} onto the unit sphere{}", vertex_suffix(.index))]
    DegenerateInput {
        index: Option<usize>,
        position: Point3<Real>,
    },

    /// (IndexOutOfRange) A face references a vertex that does not exist
    #[error("(IndexOutOfRange) Face {face} references vertex {index}, but only {len} vertices exist")]
    IndexOutOfRange { face: usize, index: usize, len: usize },

    /// (TooFewPoints) Not enough points to span a closed hull
    #[error("(TooFewPoints) At least 5 points are needed for a closed sphere mesh, got {0}")]
    TooFewPoints(usize),

    /// (ConvexHull) The hull backend rejected the point set
    #[error("(ConvexHull) Convex hull computation failed: {0}")]
    ConvexHull(String),
}

fn vertex_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (vertex {i})"),
        None => String::new(),
    }
}
