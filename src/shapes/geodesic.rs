//! Geodesic dome: an icosahedron subdivided `levels` times

use crate::errors::GeodomeError;
use crate::mesh::TriangleMesh;

/// Entry point for geodesic sphere meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeodesicDome;

impl GeodesicDome {
    /// Build the icosahedron and tessellate it `levels` times.
    ///
    /// ```
    /// # use geodome::GeodesicDome;
    /// let dome = GeodesicDome::new(2)?;
    /// assert_eq!(dome.vertex_count(), 162);
    /// assert_eq!(dome.face_count(), 320);
    /// # Ok::<(), geodome::errors::GeodomeError>(())
    /// ```
    pub fn new(levels: i32) -> Result<TriangleMesh, GeodomeError> {
        if levels < 0 {
            return Err(GeodomeError::InvalidArgument { levels });
        }
        TriangleMesh::icosahedron().tessellate(levels)
    }

    /// `(V, F, E)` after `levels` rounds: `V = 10·4ⁿ + 2`, `F = 20·4ⁿ`,
    /// `E = 30·4ⁿ`. `None` once a count no longer fits in `usize`.
    pub fn expected_counts(levels: u32) -> Option<(usize, usize, usize)> {
        let scale = 4usize.checked_pow(levels)?;
        let vertices = scale.checked_mul(10)?.checked_add(2)?;
        Some((vertices, scale.checked_mul(20)?, scale.checked_mul(30)?))
    }
}

impl TriangleMesh {
    /// Geodesic sphere at subdivision level `levels`, see [`GeodesicDome::new`].
    pub fn geodesic_sphere(levels: i32) -> Result<TriangleMesh, GeodomeError> {
        GeodesicDome::new(levels)
    }
}
