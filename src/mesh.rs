//! `TriangleMesh` struct: an indexed triangle surface around the origin

use crate::errors::GeodomeError;
use crate::float_types::{Real, tolerance};
use crate::triangulated::Triangulated3D;
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

/// A triangle given as three indices into the vertex array.
///
/// Read in order, the indices are counter-clockwise when viewed from outside
/// the sphere.
pub type Face = [usize; 3];

/// An indexed triangle mesh.
///
/// A vertex is identified by its position in `vertices`; that index is
/// stable once assigned and is what faces refer to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Ordered vertex positions
    pub vertices: Vec<Point3<Real>>,

    /// Ordered faces, each a triple of vertex indices
    pub faces: Vec<Face>,
}

impl TriangleMesh {
    /// Build a mesh from raw parts, rejecting faces that reference
    /// vertices past the end of `vertices`.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<Face>) -> Result<Self, GeodomeError> {
        let mesh = TriangleMesh { vertices, faces };
        mesh.check_indices()?;
        Ok(mesh)
    }

    /// Build a mesh from plain coordinate triples.
    pub fn from_arrays(points: &[[Real; 3]], faces: &[Face]) -> Result<Self, GeodomeError> {
        let vertices = points
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        Self::new(vertices, faces.to_vec())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::with_capacity(self.faces.len() * 3 / 2);
        for face in &self.faces {
            for (a, b) in face_edges(face) {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }

    /// Euler characteristic χ = V − E + F (2 for a closed sphere-like mesh).
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Positions of the three corners of `face`, or `None` when it references
    /// a vertex past the end of `vertices`.
    #[inline]
    pub fn corners(&self, face: &Face) -> Option<[Point3<Real>; 3]> {
        face_corners(&self.vertices, face)
    }

    /// Iterate the faces as position triples. Faces with out-of-range
    /// indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.faces.iter().filter_map(|f| self.corners(f))
    }

    /// Unit normal of every face, `(v1 - v0) × (v2 - v0)` normalized.
    /// Degenerate faces and faces with out-of-range indices get a zero vector,
    /// so the result stays aligned with `faces`.
    ///
    /// On a sphere mesh the vertex position already is its normal, so this is
    /// only needed for faceted output such as STL.
    pub fn face_normals(&self) -> Vec<Vector3<Real>> {
        self.faces
            .iter()
            .map(|f| match self.corners(f) {
                Some([a, b, c]) => {
                    let n = (b - a).cross(&(c - a));
                    n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
                },
                None => Vector3::zeros(),
            })
            .collect()
    }

    /// Scalar triple product `v0 · (v1 × v2)` of a face: six times the signed
    /// volume of the tetrahedron it spans with the origin. Positive means the
    /// face is counter-clockwise seen from outside. `None` when the face
    /// references a missing vertex.
    pub fn signed_volume(&self, face: &Face) -> Option<Real> {
        let [a, b, c] = self.corners(face)?;
        Some(a.coords.dot(&b.coords.cross(&c.coords)))
    }

    /// `true` when every face winds counter-clockwise seen from outside.
    /// A face with an out-of-range index counts as not counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.faces
            .iter()
            .all(|f| self.signed_volume(f).is_some_and(|v| v > 0.0))
    }

    /// Re-orient every face whose normal points toward the origin by swapping
    /// its first two indices. Faces with out-of-range indices are left as
    /// they are.
    pub fn force_ccw(&mut self) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            let Some([a, b, c]) = face_corners(vertices, face) else {
                continue;
            };
            let normal = (b - a).cross(&(c - a));
            if normal.dot(&a.coords) < 0.0 {
                face.swap(0, 1);
            }
        }
    }

    /// Largest deviation of any vertex from the unit sphere, `| |v|² − 1 |`.
    pub fn max_radius_error(&self) -> Real {
        self.vertices
            .iter()
            .map(|v| (v.coords.norm_squared() - 1.0).abs())
            .fold(0.0, Real::max)
    }

    /// `true` when every vertex lies on the unit sphere within [`tolerance`].
    pub fn is_on_unit_sphere(&self) -> bool {
        self.max_radius_error() < tolerance()
    }

    /// Fail with [`GeodomeError::IndexOutOfRange`] on the first face index
    /// that is not a valid vertex index.
    pub fn check_indices(&self) -> Result<(), GeodomeError> {
        let len = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= len) {
                return Err(GeodomeError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Fail with [`GeodomeError::DegenerateInput`] on the first vertex that is
    /// non-finite or too close to the origin to be re-projected.
    pub fn check_projectable(&self) -> Result<(), GeodomeError> {
        let eps = tolerance();
        for (index, v) in self.vertices.iter().enumerate() {
            let norm = v.coords.norm();
            if !norm.is_finite() || norm <= eps {
                return Err(GeodomeError::DegenerateInput {
                    index: Some(index),
                    position: *v,
                });
            }
        }
        Ok(())
    }
}

/// Corner positions of `face` looked up in `vertices`.
#[inline]
pub(crate) fn face_corners(vertices: &[Point3<Real>], face: &Face) -> Option<[Point3<Real>; 3]> {
    Some([
        *vertices.get(face[0])?,
        *vertices.get(face[1])?,
        *vertices.get(face[2])?,
    ])
}

/// The three directed edges `(i,j)`, `(j,k)`, `(k,i)` of a face.
#[inline]
pub(crate) fn face_edges(face: &Face) -> [(usize, usize); 3] {
    [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
}

/// So all triangle-based IO backends work on meshes.
impl Triangulated3D for TriangleMesh {
    fn vertex_positions(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    fn visit_faces<F>(&self, mut f: F)
    where
        F: FnMut(&Face),
    {
        for face in &self.faces {
            f(face);
        }
    }
}
