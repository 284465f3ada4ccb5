//! Geodesic subdivision: split every triangle into four and push the new
//! vertices onto the unit sphere.

use crate::errors::GeodomeError;
use crate::float_types::{Real, snap, tolerance};
use crate::mesh::{Face, TriangleMesh, face_edges};
use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::debug;

/// An undirected edge, stored with the smaller vertex index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    #[inline]
    pub const fn new(a: usize, b: usize) -> Self {
        if a < b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }

    #[inline]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }
}

/// Round-local map from an edge to the index of its (already projected)
/// midpoint vertex. Appends to the vertex array it wraps.
struct MidpointCache<'a> {
    vertices: &'a mut Vec<Point3<Real>>,
    midpoints: HashMap<EdgeKey, usize>,
}

impl<'a> MidpointCache<'a> {
    fn new(vertices: &'a mut Vec<Point3<Real>>, edge_hint: usize) -> Self {
        MidpointCache {
            vertices,
            midpoints: HashMap::with_capacity(edge_hint),
        }
    }

    /// Index of the midpoint of edge `(a, b)`, creating and projecting it on
    /// first use.
    fn get_or_insert(&mut self, a: usize, b: usize) -> Result<usize, GeodomeError> {
        let key = EdgeKey::new(a, b);
        if let Some(&index) = self.midpoints.get(&key) {
            return Ok(index);
        }

        let position = spherical_midpoint(&self.vertices[a], &self.vertices[b])?;
        let index = self.vertices.len();
        self.vertices.push(position);
        self.midpoints.insert(key, index);
        Ok(index)
    }
}

/// Midpoint of `p` and `q` re-projected onto the unit sphere.
///
/// Fails when the two points are antipodal, since their sum has no direction.
pub fn spherical_midpoint(p: &Point3<Real>, q: &Point3<Real>) -> Result<Point3<Real>, GeodomeError> {
    let sum = p.coords + q.coords;
    let norm = sum.norm();
    if !norm.is_finite() || norm <= tolerance() {
        return Err(GeodomeError::DegenerateInput {
            index: None,
            position: Point3::from(sum * 0.5),
        });
    }
    let unit = sum / norm;
    Ok(Point3::new(snap(unit.x), snap(unit.y), snap(unit.z)))
}

/// **Mathematical Foundation: Geodesic 4-way Subdivision**
///
/// Splits every face `(i, j, k)` into four using the midpoints `mij`, `mjk`,
/// `mki` of its edges:
/// ```text
///            k
///           / \
///        mki---mjk
///         / \ / \
///        i---mij---j
/// ```
/// emitted as `(i, mij, mki)`, `(j, mjk, mij)`, `(k, mki, mjk)` and the
/// centre `(mij, mjk, mki)`. Each is counter-clockwise if the input face is.
///
/// ## **Vertex Numbering**
/// Input vertices keep their indices. Midpoints are appended in the order
/// their edges are first met walking the faces with the lower endpoint first;
/// on a closed, consistently wound mesh each edge is seen that way exactly
/// once. A second walk picks up edges only seen high-to-low (boundaries of
/// open meshes) while emitting faces.
///
/// ## **Counts**
/// One midpoint per edge, so `V' = V + E` and `F' = 4F`.
///
/// # Errors
/// - [`GeodomeError::IndexOutOfRange`] if a face references a missing vertex
/// - [`GeodomeError::DegenerateInput`] if a vertex (or an edge midpoint) has
///   zero length and cannot be projected
pub fn subdivide(mesh: &TriangleMesh) -> Result<TriangleMesh, GeodomeError> {
    mesh.check_indices()?;
    mesh.check_projectable()?;

    let edge_hint = mesh.faces.len() * 3 / 2;
    let mut vertices = Vec::with_capacity(mesh.vertices.len() + edge_hint);
    vertices.extend_from_slice(&mesh.vertices);
    let mut faces: Vec<Face> = Vec::with_capacity(mesh.faces.len() * 4);

    let mut cache = MidpointCache::new(&mut vertices, edge_hint);

    for face in &mesh.faces {
        for (a, b) in face_edges(face) {
            if a < b {
                cache.get_or_insert(a, b)?;
            }
        }
    }

    for &[i, j, k] in &mesh.faces {
        let mij = cache.get_or_insert(i, j)?;
        let mjk = cache.get_or_insert(j, k)?;
        let mki = cache.get_or_insert(k, i)?;

        faces.push([i, mij, mki]);
        faces.push([j, mjk, mij]);
        faces.push([k, mki, mjk]);
        faces.push([mij, mjk, mki]);
    }
    drop(cache);

    Ok(TriangleMesh { vertices, faces })
}

/// Apply [`subdivide`] `levels` times. `levels == 0` returns an equal copy.
///
/// # Errors
/// [`GeodomeError::InvalidArgument`] for a negative `levels`, checked before
/// any work is done; otherwise whatever [`subdivide`] reports.
pub fn tessellate(mesh: &TriangleMesh, levels: i32) -> Result<TriangleMesh, GeodomeError> {
    if levels < 0 {
        return Err(GeodomeError::InvalidArgument { levels });
    }

    debug!(
        "Tessellating mesh: {} faces, {} vertices, {} levels",
        mesh.faces.len(),
        mesh.vertices.len(),
        levels
    );

    let mut current = mesh.clone();
    for level in 0..levels {
        current = subdivide(&current)?;
        debug!(
            "Level {}: {} faces, {} vertices",
            level + 1,
            current.faces.len(),
            current.vertices.len()
        );
    }
    Ok(current)
}

impl TriangleMesh {
    /// One round of geodesic subdivision, see [`subdivide`].
    pub fn subdivide(&self) -> Result<TriangleMesh, GeodomeError> {
        subdivide(self)
    }

    /// `levels` rounds of geodesic subdivision, see [`tessellate`].
    pub fn tessellate(&self, levels: i32) -> Result<TriangleMesh, GeodomeError> {
        tessellate(self, levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn octant() -> TriangleMesh {
        TriangleMesh::from_arrays(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            &[[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new(3, 7), EdgeKey::new(7, 3));
        assert_eq!(EdgeKey::new(7, 3).endpoints(), (3, 7));
    }

    #[test]
    fn test_single_face_split() {
        let mesh = octant().subdivide().unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(&mesh.vertices[..3], &octant().vertices[..]);
        assert_eq!(mesh.faces, vec![[0, 3, 5], [1, 4, 3], [2, 5, 4], [3, 4, 5]]);
        assert!(mesh.is_ccw());
    }

    #[test]
    fn test_midpoints_are_projected() {
        let mesh = octant().subdivide().unwrap();
        let h = 0.5_f64.sqrt();
        assert_relative_eq!(mesh.vertices[3], Point3::new(h, h, 0.0), epsilon = 1e-15);
        for v in &mesh.vertices {
            assert_relative_eq!(v.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shared_edge_creates_one_midpoint() {
        let mesh = TriangleMesh::from_arrays(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, -1.0]],
            &[[0, 1, 2], [1, 0, 3]],
        )
        .unwrap();
        let out = mesh.subdivide().unwrap();
        // 4 vertices + 5 distinct edges
        assert_eq!(out.vertex_count(), 9);
        assert_eq!(out.face_count(), 8);
        assert!(out.is_ccw());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let ico = TriangleMesh::icosahedron();
        let copy = ico.clone();
        let _ = ico.subdivide().unwrap();
        assert_eq!(ico, copy);
    }

    #[test]
    fn test_tessellate_zero_is_identity() {
        let ico = TriangleMesh::icosahedron();
        assert_eq!(ico.tessellate(0).unwrap(), ico);
    }

    #[test]
    fn test_tessellate_negative_levels() {
        let ico = TriangleMesh::icosahedron();
        assert_eq!(
            ico.tessellate(-1),
            Err(GeodomeError::InvalidArgument { levels: -1 })
        );
    }

    #[test]
    fn test_zero_vertex_is_rejected() {
        let mesh = TriangleMesh::from_arrays(
            &[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            &[[0, 1, 2]],
        )
        .unwrap();
        assert!(matches!(
            mesh.subdivide(),
            Err(GeodomeError::DegenerateInput { index: Some(1), .. })
        ));
    }

    #[test]
    fn test_antipodal_edge_is_rejected() {
        let mesh = TriangleMesh::from_arrays(
            &[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            &[[0, 1, 2]],
        )
        .unwrap();
        assert!(matches!(
            mesh.subdivide(),
            Err(GeodomeError::DegenerateInput { index: None, .. })
        ));
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let mesh = TriangleMesh {
            vertices: octant().vertices,
            faces: vec![[0, 1, 5]],
        };
        assert!(matches!(
            subdivide(&mesh),
            Err(GeodomeError::IndexOutOfRange { index: 5, .. })
        ));
    }
}
