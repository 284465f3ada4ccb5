//! Manifold validation and topology analysis for `TriangleMesh`

use crate::mesh::{TriangleMesh, face_edges};
use hashbrown::{HashMap, HashSet};

/// **Mathematical Foundation: Manifold Topology Validation**
///
/// Edges are keyed by vertex index only; positions are never compared.
///
/// ## **Properties Checked**
/// 1. **Edge Manifold**: each edge shared by exactly 2 faces
/// 2. **Orientation Consistency**: each directed edge used by at most one
///    face, i.e. neighbours traverse their shared edge in opposite directions
/// 3. **Isolated Vertices**: vertices no face references
/// 4. **Euler Characteristic**: χ = V − E + F, 2 for a closed sphere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifoldAnalysis {
    /// Whether the mesh is a closed, consistently oriented 2-manifold
    pub is_manifold: bool,
    /// Number of boundary edges (0 for closed manifolds)
    pub boundary_edges: usize,
    /// Number of non-manifold edges (shared by >2 faces)
    pub non_manifold_edges: usize,
    /// Number of isolated vertices
    pub isolated_vertices: usize,
    /// Whether all faces have consistent orientation
    pub consistent_orientation: bool,
    /// Euler characteristic (V - E + F)
    pub euler_characteristic: i64,
}

impl TriangleMesh {
    /// Analyze edge multiplicity, winding consistency and Euler characteristic.
    ///
    /// Faces referencing a vertex past the end of `vertices` are left out of
    /// the edge statistics, and the mesh is reported as non-manifold.
    pub fn analyze_manifold(&self) -> ManifoldAnalysis {
        let mut edge_faces: HashMap<(usize, usize), usize> = HashMap::new();
        let mut directed: HashSet<(usize, usize)> = HashSet::new();
        let mut referenced: HashSet<usize> = HashSet::new();
        let mut consistent_orientation = true;
        let mut dangling_faces = 0;

        let len = self.vertices.len();
        for face in &self.faces {
            if face.iter().any(|&i| i >= len) {
                dangling_faces += 1;
                continue;
            }
            for (a, b) in face_edges(face) {
                // Canonical edge representation (smaller index first)
                *edge_faces.entry((a.min(b), a.max(b))).or_default() += 1;
                if !directed.insert((a, b)) {
                    consistent_orientation = false;
                }
                referenced.insert(a);
            }
        }

        let mut boundary_edges = 0;
        let mut non_manifold_edges = 0;
        for &count in edge_faces.values() {
            match count {
                1 => boundary_edges += 1,
                2 => {},
                _ => non_manifold_edges += 1,
            }
        }

        let isolated_vertices = (0..len).filter(|i| !referenced.contains(i)).count();
        let euler_characteristic = len as i64 - edge_faces.len() as i64
            + (self.faces.len() - dangling_faces) as i64;

        ManifoldAnalysis {
            is_manifold: dangling_faces == 0
                && boundary_edges == 0
                && non_manifold_edges == 0
                && isolated_vertices == 0
                && consistent_orientation,
            boundary_edges,
            non_manifold_edges,
            isolated_vertices,
            consistent_orientation,
            euler_characteristic,
        }
    }
}
