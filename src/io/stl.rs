use crate::mesh::TriangleMesh;
use crate::triangulated::Triangulated3D;
use core2::io::Cursor;
use std::fmt::Write as _;

/// Export to ASCII STL
/// Convert `shape` to an **ASCII STL** string with the given `name`.
///
/// STL has no shared vertices, so every facet repeats its three positions
/// and carries its flat face normal.
///
/// ```rust
/// # use geodome::TriangleMesh;
/// let dome = TriangleMesh::icosahedron();
/// let text = dome.to_stl_ascii("dome");
/// assert!(text.starts_with("solid dome\n"));
/// assert_eq!(text.matches("facet normal").count(), 20);
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri, n| {
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in &tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Convert `shape` to a **binary STL** byte vector. The binary header has no
/// room for a name, so `_name` is accepted only for symmetry with
/// [`to_stl_ascii`].
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, _name: &str) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri, n| {
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl TriangleMesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }
}
