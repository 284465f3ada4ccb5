#![doc = " PLY (Stanford polygon) file format support"]
#![doc = ""]
#![doc = " ASCII export and import of indexed triangle meshes through `ply-rs`:"]
#![doc = " a `vertex` element with `x y z` followed by a `face` element whose"]
#![doc = " `vertex_indices` list is prefixed by its length (always 3 here)."]

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::{Face, TriangleMesh};
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use std::io::Write;

/// Assemble the `ply-rs` document for `shape`.
///
/// Coordinates are stored as `double` so a written mesh reads back with the
/// same vertex positions.
fn build_ply<T: Triangulated3D>(shape: &T) -> Ply<DefaultElement> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Double),
        ));
    }
    vertex_def.count = shape.vertex_positions().len();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::UInt),
    ));

    let positions = shape.vertex_positions();
    let mut vertex_elements = Vec::with_capacity(positions.len());
    for p in positions {
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Double(p.x));
        element.insert("y".to_string(), Property::Double(p.y));
        element.insert("z".to_string(), Property::Double(p.z));
        vertex_elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let mut face_elements = Vec::new();
    shape.visit_faces(|&[i, j, k]| {
        let mut element = DefaultElement::new();
        #[allow(clippy::cast_possible_truncation)]
        let indices = vec![i as u32, j as u32, k as u32];
        element.insert("vertex_indices".to_string(), Property::ListUInt(indices));
        face_elements.push(element);
    });
    face_def.count = face_elements.len();
    ply.header.elements.add(face_def);
    ply.payload.insert("face".to_string(), face_elements);

    ply
}

/// Write `shape` as ASCII PLY into `writer`.
pub fn write_ply_ascii<T: Triangulated3D, W: Write>(
    shape: &T,
    writer: &mut W,
) -> std::io::Result<()> {
    let mut ply = build_ply(shape);
    Writer::new().write_ply(writer, &mut ply)?;
    Ok(())
}

/// Convert `shape` to an **ASCII PLY** string.
///
/// ```rust
/// # use geodome::{TriangleMesh, io::ply::to_ply_ascii};
/// let ico = TriangleMesh::icosahedron();
/// let ply = to_ply_ascii(&ico);
/// assert!(ply.starts_with("ply\nformat ascii 1.0\n"));
/// assert!(ply.contains("element vertex 12\n"));
/// assert!(ply.contains("element face 20\n"));
/// ```
pub fn to_ply_ascii<T: Triangulated3D>(shape: &T) -> String {
    let mut bytes = Vec::new();
    // Writing into a Vec<u8> cannot fail
    let _ = write_ply_ascii(shape, &mut bytes);
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a PLY document holding `x y z` vertices and triangle faces.
/// Extra vertex properties are ignored; faces with other than 3 corners are
/// rejected.
pub fn from_ply_ascii(text: &str) -> Result<TriangleMesh, IoError> {
    let parser = Parser::<DefaultElement>::new();
    let mut reader = text.as_bytes();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::MalformedInput(format!("failed to parse PLY header: {e}")))?;
    if !matches!(header.encoding, Encoding::Ascii) {
        return Err(IoError::Unimplemented("binary PLY input".to_string()));
    }

    // ASCII PLY stores one element per line, so a header promising more
    // elements than there are lines left is malformed.
    let remaining_lines = reader.split(|&b| b == b'\n').count();
    let mut declared: usize = 0;
    for element in header.elements.values() {
        declared = declared.saturating_add(element.count);
    }
    if declared > remaining_lines {
        return Err(IoError::MalformedInput(format!(
            "header declares {declared} elements but only {remaining_lines} lines follow"
        )));
    }

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::MalformedInput(format!("failed to read PLY payload: {e}")))?;

    let mut vertices = Vec::new();
    if let Some(vertex_elements) = payload.get("vertex") {
        for (n, element) in vertex_elements.iter().enumerate() {
            let coord = |key: &str| {
                get_real_property(element, key)
                    .ok_or_else(|| IoError::MalformedInput(format!("vertex {n} has no `{key}`")))
            };
            vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
        }
    }

    let mut faces: Vec<Face> = Vec::new();
    if let Some(face_elements) = payload.get("face") {
        for (n, element) in face_elements.iter().enumerate() {
            match get_index_list(element).as_deref() {
                Some(&[i, j, k]) => faces.push([i, j, k]),
                Some(_) => {
                    return Err(IoError::MalformedInput(format!("face {n} is not a triangle")));
                },
                None => {
                    return Err(IoError::MalformedInput(format!(
                        "face {n} has no valid `vertex_indices`"
                    )));
                },
            }
        }
    }

    TriangleMesh::new(vertices, faces).map_err(|e| IoError::MalformedInput(e.to_string()))
}

/// Extract a float property from a PLY element.
fn get_real_property(element: &DefaultElement, key: &str) -> Option<Real> {
    match element.get(key)? {
        Property::Float(v) => Some(Real::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

/// Extract the vertex index list of a face element. Negative indices make
/// the list invalid.
fn get_index_list(element: &DefaultElement) -> Option<Vec<usize>> {
    let prop = ["vertex_indices", "vertex_index"]
        .iter()
        .find_map(|key| element.get(*key))?;
    match prop {
        Property::ListInt(v) => v.iter().map(|&i| usize::try_from(i).ok()).collect(),
        Property::ListUInt(v) => v.iter().map(|&i| usize::try_from(i).ok()).collect(),
        Property::ListShort(v) => v.iter().map(|&i| usize::try_from(i).ok()).collect(),
        Property::ListUShort(v) => Some(v.iter().map(|&i| usize::from(i)).collect()),
        Property::ListChar(v) => v.iter().map(|&i| usize::try_from(i).ok()).collect(),
        Property::ListUChar(v) => Some(v.iter().map(|&i| usize::from(i)).collect()),
        _ => None,
    }
}

impl TriangleMesh {
    pub fn to_ply_ascii(&self) -> String {
        self::to_ply_ascii(self)
    }

    pub fn write_ply<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self::write_ply_ascii(self, writer)
    }

    pub fn from_ply_ascii(text: &str) -> Result<TriangleMesh, IoError> {
        self::from_ply_ascii(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ply_layout() {
        let mesh = TriangleMesh::from_arrays(
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            &[[0, 1, 2]],
        )
        .unwrap();
        let ply = mesh.to_ply_ascii();
        let lines: Vec<&str> = ply.lines().collect();

        assert_eq!(lines[0], "ply");
        assert_eq!(lines[1], "format ascii 1.0");
        assert!(lines.contains(&"element vertex 3"));
        assert!(lines.contains(&"property double x"));
        assert!(lines.contains(&"element face 1"));
        assert!(lines.contains(&"property list uchar uint vertex_indices"));

        let end = lines.iter().position(|l| *l == "end_header").unwrap();
        assert_eq!(lines.len(), end + 1 + 3 + 1);
        assert_eq!(lines[end + 4].split_whitespace().collect::<Vec<_>>(), ["3", "0", "1", "2"]);
    }

    #[test]
    fn test_ply_reads_back() {
        let dome = TriangleMesh::icosahedron().subdivide().unwrap();
        let parsed = TriangleMesh::from_ply_ascii(&dome.to_ply_ascii()).unwrap();
        assert_eq!(parsed.faces, dome.faces);
        assert_eq!(parsed.vertex_count(), dome.vertex_count());
        for (a, b) in parsed.vertices.iter().zip(&dome.vertices) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_write_ply_matches_string() {
        let ico = TriangleMesh::icosahedron();
        let mut buf = Vec::new();
        ico.write_ply(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ico.to_ply_ascii());
    }

    #[test]
    fn test_reads_float_vertices_and_int_indices() {
        let text = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\n\
                    property float y\nproperty float z\nelement face 1\n\
                    property list uchar int vertex_indices\nend_header\n\
                    1 0 0\n0 1 0\n0 0 1\n3 0 1 2\n";
        let mesh = from_ply_ascii(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertices[2], Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_reject_quads_and_garbage() {
        let quad = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\n\
                    property float y\nproperty float z\nelement face 1\n\
                    property list uchar int vertex_indices\nend_header\n\
                    0 0 1\n0 1 0\n1 0 0\n0 0 -1\n4 0 1 2 3\n";
        assert!(matches!(from_ply_ascii(quad), Err(IoError::MalformedInput(_))));

        assert!(matches!(from_ply_ascii("obj"), Err(IoError::MalformedInput(_))));
    }

    #[test]
    fn test_binary_input_is_unimplemented() {
        let text = "ply\nformat binary_little_endian 1.0\nelement vertex 0\n\
                    property float x\nproperty float y\nproperty float z\nend_header\n";
        assert!(matches!(from_ply_ascii(text), Err(IoError::Unimplemented(_))));
    }

    #[test]
    fn test_huge_element_count_is_rejected() {
        let text = "ply\nformat ascii 1.0\nelement vertex 18446744073709551615\n\
                    property float x\nproperty float y\nproperty float z\nend_header\n";
        assert!(matches!(from_ply_ascii(text), Err(IoError::MalformedInput(_))));
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let text = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\n\
                    property float y\nproperty float z\nelement face 1\n\
                    property list uchar int vertex_indices\nend_header\n\
                    1 0 0\n0 1 0\n0 0 1\n3 0 1 7\n";
        assert!(matches!(from_ply_ascii(text), Err(IoError::MalformedInput(_))));
    }
}
