//! PLY (Polygon File Format) reader.
//!
//! PLY has no object structure, so every PLY upload is a single mesh.
//! ASCII, binary little-endian and binary big-endian are all handled by
//! `ply-rs`.
//!
//! # Required Properties
//!
//! - Vertex positions (`x`, `y`, `z`)
//! - Face indices (`vertex_indices` or `vertex_index`), optional: a
//!   point-only file still has a bounding box

use std::io::{BufRead, BufReader};
use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{IoError, IoResult};

/// Load a mesh from a PLY file.
///
/// Polygonal faces are fan-triangulated.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The header or payload is not valid PLY
/// - A vertex lacks one of `x`, `y`, `z`
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let file = crate::open_file(path.as_ref())?;
    read_ply(&mut BufReader::new(file))
}

fn read_ply<R: BufRead>(reader: &mut R) -> IoResult<IndexedMesh> {
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut mesh = IndexedMesh::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        mesh.vertices.reserve(vertex_elements.len());
        for (index, element) in vertex_elements.iter().enumerate() {
            let coord = |key: &str| {
                scalar_property(element, key).ok_or_else(|| {
                    IoError::invalid_content(format!("vertex {index} has no numeric '{key}'"))
                })
            };
            mesh.vertices
                .push(Vertex::from_coords(coord("x")?, coord("y")?, coord("z")?));
        }
    }

    if let Some(face_elements) = payload.get("face") {
        mesh.faces.reserve(face_elements.len());
        for element in face_elements {
            #[allow(clippy::cast_possible_truncation)]
            let indices: Vec<u32> = index_list(element).into_iter().map(|i| i as u32).collect();
            mesh.push_polygon(&indices);
        }
    }

    Ok(mesh)
}

/// Read a numeric scalar property as `f64`, whatever its stored width.
fn scalar_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(f64::from(*v)),
        Property::UInt(v) => Some(f64::from(*v)),
        Property::Short(v) => Some(f64::from(*v)),
        Property::UShort(v) => Some(f64::from(*v)),
        Property::Char(v) => Some(f64::from(*v)),
        Property::UChar(v) => Some(f64::from(*v)),
        _ => None,
    }
}

/// Extract the vertex index list from a face element.
#[allow(clippy::cast_sign_loss)]
fn index_list(element: &DefaultElement) -> Vec<usize> {
    for key in ["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(key) {
            return match prop {
                Property::ListInt(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUInt(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListShort(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListChar(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUChar(v) => v.iter().map(|&i| i as usize).collect(),
                _ => continue,
            };
        }
    }
    Vec::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshBounds;

    const QUAD_PLY: &str = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
800 0 0
800 30 600
0 30 600
4 0 1 2 3
";

    #[test]
    fn ascii_quad_is_triangulated() {
        let mesh = read_ply(&mut QUAD_PLY.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);

        let size = mesh.bounds().size();
        assert_relative_eq!(size.x, 800.0);
        assert_relative_eq!(size.y, 30.0);
        assert_relative_eq!(size.z, 600.0);
    }

    #[test]
    fn point_cloud_without_faces() {
        let ply = "ply
format ascii 1.0
element vertex 2
property double x
property double y
property double z
end_header
0 0 0
1.2 0.9 0.4
";
        let mesh = read_ply(&mut ply.as_bytes()).unwrap();
        assert_eq!(mesh.face_count(), 0);
        assert_relative_eq!(mesh.bounds().size().x, 1.2);
    }

    #[test]
    fn missing_coordinate_is_an_error() {
        let ply = "ply
format ascii 1.0
element vertex 1
property float x
property float y
end_header
0 0
";
        let err = read_ply(&mut ply.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("'z'"));
    }

    #[test]
    fn invalid_header() {
        let err = read_ply(&mut "not a ply file".as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }
}
