//! STL (Stereolithography) reader.
//!
//! STL carries no object structure, so every STL upload is a single mesh.
//!
//! # Format Detection
//!
//! - ASCII files start with "solid" (after optional whitespace)
//! - Binary files have an 80-byte header followed by a little-endian face count
//!
//! Some binary exporters also write "solid" into the header. Such a file is
//! still read as binary when the header holds a NUL byte, or when its length
//! is exactly `84 + 50 × face count`.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file, ASCII or binary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid STL.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let file = crate::open_file(path.as_ref())?;
    let len = file.metadata()?.len();
    read_stl(BufReader::new(file), Some(len))
}

/// Parse STL from any buffered reader; `total_len` is the full input size
/// when known.
fn read_stl<R: BufRead>(mut reader: R, total_len: Option<u64>) -> IoResult<IndexedMesh> {
    let mut header = Vec::with_capacity(HEADER_SIZE + 4);
    (&mut reader)
        .take((HEADER_SIZE + 4) as u64)
        .read_to_end(&mut header)?;

    if header.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    let head_text = String::from_utf8_lossy(&header[..header.len().min(HEADER_SIZE)]);
    if head_text.trim_start().starts_with("solid") && !is_binary_stl(&header, total_len) {
        read_stl_ascii(header.as_slice().chain(reader))
    } else {
        read_stl_binary(&header, reader)
    }
}

/// Whether a header starting with "solid" still belongs to a binary file.
fn is_binary_stl(header: &[u8], total_len: Option<u64>) -> bool {
    if header.len() < HEADER_SIZE + 4 {
        return false;
    }
    if header[..HEADER_SIZE].contains(&0) {
        return true;
    }
    let expected = (HEADER_SIZE + 4) as u64 + u64::from(face_count(header)) * TRIANGLE_SIZE as u64;
    total_len == Some(expected)
}

/// Little-endian face count following the 80-byte header.
fn face_count(header: &[u8]) -> u32 {
    u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ])
}

fn read_stl_binary<R: Read>(header: &[u8], mut reader: R) -> IoResult<IndexedMesh> {
    if header.len() < HEADER_SIZE + 4 {
        return Err(IoError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: header.len(),
        });
    }

    let face_count = face_count(header);

    // Cap the reservation: a corrupt count must not allocate gigabytes up front.
    let reserve = (face_count as usize).min(1 << 20);
    let mut mesh = IndexedMesh::with_capacity(reserve * 3, reserve);

    let mut triangle_buf = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        if reader.read_exact(&mut triangle_buf).is_err() {
            return Err(IoError::InvalidFaceCount {
                expected: face_count,
                got: i,
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let base_idx = mesh.vertices.len() as u32;
        mesh.vertices.push(read_vertex(&triangle_buf[12..24]));
        mesh.vertices.push(read_vertex(&triangle_buf[24..36]));
        mesh.vertices.push(read_vertex(&triangle_buf[36..48]));
        mesh.faces.push([base_idx, base_idx + 1, base_idx + 2]);
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 little-endian f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

fn read_stl_ascii<R: Read>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_loop = false;
    let mut corners: Vec<Vertex> = Vec::with_capacity(3);

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "vertex line with {} coordinates",
                        coords.len()
                    )));
                }
                corners.push(Vertex::from_coords(
                    coords[0].parse()?,
                    coords[1].parse()?,
                    coords[2].parse()?,
                ));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if corners.len() == 3 {
                    #[allow(clippy::cast_possible_truncation)]
                    let base_idx = mesh.vertices.len() as u32;
                    mesh.vertices.append(&mut corners);
                    mesh.faces.push([base_idx, base_idx + 1, base_idx + 2]);
                }
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(mesh)
}
