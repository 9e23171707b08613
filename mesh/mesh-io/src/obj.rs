//! OBJ (Wavefront) reader.
//!
//! Every `o` or `g` statement opens a named object; geometry before the first
//! one belongs to an object called `default`. Reopening a name appends to the
//! earlier object. A file with several non-empty objects loads as a
//! [`Scene`], otherwise as a single mesh.
//!
//! Once a file has any face, objects without faces are dropped: exporters
//! often write every `v` line up front and put only faces in the groups.
//! A point-cloud file with no faces at all keeps each object's vertices.
//!
//! Only `v`, `f`, `o` and `g` are interpreted. Texture coordinates, normals,
//! materials and smoothing groups are skipped.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mesh_types::{IndexedMesh, LoadedModel, NamedGeometry, Scene, Vertex};

use crate::error::{IoError, IoResult};

const DEFAULT_OBJECT: &str = "default";

/// Load a model from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a coordinate does not parse,
/// or a face references a vertex that does not exist.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<LoadedModel> {
    let file = crate::open_file(path.as_ref())?;
    read_obj(BufReader::new(file))
}

/// Geometry collected for one named object while scanning the file.
#[derive(Debug)]
struct ObjectBuilder {
    name: String,
    /// Global indices of vertices declared while this object was open.
    declared: Vec<usize>,
    /// Faces as global vertex indices.
    faces: Vec<Vec<usize>>,
}

impl ObjectBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            declared: Vec::new(),
            faces: Vec::new(),
        }
    }

    fn is_blank(&self) -> bool {
        self.declared.is_empty() && self.faces.is_empty()
    }

    /// Build a compact mesh holding only this object's vertices.
    ///
    /// Faceless objects keep the vertices declared inside them; that only
    /// happens for files without any faces.
    #[allow(clippy::cast_possible_truncation)]
    fn build(self, positions: &[Vertex]) -> NamedGeometry {
        let mut mesh = IndexedMesh::new();
        if self.faces.is_empty() {
            mesh.vertices
                .extend(self.declared.iter().map(|&i| positions[i]));
            return NamedGeometry::new(self.name, mesh);
        }

        let mut local: HashMap<usize, u32> = HashMap::new();
        for face in &self.faces {
            let indices: Vec<u32> = face
                .iter()
                .map(|&global| {
                    *local.entry(global).or_insert_with(|| {
                        mesh.vertices.push(positions[global]);
                        (mesh.vertices.len() - 1) as u32
                    })
                })
                .collect();
            mesh.push_polygon(&indices);
        }
        NamedGeometry::new(self.name, mesh)
    }
}

fn read_obj<R: BufRead>(reader: R) -> IoResult<LoadedModel> {
    let mut positions: Vec<Vertex> = Vec::new();
    let mut objects: Vec<ObjectBuilder> = vec![ObjectBuilder::new(DEFAULT_OBJECT.to_string())];
    let mut by_name: HashMap<String, usize> = HashMap::from([(DEFAULT_OBJECT.to_string(), 0)]);
    let mut current = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default();
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let coords: Vec<&str> = parts.take(3).collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs 3 coordinates",
                        line_no + 1
                    )));
                }
                positions.push(Vertex::from_coords(
                    coords[0].parse()?,
                    coords[1].parse()?,
                    coords[2].parse()?,
                ));
                objects[current].declared.push(positions.len() - 1);
            }
            "f" => {
                let face = parts
                    .map(|token| resolve_index(token, positions.len(), line_no + 1))
                    .collect::<IoResult<Vec<usize>>>()?;
                objects[current].faces.push(face);
            }
            "o" | "g" => {
                let name = parts.collect::<Vec<_>>().join(" ");
                let name = if name.is_empty() {
                    DEFAULT_OBJECT.to_string()
                } else {
                    name
                };
                current = if let Some(&existing) = by_name.get(&name) {
                    existing
                } else if objects[current].is_blank() && current + 1 == objects.len() {
                    // `o cabinet` directly followed by `g body`: rename, don't split.
                    by_name.remove(&objects[current].name);
                    objects[current].name.clone_from(&name);
                    by_name.insert(name, current);
                    current
                } else {
                    objects.push(ObjectBuilder::new(name.clone()));
                    by_name.insert(name, objects.len() - 1);
                    objects.len() - 1
                };
            }
            _ => {}
        }
    }

    let has_faces = objects.iter().any(|o| !o.faces.is_empty());
    let mut scene: Scene = objects
        .into_iter()
        .filter(|o| if has_faces { !o.faces.is_empty() } else { !o.is_blank() })
        .map(|o| o.build(&positions))
        .collect();
    scene.retain_non_empty();
    Ok(LoadedModel::Scene(scene))
}

/// Resolve an OBJ face token (`7`, `7/1`, `7//3`, `-1`) to a 0-based index.
fn resolve_index(token: &str, vertex_count: usize, line_no: usize) -> IoResult<usize> {
    let raw: i64 = token.split('/').next().unwrap_or_default().parse()?;
    #[allow(clippy::cast_possible_wrap)]
    let count = vertex_count as i64;
    let resolved = match raw {
        r if r > 0 => r - 1,
        r if r < 0 => count + r,
        _ => -1,
    };
    if (0..count).contains(&resolved) {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        Ok(resolved as usize)
    } else {
        Err(IoError::invalid_content(format!(
            "line {line_no}: face index {raw} out of range (1..={vertex_count})"
        )))
    }
}
