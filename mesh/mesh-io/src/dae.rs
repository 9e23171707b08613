//! COLLADA (`.dae`) reader.
//!
//! Each `<geometry>` in `<library_geometries>` becomes one named object. Only
//! vertex positions are read (the `<float_array>` referenced by the
//! `POSITION` input of `<vertices>`); primitives, materials, the visual scene
//! graph and `<unit>` are ignored, since downstream analysis only needs
//! per-object extents.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mesh_types::{IndexedMesh, LoadedModel, NamedGeometry, Scene, Vertex};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{IoError, IoResult};

/// Load a model from a COLLADA file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not well-formed XML, or
/// a position array does not hold whole `x y z` triples.
pub fn load_dae<P: AsRef<Path>>(path: P) -> IoResult<LoadedModel> {
    let file = crate::open_file(path.as_ref())?;
    read_dae(BufReader::new(file))
}

/// Per-`<geometry>` parse state.
#[derive(Debug, Default)]
struct GeometryBuilder {
    name: String,
    /// `<source id>` → contents of its `<float_array>`, in document order.
    arrays: Vec<(String, Vec<f64>)>,
    current_source: Option<String>,
    in_float_array: bool,
    in_vertices: bool,
    position_source: Option<String>,
}

impl GeometryBuilder {
    /// Pick the position array: the `POSITION` input if declared, else the
    /// first source whose id mentions "position", else the first source.
    fn finish(self) -> IoResult<NamedGeometry> {
        let by_id: HashMap<&str, &Vec<f64>> =
            self.arrays.iter().map(|(id, v)| (id.as_str(), v)).collect();

        let positions = self
            .position_source
            .as_deref()
            .and_then(|id| by_id.get(id).copied())
            .or_else(|| {
                self.arrays
                    .iter()
                    .find(|(id, _)| id.to_lowercase().contains("position"))
                    .map(|(_, v)| v)
            })
            .or_else(|| self.arrays.first().map(|(_, v)| v));

        let mut mesh = IndexedMesh::new();
        if let Some(values) = positions {
            if values.len() % 3 != 0 {
                return Err(IoError::invalid_content(format!(
                    "geometry '{}': position array has {} values, not a multiple of 3",
                    self.name,
                    values.len()
                )));
            }
            mesh.vertices = values
                .chunks_exact(3)
                .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
                .collect();
        }
        Ok(NamedGeometry::new(self.name, mesh))
    }
}

fn attribute(element: &BytesStart<'_>, key: &str) -> IoResult<Option<String>> {
    element
        .try_get_attribute(key)
        .map_err(|e| IoError::invalid_content(format!("bad XML attribute: {e}")))?
        .map(|attr| {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .map_err(|e| IoError::invalid_content(format!("bad XML attribute value: {e}")))
        })
        .transpose()
}

fn read_dae<R: BufRead>(source: R) -> IoResult<LoadedModel> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut scene = Scene::new();
    let mut geometry: Option<GeometryBuilder> = None;
    let mut unnamed = 0usize;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| IoError::invalid_content(format!("XML parse error: {e}")))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"geometry" if !is_empty => {
                        let name = match (attribute(e, "name")?, attribute(e, "id")?) {
                            (Some(name), _) | (None, Some(name)) => name,
                            (None, None) => {
                                unnamed += 1;
                                format!("geometry_{unnamed}")
                            }
                        };
                        geometry = Some(GeometryBuilder {
                            name,
                            ..GeometryBuilder::default()
                        });
                    }
                    b"source" if !is_empty => {
                        if let Some(g) = geometry.as_mut() {
                            g.current_source = Some(attribute(e, "id")?.unwrap_or_default());
                        }
                    }
                    b"float_array" if !is_empty => {
                        if let Some(g) = geometry.as_mut() {
                            if let Some(id) = g.current_source.clone() {
                                g.arrays.push((id, Vec::new()));
                                g.in_float_array = true;
                            }
                        }
                    }
                    b"vertices" if !is_empty => {
                        if let Some(g) = geometry.as_mut() {
                            g.in_vertices = true;
                        }
                    }
                    b"input" => {
                        if let Some(g) = geometry.as_mut().filter(|g| g.in_vertices) {
                            if attribute(e, "semantic")?.as_deref() == Some("POSITION") {
                                g.position_source = attribute(e, "source")?
                                    .map(|s| s.trim_start_matches('#').to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                if let Some(g) = geometry.as_mut().filter(|g| g.in_float_array) {
                    let text = t
                        .unescape()
                        .map_err(|e| IoError::invalid_content(format!("bad XML text: {e}")))?;
                    if let Some((_, values)) = g.arrays.last_mut() {
                        for token in text.split_whitespace() {
                            values.push(token.parse()?);
                        }
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"geometry" => {
                    if let Some(g) = geometry.take() {
                        scene.push(g.finish()?);
                    }
                }
                b"source" => {
                    if let Some(g) = geometry.as_mut() {
                        g.current_source = None;
                    }
                }
                b"float_array" => {
                    if let Some(g) = geometry.as_mut() {
                        g.in_float_array = false;
                    }
                }
                b"vertices" => {
                    if let Some(g) = geometry.as_mut() {
                        g.in_vertices = false;
                    }
                }
                _ => {}
            },
            Event::Eof => {
                if let Some(g) = geometry {
                    return Err(IoError::invalid_content(format!(
                        "unexpected end of file inside geometry '{}'",
                        g.name
                    )));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    scene.retain_non_empty();
    Ok(LoadedModel::Scene(scene))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshBounds;

    const KITCHEN: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <library_geometries>
    <geometry id="top-mesh" name="countertop">
      <mesh>
        <source id="top-mesh-normals">
          <float_array id="top-mesh-normals-array" count="3">0 1 0</float_array>
        </source>
        <source id="top-mesh-positions">
          <float_array id="top-mesh-positions-array" count="6">0 0 0 2400 40 600</float_array>
        </source>
        <vertices id="top-mesh-vertices">
          <input semantic="POSITION" source="#top-mesh-positions"/>
        </vertices>
      </mesh>
    </geometry>
    <geometry id="door-mesh">
      <mesh>
        <source id="door-mesh-positions">
          <float_array id="door-mesh-positions-array" count="6">0 0 0 450 720 18</float_array>
        </source>
      </mesh>
    </geometry>
  </library_geometries>
</COLLADA>"##;

    #[test]
    fn geometries_become_named_objects() {
        let LoadedModel::Scene(scene) = read_dae(KITCHEN.as_bytes()).unwrap() else {
            panic!("expected scene");
        };
        assert_eq!(scene.len(), 2);

        let top = &scene.geometries()[0];
        assert_eq!(top.name, "countertop");
        assert_relative_eq!(top.bounds().size().x, 2400.0);
        assert_relative_eq!(top.bounds().size().y, 40.0);

        // No name attribute: falls back to the id; no <vertices>: "positions" source
        let door = &scene.geometries()[1];
        assert_eq!(door.name, "door-mesh");
        assert_relative_eq!(door.bounds().size().y, 720.0);
    }

    #[test]
    fn malformed_xml() {
        let err = read_dae("<COLLADA><geometry></COLLADA>".as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }

    #[test]
    fn ragged_position_array() {
        let dae = r#"<COLLADA><geometry id="g"><mesh><source id="p">
            <float_array count="4">0 0 0 1</float_array></source></mesh></geometry></COLLADA>"#;
        let err = read_dae(dae.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("multiple of 3"));
    }

    #[test]
    fn no_geometry_is_empty_scene() {
        let model = read_dae("<COLLADA/>".as_bytes()).unwrap();
        assert!(model.is_empty());
    }
}
