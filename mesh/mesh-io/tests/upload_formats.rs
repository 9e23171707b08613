//! Loading every accepted format through the upload path.
//!
//! Each test builds a small furniture-like model in memory, hands the bytes
//! to [`load_upload`] with the default [`TempFileLoader`], and checks the
//! resulting object structure and extents.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use mesh_io::{IoError, MeshFormat, TempFileLoader, UploadLimits, load_model, load_upload};
use mesh_types::{LoadedModel, MeshBounds};
use tempfile::tempdir;

fn upload(bytes: &[u8], filename: &str) -> Result<LoadedModel, IoError> {
    load_upload(bytes, filename, &TempFileLoader, &UploadLimits::default())
}

/// A closed box as ASCII STL, 12 triangles, `w x h x d`.
fn ascii_stl_box(w: f64, h: f64, d: f64) -> String {
    let corners = [
        [0.0, 0.0, 0.0],
        [w, 0.0, 0.0],
        [w, h, 0.0],
        [0.0, h, 0.0],
        [0.0, 0.0, d],
        [w, 0.0, d],
        [w, h, d],
        [0.0, h, d],
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    let mut out = String::from("solid box\n");
    for face in faces {
        out.push_str("  facet normal 0 0 0\n    outer loop\n");
        for i in face {
            let [x, y, z] = corners[i];
            out.push_str(&format!("      vertex {x} {y} {z}\n"));
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    out.push_str("endsolid box\n");
    out
}

/// A single-triangle binary STL.
fn binary_stl_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out.extend_from_slice(&1u32.to_le_bytes());
    for v in [[0.0f32; 3], a, b, c] {
        for coord in v {
            out.extend_from_slice(&coord.to_le_bytes());
        }
    }
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

// =============================================================================
// Per-format loading
// =============================================================================

#[test]
fn obj_with_groups_is_a_scene() {
    let obj = "\
o door_left
v 0 0 0
v 450 0 0
v 450 1800 18
f 1 2 3
o shelf_1
v 0 0 0
v 900 18 0
v 900 18 400
f 4 5 6
";
    let model = upload(obj.as_bytes(), "wardrobe.obj").unwrap();
    let LoadedModel::Scene(scene) = model else {
        panic!("expected a scene");
    };
    let names: Vec<_> = scene.geometries().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["door_left", "shelf_1"]);
    assert_relative_eq!(scene.geometries()[0].bounds().size().y, 1800.0);
}

#[test]
fn obj_without_groups_is_a_mesh() {
    let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let model = upload(obj.as_bytes(), "panel.OBJ").unwrap();
    assert!(matches!(model, LoadedModel::Mesh(_)));
}

#[test]
fn ascii_stl_box_extents() {
    let stl = ascii_stl_box(0.6, 0.72, 0.35);
    let model = upload(stl.as_bytes(), "base.stl").unwrap();
    let LoadedModel::Mesh(mesh) = &model else {
        panic!("STL should load as a single mesh");
    };
    assert_eq!(mesh.face_count(), 12);

    let size = model.bounds().size();
    assert_relative_eq!(size.x, 0.6, epsilon = 1e-9);
    assert_relative_eq!(size.y, 0.72, epsilon = 1e-9);
    assert_relative_eq!(size.z, 0.35, epsilon = 1e-9);
}

#[test]
fn binary_stl_extents() {
    let stl = binary_stl_triangle([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, 1.0]);
    let model = upload(&stl, "tri.stl").unwrap();
    let size = model.bounds().size();
    assert_relative_eq!(size.x, 2.0);
    assert_relative_eq!(size.y, 3.0);
    assert_relative_eq!(size.z, 1.0);
}

#[test]
fn binary_stl_with_solid_text_header() {
    let mut stl = binary_stl_triangle([0.0, 0.0, 0.0], [600.0, 0.0, 0.0], [0.0, 720.0, 18.0]);
    stl[..80].fill(b' ');
    stl[..21].copy_from_slice(b"solid exported by CAD");

    let model = upload(&stl, "panel.stl").unwrap();
    assert_relative_eq!(model.bounds().size().y, 720.0);
}

#[test]
fn ascii_ply_extents() {
    let ply = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1.2 0 0
0 2.1 0.5
3 0 1 2
";
    let model = upload(ply.as_bytes(), "tall.ply").unwrap();
    assert_eq!(model.object_count(), 1);
    let size = model.bounds().size();
    assert_relative_eq!(size.y, 2.1, epsilon = 1e-6);
    assert_relative_eq!(size.z, 0.5, epsilon = 1e-6);
}

#[test]
fn dae_geometries_are_objects() {
    let dae = r##"<?xml version="1.0"?>
<COLLADA version="1.4.1">
  <library_geometries>
    <geometry id="a" name="drawer_front">
      <mesh><source id="a-positions"><float_array count="6">0 0 0 400 150 18</float_array></source>
      <vertices id="a-vertices"><input semantic="POSITION" source="#a-positions"/></vertices></mesh>
    </geometry>
    <geometry id="b" name="countertop">
      <mesh><source id="b-positions"><float_array count="6">0 0 0 1200 30 600</float_array></source>
      <vertices id="b-vertices"><input semantic="POSITION" source="#b-positions"/></vertices></mesh>
    </geometry>
  </library_geometries>
</COLLADA>"##;
    let model = upload(dae.as_bytes(), "kitchen.dae").unwrap();
    assert_eq!(model.object_count(), 2);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn unsupported_extension_is_validation_error() {
    let err = upload(b"anything", "model.fbx").unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, IoError::UnsupportedFormat { .. }));
}

#[test]
fn oversized_upload_is_validation_error() {
    let limits = UploadLimits { max_bytes: 16 };
    let err = load_upload(&[0u8; 17], "big.stl", &TempFileLoader, &limits).unwrap_err();
    assert!(matches!(err, IoError::FileTooLarge { size: 17, limit: 16 }));
}

#[test]
fn corrupt_content_is_load_error() {
    let err = upload(b"<COLLADA><geometry>", "broken.dae").unwrap_err();
    assert!(!err.is_validation());
}

#[test]
fn no_vertices_is_empty_geometry() {
    let err = upload(b"# nothing here\n", "empty.obj").unwrap_err();
    assert!(matches!(err, IoError::EmptyGeometry));
}

// =============================================================================
// Loading from disk
// =============================================================================

#[test]
fn load_model_detects_format_from_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelf.stl");
    std::fs::write(&path, ascii_stl_box(0.8, 0.02, 0.3)).unwrap();

    let model = load_model(&path).unwrap();
    assert_relative_eq!(model.bounds().size().x, 0.8, epsilon = 1e-9);
    assert_eq!(MeshFormat::from_path(&path), Some(MeshFormat::Stl));
}

#[test]
fn load_model_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_model(dir.path().join("missing.obj")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
