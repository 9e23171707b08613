//! Core mesh types for furniture model analysis.
//!
//! This crate provides the geometry containers that the loaders in `mesh-io`
//! produce and the part extractor consumes:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Scene`] - Several named meshes loaded from one file
//! - [`LoadedModel`] - Either a single undifferentiated mesh or a scene
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64` in whatever
//! unit the source file was authored in. Unit detection happens downstream.
//!
//! # Coordinate System
//!
//! Furniture models are authored **Y-up**:
//! - X: width (left/right)
//! - Y: height (up/down)
//! - Z: depth (front/back)
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshBounds, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.6, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.6, 2.1, 0.45));
//! mesh.faces.push([0, 1, 2]);
//!
//! let size = mesh.bounds().size();
//! assert!((size.y - 2.1).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod scene;
mod traits;
mod vertex;

pub use bounds::Aabb;
pub use mesh::IndexedMesh;
pub use scene::{LoadedModel, NamedGeometry, Scene};
pub use traits::MeshBounds;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
