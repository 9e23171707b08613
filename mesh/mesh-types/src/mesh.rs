//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, Vertex};

/// An indexed triangle mesh.
///
/// Faces reference vertices by index. Some sources (COLLADA position
/// arrays, point-only PLY files) produce vertices without faces; such a
/// mesh still has well-defined bounds.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// `true` when the mesh has no vertices and therefore no extent.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Push a polygon, fan-triangulating anything with more than three corners.
    ///
    /// Polygons with fewer than three corners are ignored.
    pub fn push_polygon(&mut self, indices: &[u32]) {
        if indices.len() < 3 {
            return;
        }
        for i in 1..indices.len() - 1 {
            self.faces.push([indices[0], indices[i], indices[i + 1]]);
        }
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        if self.vertices.is_empty() {
            return Aabb::empty();
        }

        let positions = self.vertices.iter().map(|v| &v.position);
        Aabb::from_points(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh_has_empty_bounds() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_empty());
        assert!(mesh.bounds_opt().is_none());
    }

    #[test]
    fn quad_panel_bounds() {
        let mut panel = IndexedMesh::with_capacity(4, 2);
        panel.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        panel.vertices.push(Vertex::from_coords(600.0, 0.0, 0.0));
        panel.vertices.push(Vertex::from_coords(600.0, 720.0, 18.0));
        panel.vertices.push(Vertex::from_coords(0.0, 720.0, 18.0));
        panel.push_polygon(&[0, 1, 2, 3]);

        assert_eq!(panel.face_count(), 2);
        let size = panel.bounds().size();
        assert_relative_eq!(size.x, 600.0);
        assert_relative_eq!(size.y, 720.0);
        assert_relative_eq!(size.z, 18.0);
    }

    #[test]
    fn push_polygon_fans() {
        let mut mesh = IndexedMesh::new();
        mesh.push_polygon(&[0, 1, 2, 3, 4]);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);

        mesh.push_polygon(&[7, 8]);
        assert_eq!(mesh.face_count(), 3);
    }

    #[test]
    fn vertices_without_faces_have_bounds() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 1.0, 0.5),
            ],
            Vec::new(),
        );
        assert!(!mesh.is_empty());
        assert_relative_eq!(mesh.bounds().size().x, 2.0);
        assert_relative_eq!(mesh.bounds().size().z, 0.5);
    }
}
