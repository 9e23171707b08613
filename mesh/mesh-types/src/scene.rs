//! Multi-object scenes and the loader output type.

use crate::{Aabb, IndexedMesh, MeshBounds};

/// One named object inside a [`Scene`].
#[derive(Debug, Clone)]
pub struct NamedGeometry {
    /// Object name as written in the source file (OBJ `o`/`g`, COLLADA `name`/`id`).
    pub name: String,
    /// The object's geometry.
    pub mesh: IndexedMesh,
}

impl NamedGeometry {
    /// Create a named geometry.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: IndexedMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
        }
    }
}

impl MeshBounds for NamedGeometry {
    fn bounds(&self) -> Aabb {
        self.mesh.bounds()
    }
}

/// A model made of several named objects.
///
/// Geometries keep the order in which the source file declared them.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, NamedGeometry, Scene, Vertex};
///
/// let door = IndexedMesh::from_parts(
///     vec![Vertex::from_coords(0.0, 0.0, 0.0), Vertex::from_coords(450.0, 1800.0, 20.0)],
///     Vec::new(),
/// );
/// let mut scene = Scene::new();
/// scene.push(NamedGeometry::new("door_left", door));
///
/// assert_eq!(scene.len(), 1);
/// assert_eq!(scene.geometries()[0].name, "door_left");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometries: Vec<NamedGeometry>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            geometries: Vec::new(),
        }
    }

    /// Append a geometry.
    pub fn push(&mut self, geometry: NamedGeometry) {
        self.geometries.push(geometry);
    }

    /// Geometries in declaration order.
    #[must_use]
    pub fn geometries(&self) -> &[NamedGeometry] {
        &self.geometries
    }

    /// Number of geometries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// `true` if the scene has no geometries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Drop geometries that have no vertices.
    pub fn retain_non_empty(&mut self) {
        self.geometries.retain(|g| !g.mesh.is_empty());
    }
}

impl FromIterator<NamedGeometry> for Scene {
    fn from_iter<I: IntoIterator<Item = NamedGeometry>>(iter: I) -> Self {
        Self {
            geometries: iter.into_iter().collect(),
        }
    }
}

impl MeshBounds for Scene {
    fn bounds(&self) -> Aabb {
        self.geometries
            .iter()
            .map(MeshBounds::bounds)
            .filter(|b| !b.is_empty())
            .fold(Aabb::empty(), |acc, b| acc.union(&b))
    }
}

/// What a loader hands back: one undifferentiated mesh, or a scene of named objects.
#[derive(Debug, Clone)]
pub enum LoadedModel {
    /// A single mesh with no sub-object boundaries.
    Mesh(IndexedMesh),
    /// Several named objects.
    Scene(Scene),
}

impl LoadedModel {
    /// Collapse a scene with exactly one object into a plain mesh.
    ///
    /// A one-object scene carries no more part information than a bare mesh,
    /// so it is treated as one.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Scene(scene) if scene.len() == 1 => {
                let mut geometries = scene.geometries;
                match geometries.pop() {
                    Some(only) => Self::Mesh(only.mesh),
                    None => Self::Scene(Scene::new()),
                }
            }
            other => other,
        }
    }

    /// `true` if there is no vertex anywhere in the model.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Mesh(mesh) => mesh.is_empty(),
            Self::Scene(scene) => scene.geometries().iter().all(|g| g.mesh.is_empty()),
        }
    }

    /// Number of objects: 1 for a mesh, the geometry count for a scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        match self {
            Self::Mesh(_) => 1,
            Self::Scene(scene) => scene.len(),
        }
    }
}

impl MeshBounds for LoadedModel {
    fn bounds(&self) -> Aabb {
        match self {
            Self::Mesh(mesh) => mesh.bounds(),
            Self::Scene(scene) => scene.bounds(),
        }
    }
}
