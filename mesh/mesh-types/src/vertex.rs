//! Vertex type.

use nalgebra::Point3;

/// A mesh vertex.
///
/// Only the position is kept; part extraction works on extents, so normals
/// and colors from the source file are discarded at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in the source file's units.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a vertex at a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(450.0, 1800.0, 20.0);
    /// assert!((v.position.y - 1800.0).abs() < f64::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
