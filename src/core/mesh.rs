//! Simplicial mesh storage and shape validation.
//!
//! A [`Mesh`] is an ordered sequence of D-dimensional vertices plus an
//! ordered collection of simplices, each an ordered tuple of exactly `D + 1`
//! vertex indices (triangle in 2-D, tetrahedron in 3-D). Simplex indices are
//! stored flat with stride `D + 1` so the spatial index can refer to
//! simplices by plain `usize` position.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use thiserror::Error;

/// Errors surfaced while validating mesh connectivity at construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshValidationError {
    /// A simplex row does not have exactly `D + 1` vertex indices.
    #[error(
        "Simplex {simplex_index} has {actual} vertex indices, expected exactly {expected} (D + 1)"
    )]
    InvalidSimplex {
        /// Position of the offending simplex.
        simplex_index: usize,
        /// Required number of indices (`D + 1`).
        expected: usize,
        /// Number of indices actually supplied.
        actual: usize,
    },

    /// A simplex references a vertex index outside the vertex sequence.
    #[error(
        "Simplex {simplex_index} references vertex {vertex_index}, but the mesh has only {vertex_count} vertices"
    )]
    VertexIndexOutOfRange {
        /// Position of the offending simplex.
        simplex_index: usize,
        /// The out-of-range vertex index.
        vertex_index: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// A D-dimensional simplicial mesh: vertices plus simplex index tuples.
///
/// Immutable after construction. Every simplex has exactly `D + 1` vertex
/// indices, checked by [`Mesh::new`].
///
/// # Examples
///
/// ```rust
/// use pointloc::core::mesh::Mesh;
/// use pointloc::geometry::point::Point;
///
/// // Two triangles sharing the diagonal of the unit square.
/// let vertices = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([1.0, 1.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let simplices = vec![vec![0, 1, 2], vec![0, 2, 3]];
/// let mesh = Mesh::new(vertices, &simplices).unwrap();
///
/// assert_eq!(mesh.dim(), 2);
/// assert_eq!(mesh.nr_simplices(), 2);
/// assert_eq!(mesh.simplex(1), &[0, 2, 3]);
/// ```
// Not serialized directly: the locator snapshot writes vertices and simplex
// rows itself, keeping the flat index layout out of the wire format.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh<T, const D: usize>
where
    T: CoordinateScalar,
{
    vertices: Vec<Point<T, D>>,
    /// Flat simplex-to-vertex incidence, stride `D + 1`.
    simplex_indices: Vec<usize>,
}

impl<T, const D: usize> Mesh<T, D>
where
    T: CoordinateScalar,
{
    /// Number of vertex indices per simplex.
    pub const VERTICES_PER_SIMPLEX: usize = D + 1;

    /// Creates a mesh from vertices and simplex rows.
    ///
    /// # Errors
    ///
    /// - [`MeshValidationError::InvalidSimplex`] if any row does not have
    ///   exactly `D + 1` indices.
    /// - [`MeshValidationError::VertexIndexOutOfRange`] if any index is not a
    ///   valid position in `vertices`.
    pub fn new<R>(vertices: Vec<Point<T, D>>, simplices: &[R]) -> Result<Self, MeshValidationError>
    where
        R: AsRef<[usize]>,
    {
        let vertex_count = vertices.len();
        let mut simplex_indices = Vec::with_capacity(simplices.len() * Self::VERTICES_PER_SIMPLEX);

        for (simplex_index, row) in simplices.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != Self::VERTICES_PER_SIMPLEX {
                return Err(MeshValidationError::InvalidSimplex {
                    simplex_index,
                    expected: Self::VERTICES_PER_SIMPLEX,
                    actual: row.len(),
                });
            }
            for &vertex_index in row {
                if vertex_index >= vertex_count {
                    return Err(MeshValidationError::VertexIndexOutOfRange {
                        simplex_index,
                        vertex_index,
                        vertex_count,
                    });
                }
                simplex_indices.push(vertex_index);
            }
        }

        Ok(Self {
            vertices,
            simplex_indices,
        })
    }

    /// Returns the spatial dimension `D`.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }

    /// Returns the number of vertices.
    #[inline]
    #[must_use]
    pub fn nr_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of simplices.
    #[inline]
    #[must_use]
    pub fn nr_simplices(&self) -> usize {
        self.simplex_indices.len() / Self::VERTICES_PER_SIMPLEX
    }

    /// Returns all vertices in order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point<T, D>] {
        &self.vertices
    }

    /// Returns the vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= nr_vertices()`. Simplex rows are validated at
    /// construction, so indexing through [`Mesh::simplex`] cannot panic.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: usize) -> &Point<T, D> {
        &self.vertices[index]
    }

    /// Returns the `D + 1` vertex indices of simplex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= nr_simplices()`.
    #[inline]
    #[must_use]
    pub fn simplex(&self, index: usize) -> &[usize] {
        let start = index * Self::VERTICES_PER_SIMPLEX;
        &self.simplex_indices[start..start + Self::VERTICES_PER_SIMPLEX]
    }

    /// Iterates over all simplex rows in order.
    pub fn simplices(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.simplex_indices.chunks_exact(Self::VERTICES_PER_SIMPLEX)
    }

    /// Iterates over the vertex points of simplex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= nr_simplices()`.
    pub fn simplex_points(&self, index: usize) -> impl ExactSizeIterator<Item = Point<T, D>> + '_ {
        self.simplex(index).iter().map(|&v| self.vertices[v])
    }

    /// Returns the simplex rows as owned vectors, for snapshot serialization.
    #[must_use]
    pub fn simplex_rows(&self) -> Vec<Vec<usize>> {
        self.simplices().map(<[usize]>::to_vec).collect()
    }
}
