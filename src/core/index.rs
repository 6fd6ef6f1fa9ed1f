//! Per-simplex geometry cache.
//!
//! The builder and the query engine never recompute simplex bounds from
//! vertices: every simplex's AABB and its midpoint ("center") are derived
//! once from the mesh and read-only afterwards. The center is the midpoint
//! of the AABB, not the simplex's geometric centroid; it is used only to
//! choose split axes and values.

use crate::core::mesh::Mesh;
use crate::geometry::aabb::Aabb;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Precomputed AABB and center per simplex.
///
/// # Examples
///
/// ```rust
/// use pointloc::core::index::SimplexGeometry;
/// use pointloc::core::mesh::Mesh;
/// use pointloc::geometry::point::Point;
///
/// let vertices = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([2.0, 0.0]),
///     Point::new([0.0, 2.0]),
/// ];
/// let mesh = Mesh::new(vertices, &[vec![0, 1, 2]]).unwrap();
/// let geometry = SimplexGeometry::from_mesh(&mesh);
///
/// assert_eq!(geometry.len(), 1);
/// assert_eq!(geometry.center(0).to_array(), [1.0, 1.0]);
/// ```
#[derive(Clone, Debug)]
pub struct SimplexGeometry<T, const D: usize>
where
    T: CoordinateScalar,
{
    aabbs: Vec<Aabb<T, D>>,
    centers: Vec<Point<T, D>>,
}

impl<T, const D: usize> SimplexGeometry<T, D>
where
    T: CoordinateScalar,
{
    /// Computes the cache for every simplex of `mesh`.
    #[must_use]
    pub fn from_mesh(mesh: &Mesh<T, D>) -> Self {
        let nr_simplices = mesh.nr_simplices();
        let mut aabbs = Vec::with_capacity(nr_simplices);
        let mut centers = Vec::with_capacity(nr_simplices);

        for simplex in 0..nr_simplices {
            // A simplex always has D + 1 >= 1 vertices, so the fold is
            // never empty.
            let aabb = Aabb::from_points(mesh.simplex_points(simplex))
                .unwrap_or_else(|| Aabb::new(Point::default(), Point::default()));
            centers.push(aabb.center());
            aabbs.push(aabb);
        }

        Self { aabbs, centers }
    }

    /// Number of cached simplices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.aabbs.len()
    }

    /// Whether the cache is empty (mesh had zero simplices).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aabbs.is_empty()
    }

    /// Returns the cached AABB of simplex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    #[must_use]
    pub fn aabb(&self, index: usize) -> &Aabb<T, D> {
        &self.aabbs[index]
    }

    /// Returns the cached AABB midpoint of simplex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    #[must_use]
    pub fn center(&self, index: usize) -> &Point<T, D> {
        &self.centers[index]
    }
}
