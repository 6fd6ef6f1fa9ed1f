//! Barycentric point-in-simplex membership testing.
//!
//! A point `p` lies in a simplex with vertices `v_0 .. v_D` iff the
//! barycentric weights `w` solving
//!
//! ```text
//! | v_0 .. v_D | w = | p |      (one column per vertex,
//! |  1 ..  1   |     | 1 |       a row of ones pins sum(w) = 1)
//! ```
//!
//! all fall inside the tolerance-adjusted interval `[0, 1]`. The weights sum
//! to 1 by construction of the last row, so only the interval check remains.
//! A singular system (degenerate simplex) reports non-containment.
//!
//! The `(D+1) x (D+1)` system is solved by in-place Gaussian elimination with
//! partial pivoting on a [`BarycentricScratch`]. The query engine allocates
//! one scratch per `locate` call and reuses it across every candidate
//! simplex, so the per-candidate test performs no allocation.

use crate::core::mesh::Mesh;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use nalgebra::{DMatrix, DVector};
use num_traits::Float;

/// Reusable storage for one `(D+1) x (D+1)` barycentric solve.
///
/// Allocate once per query call, not per candidate simplex.
///
/// # Examples
///
/// ```rust
/// use pointloc::geometry::barycentric::{point_in_simplex, BarycentricScratch};
/// use pointloc::core::mesh::Mesh;
/// use pointloc::geometry::point::Point;
///
/// let vertices = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let mesh = Mesh::new(vertices, &[vec![0, 1, 2]]).unwrap();
/// let mut scratch = BarycentricScratch::for_dimension(2);
///
/// assert!(point_in_simplex(&mesh, 0, &Point::new([0.25, 0.25]), &mut scratch));
/// assert!(!point_in_simplex(&mesh, 0, &Point::new([0.75, 0.75]), &mut scratch));
/// ```
#[derive(Clone, Debug)]
pub struct BarycentricScratch<T>
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    matrix: DMatrix<T>,
    rhs: DVector<T>,
}

impl<T> BarycentricScratch<T>
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    /// Creates scratch storage for simplices of spatial dimension `dim`
    /// (system size `dim + 1`).
    #[must_use]
    pub fn for_dimension(dim: usize) -> Self {
        let n = dim + 1;
        Self {
            matrix: DMatrix::zeros(n, n),
            rhs: DVector::zeros(n),
        }
    }
}

/// Tests whether `point` lies inside simplex `simplex` of `mesh`.
///
/// Boundary points are accepted within the scalar type's default tolerance.
/// Degenerate (zero-volume) simplices never contain anything.
///
/// # Panics
///
/// Panics if `simplex >= mesh.nr_simplices()` or the scratch was sized for a
/// different dimension.
#[must_use]
pub fn point_in_simplex<T, const D: usize>(
    mesh: &Mesh<T, D>,
    simplex: usize,
    point: &Point<T, D>,
    scratch: &mut BarycentricScratch<T>,
) -> bool
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    let n = D + 1;
    assert_eq!(scratch.matrix.nrows(), n, "scratch sized for wrong dimension");

    // One column per simplex vertex, plus the row of ones.
    for (column, &vertex_index) in mesh.simplex(simplex).iter().enumerate() {
        let vertex = mesh.vertex(vertex_index);
        for row in 0..D {
            scratch.matrix[(row, column)] = vertex.coords()[row];
        }
        scratch.matrix[(D, column)] = T::one();
    }
    for row in 0..D {
        scratch.rhs[row] = point.coords()[row];
    }
    scratch.rhs[D] = T::one();

    if !solve_in_place(&mut scratch.matrix, &mut scratch.rhs) {
        return false;
    }

    let tolerance = T::default_tolerance();
    let lower = T::zero() - tolerance;
    let upper = T::one() + tolerance;
    (0..n).all(|i| scratch.rhs[i] >= lower && scratch.rhs[i] <= upper)
}

/// In-place Gaussian elimination with partial pivoting; the solution ends up
/// in `rhs`. Returns `false` when the system is (numerically) singular.
fn solve_in_place<T>(matrix: &mut DMatrix<T>, rhs: &mut DVector<T>) -> bool
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    let n = matrix.nrows();

    for col in 0..n {
        // Partial pivot: largest magnitude in the remaining column.
        let mut pivot_row = col;
        let mut pivot_mag = Float::abs(matrix[(col, col)]);
        for row in col + 1..n {
            let mag = Float::abs(matrix[(row, col)]);
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = row;
            }
        }
        // NaN pivots (propagated from NaN coordinates) also land here.
        if pivot_mag.partial_cmp(&T::default_tolerance()) != Some(std::cmp::Ordering::Greater) {
            return false;
        }
        if pivot_row != col {
            matrix.swap_rows(pivot_row, col);
            rhs.swap_rows(pivot_row, col);
        }

        let pivot = matrix[(col, col)];
        for row in col + 1..n {
            let factor = matrix[(row, col)] / pivot;
            for k in col..n {
                let delta = factor * matrix[(col, k)];
                matrix[(row, k)] = matrix[(row, k)] - delta;
            }
            let delta = factor * rhs[col];
            rhs[row] = rhs[row] - delta;
        }
    }

    // Back substitution.
    for col in (0..n).rev() {
        let mut value = rhs[col];
        for k in col + 1..n {
            value = value - matrix[(col, k)] * rhs[k];
        }
        rhs[col] = value / matrix[(col, col)];
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh<f64, 2> {
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
        ];
        Mesh::new(vertices, &[vec![0, 1, 2]]).unwrap()
    }

    #[test]
    fn interior_point_is_inside() {
        let mesh = triangle_mesh();
        let mut scratch = BarycentricScratch::for_dimension(2);
        assert!(point_in_simplex(&mesh, 0, &Point::new([0.2, 0.3]), &mut scratch));
    }

    #[test]
    fn exterior_point_is_outside() {
        let mesh = triangle_mesh();
        let mut scratch = BarycentricScratch::for_dimension(2);
        assert!(!point_in_simplex(&mesh, 0, &Point::new([0.6, 0.6]), &mut scratch));
        assert!(!point_in_simplex(&mesh, 0, &Point::new([-0.1, 0.5]), &mut scratch));
    }

    #[test]
    fn vertices_and_edges_are_inside() {
        let mesh = triangle_mesh();
        let mut scratch = BarycentricScratch::for_dimension(2);
        // Vertices.
        assert!(point_in_simplex(&mesh, 0, &Point::new([0.0, 0.0]), &mut scratch));
        assert!(point_in_simplex(&mesh, 0, &Point::new([1.0, 0.0]), &mut scratch));
        // Edge midpoint.
        assert!(point_in_simplex(&mesh, 0, &Point::new([0.5, 0.5]), &mut scratch));
    }

    #[test]
    fn tetrahedron_membership_3d() {
        let vertices = vec![
            Point::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 0.0, 0.0]),
            Point::new([0.0, 1.0, 0.0]),
            Point::new([0.0, 0.0, 1.0]),
        ];
        let mesh = Mesh::new(vertices, &[vec![0, 1, 2, 3]]).unwrap();
        let mut scratch = BarycentricScratch::for_dimension(3);

        assert!(point_in_simplex(&mesh, 0, &Point::new([0.2, 0.2, 0.2]), &mut scratch));
        assert!(!point_in_simplex(&mesh, 0, &Point::new([0.5, 0.5, 0.5]), &mut scratch));
    }

    #[test]
    fn degenerate_simplex_contains_nothing() {
        // Three collinear vertices: zero-area triangle.
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 1.0]),
            Point::new([2.0, 2.0]),
        ];
        let mesh = Mesh::new(vertices, &[vec![0, 1, 2]]).unwrap();
        let mut scratch = BarycentricScratch::for_dimension(2);

        assert!(!point_in_simplex(&mesh, 0, &Point::new([1.0, 1.0]), &mut scratch));
    }

    #[test]
    fn scratch_is_reusable_across_candidates() {
        let mesh = triangle_mesh();
        let mut scratch = BarycentricScratch::for_dimension(2);
        for _ in 0..3 {
            assert!(point_in_simplex(&mesh, 0, &Point::new([0.2, 0.2]), &mut scratch));
            assert!(!point_in_simplex(&mesh, 0, &Point::new([2.0, 2.0]), &mut scratch));
        }
    }
}
