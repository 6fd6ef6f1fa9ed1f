//! Iterative BVH point-location queries.
//!
//! Traversal is an explicit stack, never recursion: tree depth is data
//! dependent, and the stack plus the candidate buffer and the barycentric
//! scratch are call-local, so queries are reentrant from many threads over
//! the same tree.
//!
//! Node AABB containment is the *sole* pruning test. Sibling boxes may
//! overlap (a BVH is not a BSP), so reaching one child never rules out the
//! other; the split value only decides which child to try first. At a leaf,
//! candidates are ordered by a cheap proximity score before running the
//! comparatively expensive barycentric test, which affects the expected
//! number of those tests but never the outcome.

use crate::core::bvh::{BvhNode, BvhTree};
use crate::core::index::SimplexGeometry;
use crate::core::mesh::Mesh;
use crate::geometry::barycentric::{point_in_simplex, BarycentricScratch};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use num_traits::Float;
use smallvec::SmallVec;

/// Leaf candidate ordering axis.
///
/// Leaves reached through the direct capacity cutoff never chose a split
/// axis, so the proximity score is always taken along axis 0. This is a
/// performance heuristic only; correctness does not depend on it.
const LEAF_ORDER_AXIS: usize = 0;

/// Inline capacity of the traversal stack. Trees deeper than this spill to
/// the heap, they do not fail.
const STACK_INLINE: usize = 64;

/// Inline capacity of the per-leaf candidate buffer.
const CANDIDATES_INLINE: usize = 32;

/// Counters describing one `locate` call.
///
/// Useful for asserting the cheap-rejection guarantee and for performance
/// diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocateStats {
    /// Nodes popped from the stack whose AABB contained the point.
    pub nodes_visited: usize,
    /// Barycentric membership tests performed.
    pub simplex_tests: usize,
}

/// Finds a simplex containing `point`, or `None`.
///
/// Returns the first hit in proximity order within the first leaf that
/// produces one. A point outside the root's bounding box performs zero node
/// visits and zero barycentric tests.
#[must_use]
pub fn locate_point<T, const D: usize>(
    mesh: &Mesh<T, D>,
    geometry: &SimplexGeometry<T, D>,
    tree: &BvhTree<T, D>,
    point: &Point<T, D>,
) -> Option<usize>
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    locate_point_with_stats(mesh, geometry, tree, point).0
}

/// [`locate_point`] with traversal counters.
#[must_use]
pub fn locate_point_with_stats<T, const D: usize>(
    mesh: &Mesh<T, D>,
    geometry: &SimplexGeometry<T, D>,
    tree: &BvhTree<T, D>,
    point: &Point<T, D>,
) -> (Option<usize>, LocateStats)
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    let mut stats = LocateStats::default();

    // Cheap rejection: outside the root box nothing below can contain the
    // point, and no node is visited at all.
    if !tree.node(tree.root()).aabb().contains(point) {
        return (None, stats);
    }

    // Call-local scratch: traversal stack, candidate buffer, one barycentric
    // matrix reused across every candidate of this call.
    let mut stack: SmallVec<[usize; STACK_INLINE]> = SmallVec::new();
    let mut candidates: SmallVec<[(T, usize); CANDIDATES_INLINE]> = SmallVec::new();
    let mut scratch = BarycentricScratch::for_dimension(D);

    stack.push(tree.root());

    while let Some(index) = stack.pop() {
        let node = tree.node(index);
        if !node.aabb().contains(point) {
            continue;
        }
        stats.nodes_visited += 1;

        match node {
            BvhNode::Leaf { range, .. } => {
                candidates.clear();
                for &simplex in tree.members(range) {
                    let score = Float::abs(
                        point.coords()[LEAF_ORDER_AXIS]
                            - geometry.center(simplex).coords()[LEAF_ORDER_AXIS],
                    );
                    candidates.push((score, simplex));
                }
                candidates.sort_unstable_by(|a, b| a.0.ordered_cmp(&b.0));

                for &(_, simplex) in &candidates {
                    stats.simplex_tests += 1;
                    if point_in_simplex(mesh, simplex, point, &mut scratch) {
                        return (Some(simplex), stats);
                    }
                }
                // No hit here; other pending nodes may still contain it.
            }
            BvhNode::Inner {
                split_axis,
                split_value,
                left,
                right,
                ..
            } => {
                // Far side first so the near side pops next (LIFO). Both
                // children stay on the stack: overlap means the near side
                // missing does not exclude the far side.
                if point.coords()[*split_axis] < *split_value {
                    stack.push(*right);
                    stack.push(*left);
                } else {
                    stack.push(*left);
                    stack.push(*right);
                }
            }
        }
    }

    (None, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithms::build::build_tree;
    use crate::core::config::{BvhConfig, SplitStrategy};

    /// Unit square as two triangles sharing the diagonal.
    fn square_mesh() -> Mesh<f64, 2> {
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([1.0, 1.0]),
            Point::new([0.0, 1.0]),
        ];
        Mesh::new(vertices, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap()
    }

    fn build(mesh: &Mesh<f64, 2>, config: &BvhConfig) -> (SimplexGeometry<f64, 2>, BvhTree<f64, 2>) {
        let geometry = SimplexGeometry::from_mesh(mesh);
        let tree = build_tree(&geometry, config).unwrap();
        (geometry, tree)
    }

    #[test]
    fn finds_containing_triangle() {
        let mesh = square_mesh();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(1, SplitStrategy::Median));

        // Strictly below the diagonal: triangle 0. Strictly above: triangle 1.
        assert_eq!(
            locate_point(&mesh, &geometry, &tree, &Point::new([0.7, 0.2])),
            Some(0)
        );
        assert_eq!(
            locate_point(&mesh, &geometry, &tree, &Point::new([0.2, 0.7])),
            Some(1)
        );
    }

    #[test]
    fn outside_root_is_rejected_without_work() {
        let mesh = square_mesh();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(1, SplitStrategy::Median));

        let (result, stats) =
            locate_point_with_stats(&mesh, &geometry, &tree, &Point::new([2.0, 2.0]));
        assert_eq!(result, None);
        assert_eq!(stats, LocateStats::default());
    }

    #[test]
    fn inside_root_but_outside_every_simplex() {
        // L-shaped gap: two triangles in opposite corners of a 3x3 box.
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
            Point::new([3.0, 3.0]),
            Point::new([2.0, 3.0]),
            Point::new([3.0, 2.0]),
        ];
        let mesh = Mesh::new(vertices, &[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(1, SplitStrategy::Median));

        // The middle of the root box intersects neither triangle.
        let (result, stats) =
            locate_point_with_stats(&mesh, &geometry, &tree, &Point::new([1.5, 1.5]));
        assert_eq!(result, None);
        assert!(stats.nodes_visited >= 1);
    }

    #[test]
    fn overlapping_sibling_boxes_do_not_hide_simplices() {
        // A small triangle nested inside a big one's bounding box: the two
        // sibling leaf boxes overlap. The query point sits inside the big
        // triangle but also inside the *box* of the small one, which is
        // tried first and misses; the traversal must fall through to the
        // sibling instead of stopping.
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([2.0, 0.0]),
            Point::new([2.0, 2.0]),
            Point::new([0.5, 0.0]),
            Point::new([0.0, 0.5]),
        ];
        let mesh: Mesh<f64, 2> =
            Mesh::new(vertices, &[vec![0, 1, 2], vec![0, 3, 4]]).unwrap();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(1, SplitStrategy::Mean));

        let (result, stats) =
            locate_point_with_stats(&mesh, &geometry, &tree, &Point::new([0.5, 0.4]));
        assert_eq!(result, Some(0));
        // The small triangle's box contains the point, so it was tested
        // and rejected before the hit.
        assert_eq!(stats.simplex_tests, 2);
    }

    #[test]
    fn shared_boundary_returns_some_incident_simplex() {
        let mesh = square_mesh();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(1, SplitStrategy::Median));

        // On the shared diagonal: both triangles accept the point; the
        // traversal must return one of them.
        let hit = locate_point(&mesh, &geometry, &tree, &Point::new([0.5, 0.5]));
        assert!(matches!(hit, Some(0 | 1)));
    }

    #[test]
    fn leaf_ordering_reduces_tests_but_not_results() {
        // A strip of triangles in one leaf: the proximity sort should try
        // few candidates for a point at the strip's start.
        let mut vertices = Vec::new();
        let mut rows = Vec::new();
        for i in 0..16 {
            let x = f64::from(i);
            let base = vertices.len();
            vertices.push(Point::new([x, 0.0]));
            vertices.push(Point::new([x + 1.0, 0.0]));
            vertices.push(Point::new([x + 0.5, 1.0]));
            rows.push(vec![base, base + 1, base + 2]);
        }
        let mesh: Mesh<f64, 2> = Mesh::new(vertices, &rows).unwrap();
        let geometry = SimplexGeometry::from_mesh(&mesh);
        let tree = build_tree(&geometry, &BvhConfig::new(16, SplitStrategy::Mean)).unwrap();

        let (result, stats) =
            locate_point_with_stats(&mesh, &geometry, &tree, &Point::new([0.5, 0.25]));
        assert_eq!(result, Some(0));
        // The containing triangle is the nearest by axis-0 distance, so it
        // is tested first.
        assert_eq!(stats.simplex_tests, 1);
    }

    #[test]
    fn every_simplex_is_reachable() {
        let mut vertices = Vec::new();
        let mut rows = Vec::new();
        for i in 0..10 {
            let x = f64::from(i) * 2.0;
            let base = vertices.len();
            vertices.push(Point::new([x, 0.0]));
            vertices.push(Point::new([x + 1.0, 0.0]));
            vertices.push(Point::new([x + 0.5, 1.0]));
            rows.push(vec![base, base + 1, base + 2]);
        }
        let mesh: Mesh<f64, 2> = Mesh::new(vertices, &rows).unwrap();
        let (geometry, tree) = build(&mesh, &BvhConfig::new(2, SplitStrategy::Median));

        for i in 0..10 {
            let x = f64::from(i as u32) * 2.0 + 0.5;
            let inside = Point::new([x, 0.25]);
            assert_eq!(
                locate_point(&mesh, &geometry, &tree, &inside),
                Some(i),
                "triangle {i} not found"
            );
        }
    }
}
