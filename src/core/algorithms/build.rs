//! BVH tree construction.
//!
//! The builder works on a permutation of simplex indices (initially the
//! identity) and recursively partitions it in place, so every emitted leaf
//! addresses a contiguous sub-range. Each recursive call receives an explicit
//! mutable sub-slice of the permutation; there is no hidden shared state.
//!
//! Split decisions use the *centers* of the cached per-simplex AABBs, never
//! the full boxes: the split axis is the dimension of maximum center extent,
//! and the split value is the extent midpoint (Mean) or the exact median
//! center coordinate (Median, or Mean's fallback when the midpoint split
//! leaves one side empty).

use crate::core::bvh::{BvhNode, BvhTree};
use crate::core::config::{BvhConfig, SplitStrategy};
use crate::core::index::SimplexGeometry;
use crate::geometry::aabb::Aabb;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Builds a BVH over all cached simplices.
///
/// Returns `None` when the cache is empty: a mesh with zero simplices builds
/// no tree, and the facade answers every query with "not found".
///
/// The result is a pure, deterministic function of the cache contents and
/// the configuration; repeated builds from identical inputs produce
/// structurally identical trees.
///
/// # Examples
///
/// ```rust
/// use pointloc::core::algorithms::build::build_tree;
/// use pointloc::core::config::{BvhConfig, SplitStrategy};
/// use pointloc::core::index::SimplexGeometry;
/// use pointloc::core::mesh::Mesh;
/// use pointloc::geometry::point::Point;
///
/// let vertices = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.5, 1.0]),
///     Point::new([2.0, 0.0]),
///     Point::new([3.0, 0.0]),
///     Point::new([2.5, 1.0]),
/// ];
/// let mesh = Mesh::new(vertices, &[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
/// let geometry = SimplexGeometry::from_mesh(&mesh);
///
/// let tree = build_tree(&geometry, &BvhConfig::new(1, SplitStrategy::Median)).unwrap();
/// assert_eq!(tree.leaves().count(), 2);
/// ```
#[must_use]
pub fn build_tree<T, const D: usize>(
    geometry: &SimplexGeometry<T, D>,
    config: &BvhConfig,
) -> Option<BvhTree<T, D>>
where
    T: CoordinateScalar,
{
    if geometry.is_empty() {
        return None;
    }

    let mut sorted_simplices: Vec<usize> = (0..geometry.len()).collect();
    let mut nodes = Vec::new();
    let root = build_node(geometry, config, &mut nodes, &mut sorted_simplices, 0);

    tracing::debug!(
        simplices = geometry.len(),
        nodes = nodes.len(),
        leaves = nodes.iter().filter(|n| n.is_leaf()).count(),
        bin_number = config.bin_number,
        strategy = %config.strategy,
        "built BVH"
    );

    Some(BvhTree::from_parts(nodes, sorted_simplices, root))
}

/// Recursively builds the node over `members`, a non-empty sub-slice of the
/// permutation starting at absolute position `offset`. Returns the new
/// node's arena index.
fn build_node<T, const D: usize>(
    geometry: &SimplexGeometry<T, D>,
    config: &BvhConfig,
    nodes: &mut Vec<BvhNode<T, D>>,
    members: &mut [usize],
    offset: usize,
) -> usize
where
    T: CoordinateScalar,
{
    let count = members.len();
    debug_assert!(count > 0);

    if count <= config.bin_number {
        return push_leaf(geometry, nodes, members, offset);
    }

    // Extent of the member *centers*, not of the full boxes.
    let center_bounds =
        Aabb::from_points(members.iter().map(|&simplex| *geometry.center(simplex)))
            .unwrap_or_else(|| unreachable!("members is non-empty"));

    // Dimension of maximum extent; strict `>` keeps the earliest axis on ties.
    let mut split_axis = 0;
    let mut max_extent = center_bounds.extent(0);
    for axis in 1..D {
        let extent = center_bounds.extent(axis);
        if extent > max_extent {
            max_extent = extent;
            split_axis = axis;
        }
    }

    // All centers coincide on every axis: splitting cannot separate the
    // members, so emit a leaf even though it exceeds bin_number.
    if max_extent <= T::zero() {
        tracing::debug!(
            count,
            bin_number = config.bin_number,
            "simplex centers coincide; emitting oversized leaf"
        );
        return push_leaf(geometry, nodes, members, offset);
    }

    let two = T::one() + T::one();
    let center_coord =
        |simplex: usize| geometry.center(simplex).coords()[split_axis];
    let mut split_value = (center_bounds.lower().coords()[split_axis]
        + center_bounds.upper().coords()[split_axis])
        / two;

    let mut mid = match config.strategy {
        SplitStrategy::Mean => stable_partition(members, |simplex| center_coord(simplex) < split_value),
        SplitStrategy::Median => 0,
    };

    // Median strategy, or Mean's midpoint split put everything on one side:
    // select the exact median so both halves are non-empty and the tree
    // keeps making progress.
    if config.strategy == SplitStrategy::Median || mid == 0 || mid == count {
        mid = count / 2;
        members.select_nth_unstable_by(mid, |&a, &b| {
            center_coord(a).ordered_cmp(&center_coord(b))
        });
        split_value = center_coord(members[mid]);
    }

    let (left_members, right_members) = members.split_at_mut(mid);
    let left = build_node(geometry, config, nodes, left_members, offset);
    let right = build_node(geometry, config, nodes, right_members, offset + mid);

    let aabb = nodes[left].aabb().union(nodes[right].aabb());
    nodes.push(BvhNode::Inner {
        split_axis,
        split_value,
        left,
        right,
        aabb,
    });
    nodes.len() - 1
}

/// Emits a leaf over `members` with the tight union of the cached AABBs.
fn push_leaf<T, const D: usize>(
    geometry: &SimplexGeometry<T, D>,
    nodes: &mut Vec<BvhNode<T, D>>,
    members: &[usize],
    offset: usize,
) -> usize
where
    T: CoordinateScalar,
{
    let mut iter = members.iter();
    let &first = iter
        .next()
        .unwrap_or_else(|| unreachable!("leaves are never empty"));
    let mut aabb = *geometry.aabb(first);
    for &simplex in iter {
        aabb = aabb.union(geometry.aabb(simplex));
    }

    nodes.push(BvhNode::Leaf {
        range: offset..offset + members.len(),
        aabb,
    });
    nodes.len() - 1
}

/// Stably partitions `members` so elements satisfying `pred` come first;
/// returns the boundary index. Relative order is preserved on both sides.
fn stable_partition(members: &mut [usize], pred: impl Fn(usize) -> bool) -> usize {
    let mut below = Vec::with_capacity(members.len());
    let mut above = Vec::with_capacity(members.len());
    for &simplex in members.iter() {
        if pred(simplex) {
            below.push(simplex);
        } else {
            above.push(simplex);
        }
    }
    let mid = below.len();
    members[..mid].copy_from_slice(&below);
    members[mid..].copy_from_slice(&above);
    mid
}
