//! Flattened bounding volume hierarchy.
//!
//! Nodes live in a contiguous arena (`Vec<BvhNode>`) and reference children
//! by integer index rather than pointer, which removes manual lifetime
//! management and keeps traversal cache-friendly. Leaves address their member
//! simplices through a shared permutation array (`sorted_simplices`): the
//! builder reorders it in place so every leaf's members occupy one contiguous
//! sub-range.
//!
//! Node regions are *not* disjoint: sibling boxes may overlap, so traversal
//! may have to visit both children of an inner node. The tree is immutable
//! once built and is always a pure function of the mesh and build
//! configuration; it is rebuilt wholesale, never patched.

use crate::geometry::aabb::Aabb;
use crate::geometry::traits::coordinate::CoordinateScalar;
use std::ops::Range;

/// A node of the hierarchy: either a leaf over a contiguous range of the
/// permutation array, or an inner node with two children.
///
/// Invariant: a node's AABB is the tight union of the AABBs of the simplices
/// it contains (leaf) or of its two children (inner).
#[derive(Clone, Debug, PartialEq)]
pub enum BvhNode<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// A leaf holding `sorted_simplices[range]`.
    Leaf {
        /// Member sub-range of the permutation array.
        range: Range<usize>,
        /// Tight union of the members' AABBs.
        aabb: Aabb<T, D>,
    },
    /// An inner node with two children addressed by arena index.
    Inner {
        /// Axis the members were partitioned on.
        split_axis: usize,
        /// Partition value on `split_axis`.
        split_value: T,
        /// Arena index of the left child (members below the split).
        left: usize,
        /// Arena index of the right child.
        right: usize,
        /// Tight union of the two children's AABBs.
        aabb: Aabb<T, D>,
    },
}

impl<T, const D: usize> BvhNode<T, D>
where
    T: CoordinateScalar,
{
    /// Returns the node's bounding box.
    #[inline]
    #[must_use]
    pub const fn aabb(&self) -> &Aabb<T, D> {
        match self {
            Self::Leaf { aabb, .. } | Self::Inner { aabb, .. } => aabb,
        }
    }

    /// Whether this node is a leaf.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// An immutable BVH over the simplices of one mesh.
///
/// Constructed by [`build_tree`](crate::core::algorithms::build::build_tree);
/// inspected by the query engine and by invariant tests.
#[derive(Clone, Debug, PartialEq)]
pub struct BvhTree<T, const D: usize>
where
    T: CoordinateScalar,
{
    nodes: Vec<BvhNode<T, D>>,
    sorted_simplices: Vec<usize>,
    root: usize,
}

impl<T, const D: usize> BvhTree<T, D>
where
    T: CoordinateScalar,
{
    /// Assembles a tree from its parts. Only the builder calls this.
    pub(crate) fn from_parts(
        nodes: Vec<BvhNode<T, D>>,
        sorted_simplices: Vec<usize>,
        root: usize,
    ) -> Self {
        debug_assert!(root < nodes.len());
        Self {
            nodes,
            sorted_simplices,
            root,
        }
    }

    /// Arena index of the root node.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid arena index.
    #[inline]
    #[must_use]
    pub fn node(&self, index: usize) -> &BvhNode<T, D> {
        &self.nodes[index]
    }

    /// All nodes in arena order.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[BvhNode<T, D>] {
        &self.nodes
    }

    /// Total number of nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The permutation of `0..nr_simplices` whose contiguous sub-ranges are
    /// the leaves' member lists.
    #[inline]
    #[must_use]
    pub fn sorted_simplices(&self) -> &[usize] {
        &self.sorted_simplices
    }

    /// Member simplex indices of a leaf range.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds for the permutation array.
    #[inline]
    #[must_use]
    pub fn members(&self, range: &Range<usize>) -> &[usize] {
        &self.sorted_simplices[range.clone()]
    }

    /// Iterates over all leaf nodes.
    pub fn leaves(&self) -> impl Iterator<Item = &BvhNode<T, D>> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf())
    }
}
