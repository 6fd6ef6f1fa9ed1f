//! Axis-aligned bounding boxes in d dimensions.
//!
//! An [`Aabb`] is the interval `[lower, upper]` per axis. BVH nodes carry the
//! tight union of their members' boxes, so the operations here are the
//! component-wise min/max fold ([`Aabb::union`], [`Aabb::from_points`]) and
//! the per-axis containment test the traversal prunes with.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// An axis-aligned bounding box: per-axis interval `[lower, upper]`.
///
/// # Examples
///
/// ```rust
/// use pointloc::geometry::aabb::Aabb;
/// use pointloc::geometry::point::Point;
///
/// let aabb = Aabb::new(Point::new([0.0, 0.0]), Point::new([2.0, 1.0]));
/// assert!(aabb.contains(&Point::new([1.0, 0.5])));
/// assert!(!aabb.contains(&Point::new([3.0, 0.5])));
/// assert_eq!(aabb.center().to_array(), [1.0, 0.5]);
/// ```
// Never serialized: node boxes are derived data and trees are rebuilt from
// the mesh snapshot, not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aabb<T, const D: usize>
where
    T: CoordinateScalar,
{
    lower: Point<T, D>,
    upper: Point<T, D>,
}

impl<T, const D: usize> Aabb<T, D>
where
    T: CoordinateScalar,
{
    /// Creates a bounding box from its lower and upper corner.
    ///
    /// The caller is responsible for `lower[axis] <= upper[axis]` on every
    /// axis; boxes built through [`Aabb::from_points`] or [`Aabb::union`]
    /// maintain this by construction.
    #[inline]
    #[must_use]
    pub const fn new(lower: Point<T, D>, upper: Point<T, D>) -> Self {
        Self { lower, upper }
    }

    /// Computes the tight bounding box of a non-empty set of points.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointloc::geometry::aabb::Aabb;
    /// use pointloc::geometry::point::Point;
    ///
    /// let points = [Point::new([0.0, 1.0]), Point::new([2.0, -1.0])];
    /// let aabb = Aabb::from_points(points.iter().copied()).unwrap();
    /// assert_eq!(aabb.lower().to_array(), [0.0, -1.0]);
    /// assert_eq!(aabb.upper().to_array(), [2.0, 1.0]);
    /// ```
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point<T, D>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            lower: first,
            upper: first,
        };
        for point in iter {
            aabb.expand_to(&point);
        }
        Some(aabb)
    }

    /// Returns the lower corner.
    #[inline]
    #[must_use]
    pub const fn lower(&self) -> &Point<T, D> {
        &self.lower
    }

    /// Returns the upper corner.
    #[inline]
    #[must_use]
    pub const fn upper(&self) -> &Point<T, D> {
        &self.upper
    }

    /// Grows the box to include `point`.
    pub fn expand_to(&mut self, point: &Point<T, D>) {
        let mut lower = self.lower.to_array();
        let mut upper = self.upper.to_array();
        for (axis, &coord) in point.coords().iter().enumerate() {
            lower[axis] = lower[axis].min(coord);
            upper[axis] = upper[axis].max(coord);
        }
        self.lower = Point::new(lower);
        self.upper = Point::new(upper);
    }

    /// Returns the component-wise union of two boxes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointloc::geometry::aabb::Aabb;
    /// use pointloc::geometry::point::Point;
    ///
    /// let a = Aabb::new(Point::new([0.0]), Point::new([1.0]));
    /// let b = Aabb::new(Point::new([0.5]), Point::new([2.0]));
    /// let u = a.union(&b);
    /// assert_eq!(u.lower().to_array(), [0.0]);
    /// assert_eq!(u.upper().to_array(), [2.0]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut lower = self.lower.to_array();
        let mut upper = self.upper.to_array();
        for axis in 0..D {
            lower[axis] = lower[axis].min(other.lower.coords()[axis]);
            upper[axis] = upper[axis].max(other.upper.coords()[axis]);
        }
        Self {
            lower: Point::new(lower),
            upper: Point::new(upper),
        }
    }

    /// Tests whether `point` lies inside the box (`lower <= p <= upper` on
    /// every axis, boundary inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point<T, D>) -> bool {
        point
            .coords()
            .iter()
            .enumerate()
            .all(|(axis, &coord)| self.lower.coords()[axis] <= coord && coord <= self.upper.coords()[axis])
    }

    /// Returns the midpoint of the box.
    ///
    /// For a simplex's bounding box this is the "center" the builder splits
    /// on; it is not the simplex's geometric centroid.
    #[must_use]
    pub fn center(&self) -> Point<T, D> {
        let two = T::one() + T::one();
        let mut mid = [T::zero(); D];
        for axis in 0..D {
            mid[axis] = (self.lower.coords()[axis] + self.upper.coords()[axis]) / two;
        }
        Point::new(mid)
    }

    /// Returns the extent (`upper - lower`) along `axis`.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: usize) -> T {
        self.upper.coords()[axis] - self.lower.coords()[axis]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_is_tight() {
        let points = [
            Point::new([1.0, 4.0, -1.0]),
            Point::new([-2.0, 2.0, 5.0]),
            Point::new([0.0, 3.0, 0.0]),
        ];
        let aabb = Aabb::from_points(points.iter().copied()).unwrap();
        assert_eq!(aabb.lower().to_array(), [-2.0, 2.0, -1.0]);
        assert_eq!(aabb.upper().to_array(), [1.0, 4.0, 5.0]);
    }

    #[test]
    fn from_points_empty_is_none() {
        let aabb = Aabb::<f64, 2>::from_points(std::iter::empty());
        assert!(aabb.is_none());
    }

    #[test]
    fn containment_is_boundary_inclusive() {
        let aabb = Aabb::new(Point::new([0.0, 0.0]), Point::new([1.0, 1.0]));
        assert!(aabb.contains(&Point::new([0.0, 0.0])));
        assert!(aabb.contains(&Point::new([1.0, 1.0])));
        assert!(aabb.contains(&Point::new([0.5, 0.5])));
        assert!(!aabb.contains(&Point::new([1.0 + 1e-9, 0.5])));
        assert!(!aabb.contains(&Point::new([0.5, -1e-9])));
    }

    #[test]
    fn union_covers_both_operands() {
        let a = Aabb::new(Point::new([0.0, 0.0]), Point::new([1.0, 3.0]));
        let b = Aabb::new(Point::new([-1.0, 1.0]), Point::new([0.5, 4.0]));
        let u = a.union(&b);
        assert_eq!(u.lower().to_array(), [-1.0, 0.0]);
        assert_eq!(u.upper().to_array(), [1.0, 4.0]);
        assert!(u.contains(a.lower()));
        assert!(u.contains(b.upper()));
    }

    #[test]
    fn center_and_extent() {
        let aabb = Aabb::new(Point::new([0.0, -2.0]), Point::new([4.0, 2.0]));
        assert_relative_eq!(aabb.center().coords()[0], 2.0);
        assert_relative_eq!(aabb.center().coords()[1], 0.0);
        assert_relative_eq!(aabb.extent(0), 4.0);
        assert_relative_eq!(aabb.extent(1), 4.0);
    }

    #[test]
    fn degenerate_box_contains_its_point() {
        let p = Point::new([1.0, 2.0]);
        let aabb = Aabb::new(p, p);
        assert!(aabb.contains(&p));
        assert_eq!(aabb.extent(0), 0.0);
        assert_eq!(aabb.center(), p);
    }
}
