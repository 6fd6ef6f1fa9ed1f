//! Data and operations on d-dimensional points.
//!
//! [`Point`] is a thin, immutable wrapper over a fixed-size coordinate array
//! `[T; D]`. Equality, ordering, and hashing use the NaN-aware semantics from
//! [`crate::geometry::traits::coordinate`], so points are usable as keys in
//! hash-based collections. Serialization is a bare coordinate sequence.

use crate::geometry::traits::coordinate::{CoordinateScalar, CoordinateValidationError};
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A point in D-dimensional space with coordinates of type `T`.
///
/// Points are immutable once created; the coordinate array is private to
/// prevent modification after instantiation.
///
/// # Examples
///
/// ```rust
/// use pointloc::geometry::point::Point;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// assert_eq!(p.dim(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Point<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// The coordinates of the point.
    coords: [T; D],
}

impl<T, const D: usize> Point<T, D>
where
    T: CoordinateScalar,
{
    /// Creates a new point from an array of coordinates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointloc::geometry::point::Point;
    ///
    /// let p = Point::new([0.5, 0.5, 0.5]);
    /// assert_eq!(p.to_array(), [0.5, 0.5, 0.5]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    /// Returns a reference to the point's coordinates.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Extracts the coordinates as an owned array.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [T; D] {
        self.coords
    }

    /// Returns the coordinate at `index`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.coords.get(index).copied()
    }

    /// Returns the dimensionality of the point.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }

    /// Validates that all coordinates are finite (no NaN or infinity).
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateValidationError::InvalidCoordinate`] naming the
    /// offending coordinate index if any coordinate is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointloc::geometry::point::Point;
    ///
    /// assert!(Point::new([1.0, 2.0]).validate().is_ok());
    /// assert!(Point::new([f64::NAN, 2.0]).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoordinateValidationError> {
        for (index, &coord) in self.coords.iter().enumerate() {
            if !coord.is_finite_generic() {
                return Err(CoordinateValidationError::InvalidCoordinate {
                    coordinate_index: index,
                    coordinate_value: format!("{coord:?}"),
                    dimension: D,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T, const D: usize> Default for Point<T, D>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            coords: [T::default(); D],
        }
    }
}

impl<T, const D: usize> PartialEq for Point<T, D>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a.ordered_eq(b))
    }
}

impl<T, const D: usize> Eq for Point<T, D> where T: CoordinateScalar {}

impl<T, const D: usize> Hash for Point<T, D>
where
    T: CoordinateScalar,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in &self.coords {
            coord.hash_scalar(state);
        }
    }
}

impl<T, const D: usize> PartialOrd for Point<T, D>
where
    T: CoordinateScalar,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, const D: usize> Ord for Point<T, D>
where
    T: CoordinateScalar,
{
    /// Lexicographic comparison using the NaN-aware total order.
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.coords.iter().zip(other.coords.iter()) {
            match a.ordered_cmp(b) {
                Ordering::Equal => {}
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl<T, const D: usize> From<[T; D]> for Point<T, D>
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(coords: [T; D]) -> Self {
        Self::new(coords)
    }
}

impl<T, const D: usize> From<Point<T, D>> for [T; D]
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(point: Point<T, D>) -> Self {
        point.coords
    }
}

// =============================================================================
// SERDE
// =============================================================================

// Serialize as a bare coordinate tuple so persisted meshes read as plain
// arrays of numbers.
impl<T, const D: usize> Serialize for Point<T, D>
where
    T: CoordinateScalar,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(D)?;
        for coord in &self.coords {
            tuple.serialize_element(coord)?;
        }
        tuple.end()
    }
}

struct PointVisitor<T, const D: usize>(PhantomData<T>);

impl<'de, T, const D: usize> Visitor<'de> for PointVisitor<T, D>
where
    T: CoordinateScalar,
{
    type Value = Point<T, D>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "an array of {D} coordinates")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut coords = [T::default(); D];
        for (index, slot) in coords.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| serde::de::Error::invalid_length(index, &self))?;
        }
        Ok(Point::new(coords))
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_tuple(D, PointVisitor(PhantomData))
    }
}
