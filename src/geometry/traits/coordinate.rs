//! Scalar traits for coordinate values.
//!
//! Point-location code needs a handful of guarantees from its scalar type
//! beyond plain floating-point arithmetic: NaN-aware equality (so points can
//! live in hash-based collections), consistent hashing of floating-point
//! values, and finiteness validation. These are split into small helper
//! traits and consolidated into the [`CoordinateScalar`] alias used as the
//! bound throughout the crate.
//!
//! # Special Floating-Point Equality Semantics
//!
//! `NaN` values are treated as equal to themselves, which differs from IEEE
//! 754. This makes [`Point`](crate::geometry::point::Point) usable as a key
//! in hash maps and sets. If you need IEEE semantics, compare the raw
//! coordinates directly.

use num_traits::Float;
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Errors that can occur during coordinate validation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// A coordinate value is invalid (NaN or infinite).
    #[error(
        "Invalid coordinate at index {coordinate_index} in dimension {dimension}: {coordinate_value}"
    )]
    InvalidCoordinate {
        /// Index of the invalid coordinate.
        coordinate_index: usize,
        /// Value of the invalid coordinate, as a string.
        coordinate_value: String,
        /// The dimensionality of the coordinate system.
        dimension: usize,
    },
}

/// Default tolerance for f32 floating-point comparisons.
pub const DEFAULT_TOLERANCE_F32: f32 = 1e-6;

/// Default tolerance for f64 floating-point comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-12;

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Helper trait for checking finiteness of coordinates.
///
/// # Examples
///
/// ```
/// use pointloc::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(3.14f64.is_finite_generic());
/// assert!(!f64::NAN.is_finite_generic());
/// assert!(!f64::INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns true if the value is finite (not NaN or infinite).
    fn is_finite_generic(&self) -> bool;
}

macro_rules! impl_finite_check {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(float: f32, f64);

/// NaN-aware equality comparison.
///
/// Treats NaN values as equal to themselves, unlike the default
/// floating-point `==` where `NaN != NaN`.
///
/// # Examples
///
/// ```
/// use pointloc::geometry::traits::coordinate::OrderedEq;
///
/// assert!(1.0f64.ordered_eq(&1.0f64));
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// assert!(0.0f64.ordered_eq(&(-0.0f64)));
/// ```
pub trait OrderedEq {
    /// Compares two values for equality using ordered comparison semantics.
    fn ordered_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_ordered_eq {
    (float: $($t:ty),*) => {
        $(
            impl OrderedEq for $t {
                #[inline(always)]
                fn ordered_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }
        )*
    };
}

impl_ordered_eq!(float: f32, f64);

/// NaN-aware total ordering for coordinate values.
///
/// Delegates to [`OrderedFloat`] so that all values, including NaN, have a
/// consistent total order. Used for lexicographic point comparison and for
/// sorting leaf candidates during traversal.
pub trait OrderedCmp: Sized {
    /// Compares two values with a total order that places NaN last.
    fn ordered_cmp(&self, other: &Self) -> std::cmp::Ordering;
}

macro_rules! impl_ordered_cmp {
    (float: $($t:ty),*) => {
        $(
            impl OrderedCmp for $t {
                #[inline(always)]
                fn ordered_cmp(&self, other: &Self) -> std::cmp::Ordering {
                    OrderedFloat(*self).cmp(&OrderedFloat(*other))
                }
            }
        )*
    };
}

impl_ordered_cmp!(float: f32, f64);

/// Consistent hashing of floating-point coordinate values.
///
/// Uses [`OrderedFloat`] internally so all NaN bit patterns hash alike.
pub trait HashCoordinate {
    /// Hashes a single coordinate value using the provided hasher.
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_hash_coordinate {
    (float: $($t:ty),*) => {
        $(
            impl HashCoordinate for $t {
                #[inline(always)]
                fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                    OrderedFloat(*self).hash(state);
                }
            }
        )*
    };
}

impl_hash_coordinate!(float: f32, f64);

// =============================================================================
// SCALAR TRAIT ALIAS
// =============================================================================

/// Trait alias for the scalar type requirements in coordinate systems.
///
/// Consolidates every bound a scalar needs to participate in mesh geometry:
/// floating-point arithmetic, NaN-aware equality/ordering/hashing,
/// finiteness checks, and serde support.
///
/// # Examples
///
/// ```rust
/// use pointloc::geometry::traits::coordinate::CoordinateScalar;
///
/// fn centroid<T: CoordinateScalar>(values: &[T]) -> T {
///     let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
///     sum / T::from(values.len()).unwrap()
/// }
///
/// assert_eq!(centroid(&[1.0f64, 3.0]), 2.0);
/// ```
pub trait CoordinateScalar:
    Float
    + OrderedEq
    + OrderedCmp
    + HashCoordinate
    + FiniteCheck
    + Default
    + Debug
    + Serialize
    + DeserializeOwned
{
    /// Returns the default comparison tolerance for this scalar type.
    fn default_tolerance() -> Self;
}

impl CoordinateScalar for f32 {
    #[inline]
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F32
    }
}

impl CoordinateScalar for f64 {
    #[inline]
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F64
    }
}
