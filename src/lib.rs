//! # pointloc
//!
//! A library for locating points in d-dimensional
//! [simplicial meshes](https://en.wikipedia.org/wiki/Simplicial_complex)
//! using a bounding volume hierarchy (BVH).
//!
//! # Features
//!
//! - d-dimensional point location via barycentric containment tests
//! - BVH acceleration with configurable leaf capacity and split strategy
//!   (mean or median partitioning)
//! - Generic floating-point coordinate types (supports `f32`, `f64`, and
//!   other types implementing `CoordinateScalar`)
//! - Deterministic tree construction: the same mesh and configuration
//!   always produce the same tree
//! - Serialization/Deserialization with [serde](https://serde.rs); the
//!   tree is derived data and is rebuilt on load, never persisted
//!
//! # Basic Usage
//!
//! This library handles **arbitrary dimensions**. Here's a 2D example with
//! a unit square split into two triangles:
//!
//! ```rust
//! use pointloc::prelude::*;
//!
//! let vertices = vec![
//!     Point::new([0.0, 0.0]),
//!     Point::new([1.0, 0.0]),
//!     Point::new([1.0, 1.0]),
//!     Point::new([0.0, 1.0]),
//! ];
//! // Each simplex row has D + 1 vertex indices.
//! let simplices = [[0, 1, 2], [0, 2, 3]];
//!
//! let locator: BvhLocator<f64, 2> =
//!     BvhLocator::with_default_config(vertices, &simplices).unwrap();
//!
//! // Below the diagonal: triangle 0. Above: triangle 1. Outside: None.
//! assert_eq!(locator.locate(&Point::new([0.7, 0.2])), Some(0));
//! assert_eq!(locator.locate(&Point::new([0.2, 0.7])), Some(1));
//! assert_eq!(locator.locate(&Point::new([5.0, 5.0])), None);
//! ```
//!
//! # Configuration
//!
//! The tree shape is controlled by [`BvhConfig`](core::config::BvhConfig):
//! `bin_number` caps the number of simplices per leaf, and the
//! [`SplitStrategy`](core::config::SplitStrategy) chooses between splitting
//! at the midpoint of the center extent (`Mean`) or at the exact median
//! (`Median`, which guarantees balanced subtrees):
//!
//! ```rust
//! use pointloc::prelude::*;
//!
//! let vertices = vec![
//!     Point::new([0.0, 0.0]),
//!     Point::new([1.0, 0.0]),
//!     Point::new([1.0, 1.0]),
//!     Point::new([0.0, 1.0]),
//! ];
//! let config = BvhConfig::new(4, SplitStrategy::Median);
//! let locator: BvhLocator<f64, 2> =
//!     BvhLocator::new(vertices, &[[0, 1, 2], [0, 2, 3]], config).unwrap();
//! assert!(locator.tree().is_some());
//! ```
//!
//! See <https://docs.rs/pointloc> for the latest documentation.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

/// The `core` module contains the mesh model, the BVH, and the point-location algorithms.
///
/// It includes the `Mesh` struct holding vertices and simplices, the `BvhTree` node arena,
/// and the `BvhLocator` facade that ties construction and querying together.
pub mod core {
    /// Tree construction and query algorithms
    pub mod algorithms {
        /// Recursive BVH construction over simplex centers
        pub mod build;
        /// Iterative stack-based point-location queries
        pub mod locate;
    }
    pub mod bvh;
    pub mod config;
    /// Per-simplex geometry cache (AABBs and centers)
    pub mod index;
    pub mod locator;
    pub mod mesh;
    // Re-export the `core` modules.
    pub use bvh::*;
    pub use config::*;
    pub use index::*;
    pub use locator::*;
    pub use mesh::*;
}

/// Contains geometric types including the `Point` struct and the barycentric containment test.
///
/// The geometry module provides generic floating-point coordinate support
/// (for `f32`, `f64`, and other types implementing `CoordinateScalar`) with
/// proper NaN handling, validation, and hashing.
pub mod geometry {
    pub mod aabb;
    /// Barycentric point-in-simplex membership testing
    pub mod barycentric;
    pub mod point;
    /// Traits module containing coordinate abstractions and reusable trait definitions.
    ///
    /// This module contains supporting traits for validation (`FiniteCheck`),
    /// equality comparison (`OrderedEq`), ordering (`OrderedCmp`), and hashing
    /// (`HashCoordinate`) of floating-point coordinate values.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use aabb::*;
    pub use barycentric::*;
    pub use point::*;
    pub use traits::*;
}

/// A prelude module that re-exports commonly used types.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        algorithms::locate::LocateStats,
        bvh::{BvhNode, BvhTree},
        config::{BvhConfig, ConfigValidationError, SplitStrategy},
        index::SimplexGeometry,
        locator::{BvhLocator, ConstructionError, QueryError},
        mesh::{Mesh, MeshValidationError},
    };

    // Re-export from geometry
    pub use crate::geometry::{
        aabb::Aabb, barycentric::point_in_simplex, barycentric::BarycentricScratch, point::Point,
        traits::coordinate::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
