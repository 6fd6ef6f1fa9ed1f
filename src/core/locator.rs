//! High-level point-location facade.
//!
//! [`BvhLocator`] owns the mesh, the per-simplex geometry cache, and the
//! acceleration tree, and exposes the query API. The tree is derived data:
//! serialization persists only the mesh and the configuration, and
//! deserialization rebuilds the tree from scratch, so a snapshot can never
//! disagree with its mesh.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::core::algorithms::build::build_tree;
use crate::core::algorithms::locate::{locate_point, locate_point_with_stats, LocateStats};
use crate::core::bvh::BvhTree;
use crate::core::config::{BvhConfig, ConfigValidationError};
use crate::core::index::SimplexGeometry;
use crate::core::mesh::{Mesh, MeshValidationError};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Errors that can occur while constructing a [`BvhLocator`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    /// The configuration was rejected before any mesh work started.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),
    /// The vertex/simplex input does not describe a valid mesh.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeshValidationError),
}

/// Errors that can occur while querying through the untyped slice entry
/// point.
///
/// The typed [`BvhLocator::locate`] cannot fail: a `Point<T, D>` always has
/// the right number of coordinates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query slice length does not match the mesh dimension.
    #[error("Query has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        /// The mesh dimension `D`.
        expected: usize,
        /// The number of coordinates supplied.
        actual: usize,
    },
}

/// A point locator for a `D`-dimensional simplicial mesh, backed by a
/// bounding volume hierarchy.
///
/// The mesh and the configuration are fixed at construction; queries take
/// `&self` and keep all mutable state call-local, so a locator can be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use pointloc::core::config::BvhConfig;
/// use pointloc::core::locator::BvhLocator;
/// use pointloc::geometry::point::Point;
///
/// let vertices = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([1.0, 1.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let simplices = [[0, 1, 2], [0, 2, 3]];
/// let locator = BvhLocator::new(vertices, &simplices, BvhConfig::default())?;
///
/// assert_eq!(locator.locate(&Point::new([0.7, 0.2])), Some(0));
/// assert_eq!(locator.locate(&Point::new([5.0, 5.0])), None);
/// # Ok::<(), pointloc::core::locator::ConstructionError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BvhLocator<T, const D: usize>
where
    T: CoordinateScalar,
{
    mesh: Mesh<T, D>,
    geometry: SimplexGeometry<T, D>,
    config: BvhConfig,
    tree: Option<BvhTree<T, D>>,
}

impl<T, const D: usize> BvhLocator<T, D>
where
    T: CoordinateScalar,
{
    /// Builds a locator from raw mesh data.
    ///
    /// Each simplex row must hold exactly `D + 1` vertex indices, all in
    /// range. The configuration is validated first, then the mesh, then
    /// the tree is built eagerly.
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidConfig` when `bin_number` is
    /// zero, or `ConstructionError::InvalidMesh` when a simplex row has
    /// the wrong arity or references a missing vertex.
    pub fn new<R>(
        vertices: Vec<Point<T, D>>,
        simplices: &[R],
        config: BvhConfig,
    ) -> Result<Self, ConstructionError>
    where
        R: AsRef<[usize]>,
    {
        config.validate()?;
        let mesh = Mesh::new(vertices, simplices)?;
        let geometry = SimplexGeometry::from_mesh(&mesh);
        let tree = build_tree(&geometry, &config);
        debug!(
            nr_simplices = mesh.nr_simplices(),
            nodes = tree.as_ref().map_or(0, BvhTree::node_count),
            "Constructed BVH locator"
        );
        Ok(Self {
            mesh,
            geometry,
            config,
            tree,
        })
    }

    /// Builds a locator with the default configuration
    /// (`bin_number = 10`, mean splits).
    ///
    /// # Errors
    ///
    /// Returns `ConstructionError::InvalidMesh` when the input does not
    /// describe a valid mesh.
    pub fn with_default_config<R>(
        vertices: Vec<Point<T, D>>,
        simplices: &[R],
    ) -> Result<Self, ConstructionError>
    where
        R: AsRef<[usize]>,
    {
        Self::new(vertices, simplices, BvhConfig::default())
    }

    /// The underlying mesh.
    #[must_use]
    pub const fn mesh(&self) -> &Mesh<T, D> {
        &self.mesh
    }

    /// The configuration the tree was built with.
    #[must_use]
    pub const fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// The acceleration tree, or `None` for an empty mesh.
    #[must_use]
    pub const fn tree(&self) -> Option<&BvhTree<T, D>> {
        self.tree.as_ref()
    }
}

impl<T, const D: usize> BvhLocator<T, D>
where
    T: CoordinateScalar + nalgebra::Scalar,
{
    /// Finds the index of a simplex containing `point`.
    ///
    /// Returns `None` when the point lies outside every simplex (or the
    /// mesh is empty). A point on a shared face is reported as a member of
    /// one of its incident simplices; which one is an implementation
    /// detail, though it is stable for a given locator.
    #[must_use]
    pub fn locate(&self, point: &Point<T, D>) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        locate_point(&self.mesh, &self.geometry, tree, point)
    }

    /// [`Self::locate`] with traversal counters, for diagnostics.
    #[must_use]
    pub fn locate_with_stats(&self, point: &Point<T, D>) -> (Option<usize>, LocateStats) {
        match self.tree.as_ref() {
            Some(tree) => locate_point_with_stats(&self.mesh, &self.geometry, tree, point),
            None => (None, LocateStats::default()),
        }
    }

    /// Locates a point given as a bare coordinate slice.
    ///
    /// This is the entry point for callers whose query dimension is only
    /// known at runtime; [`Self::locate`] is preferable when the dimension
    /// is known at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DimensionMismatch`] when `coords.len() != D`.
    pub fn locate_slice(&self, coords: &[T]) -> Result<Option<usize>, QueryError> {
        if coords.len() != D {
            return Err(QueryError::DimensionMismatch {
                expected: D,
                actual: coords.len(),
            });
        }
        let mut array = [T::default(); D];
        array.copy_from_slice(coords);
        Ok(self.locate(&Point::new(array)))
    }
}

/// On-disk form: mesh data plus configuration, never the tree.
#[derive(serde::Deserialize)]
#[serde(bound = "T: CoordinateScalar")]
struct LocatorSnapshot<T, const D: usize>
where
    T: CoordinateScalar,
{
    vertices: Vec<Point<T, D>>,
    simplices: Vec<Vec<usize>>,
    config: BvhConfig,
}

impl<T, const D: usize> Serialize for BvhLocator<T, D>
where
    T: CoordinateScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BvhLocator", 3)?;
        state.serialize_field("vertices", self.mesh.vertices())?;
        state.serialize_field("simplices", &self.mesh.simplex_rows())?;
        state.serialize_field("config", &self.config)?;
        state.end()
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for BvhLocator<T, D>
where
    T: CoordinateScalar,
{
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let snapshot = LocatorSnapshot::<T, D>::deserialize(deserializer)?;
        Self::new(snapshot.vertices, &snapshot.simplices, snapshot.config)
            .map_err(serde::de::Error::custom)
    }
}
