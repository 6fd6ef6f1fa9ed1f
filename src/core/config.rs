//! Build configuration for the BVH.
//!
//! The leaf capacity (`bin_number`) and the partition strategy are explicit
//! constructor parameters, fixed for the lifetime of one tree. There are no
//! process-wide defaults; [`BvhConfig::default`] exists only as a convenience
//! for callers without tuning requirements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the builder partitions a node's members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// Partition at the midpoint of the center extent. Falls back to the
    /// exact median whenever the midpoint split leaves one side empty.
    Mean,
    /// Always split at the exact median of the centers, guaranteeing a
    /// halving at every level.
    Median,
}

/// Error parsing a [`SplitStrategy`] from its persisted string form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unknown split strategy {input:?}: expected \"Mean\" or \"Median\"")]
pub struct StrategyParseError {
    /// The rejected input string.
    pub input: String,
}

impl FromStr for SplitStrategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mean" => Ok(Self::Mean),
            "Median" => Ok(Self::Median),
            other => Err(StrategyParseError {
                input: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => f.write_str("Mean"),
            Self::Median => f.write_str("Median"),
        }
    }
}

/// Errors surfaced while validating a [`BvhConfig`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The leaf capacity must be at least 1.
    #[error("bin_number must be >= 1, got {bin_number}")]
    InvalidBinNumber {
        /// The rejected capacity.
        bin_number: usize,
    },
}

/// Configuration of one BVH build: leaf capacity and partition strategy.
///
/// # Examples
///
/// ```rust
/// use pointloc::core::config::{BvhConfig, SplitStrategy};
///
/// let config = BvhConfig::new(8, SplitStrategy::Median);
/// assert!(config.validate().is_ok());
///
/// let bad = BvhConfig::new(0, SplitStrategy::Mean);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BvhConfig {
    /// Leaf capacity threshold: a node with at most this many simplices
    /// becomes a leaf. Must be at least 1.
    pub bin_number: usize,
    /// Partition strategy.
    pub strategy: SplitStrategy,
}

impl BvhConfig {
    /// Creates a configuration. Call [`BvhConfig::validate`] (or construct a
    /// locator, which validates for you) before building.
    #[inline]
    #[must_use]
    pub const fn new(bin_number: usize, strategy: SplitStrategy) -> Self {
        Self {
            bin_number,
            strategy,
        }
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::InvalidBinNumber`] if
    /// `bin_number < 1`.
    pub const fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.bin_number < 1 {
            return Err(ConfigValidationError::InvalidBinNumber {
                bin_number: self.bin_number,
            });
        }
        Ok(())
    }
}

impl Default for BvhConfig {
    /// Ten simplices per leaf, Mean partition.
    fn default() -> Self {
        Self {
            bin_number: 10,
            strategy: SplitStrategy::Mean,
        }
    }
}
