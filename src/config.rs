//! Island map configuration and builder
//!
//! A [`MapConfig`] fully determines a map: the same configuration always
//! regenerates the identical island.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::terrain::WATERSHED_MAX_ITERATIONS;

pub use crate::terrain::IslandShapeKind;

/// Most sites a map may be generated with
pub const MAX_POINT_COUNT: usize = 100_000;
/// Most Lloyd relaxation passes the builder accepts
pub const MAX_LLOYD_ITERATIONS: usize = 20;

/// Configuration for deterministic island generation
///
/// Only the configuration needs to be stored; the map is regenerated from it.
///
/// # Example
///
/// ```rust
/// use voronoi_island::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .point_count(300)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MapConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Seed for the single random stream the whole pipeline draws from
    pub seed: u64,

    /// Number of sites, and so of terrain polygons
    pub point_count: usize,

    /// Map width in world units
    pub width: f64,
    /// Map height in world units
    pub height: f64,

    /// Fraction of water corners at which a polygon becomes water
    pub lake_threshold: f64,

    /// Number of Lloyd relaxation passes over the random sites
    ///
    /// - 0: raw uniform points (clumpy)
    /// - 2: default, evens out most clumps
    /// - more: diminishing returns
    pub lloyd_iterations: usize,

    /// Stop relaxing once no site moves farther than this, in world units
    ///
    /// 0.0 runs every configured pass.
    pub lloyd_convergence: f64,

    pub island_shape: IslandShapeKind,

    /// Cap on watershed propagation passes
    pub watershed_max_iterations: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfigBuilder::new().into_config(rand::random())
    }
}

/// Builder for [`MapConfig`] with validation
///
/// # Example
///
/// ```rust
/// use voronoi_island::*;
///
/// // Use defaults
/// let config = MapConfigBuilder::new().build().unwrap();
/// assert_eq!(config.point_count, 500);
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .size(80.0, 60.0)
///     .unwrap()
///     .lake_threshold(0.5)
///     .unwrap()
///     .island_shape(IslandShapeKind::Radial)
///     .build()
///     .unwrap();
/// assert_eq!(config.width, 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u64>,
    point_count: usize,
    width: f64,
    height: f64,
    lake_threshold: f64,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
    island_shape: IslandShapeKind,
    watershed_max_iterations: usize,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - point_count: 500
    /// - size: 50 × 50
    /// - lake_threshold: 0.3
    /// - lloyd_iterations: 2
    /// - lloyd_convergence: 0.0 (run all passes)
    /// - island_shape: Perlin
    /// - watershed_max_iterations: 100
    pub fn new() -> Self {
        Self {
            seed: None,
            point_count: 500,
            width: 50.0,
            height: 50.0,
            lake_threshold: 0.3,
            lloyd_iterations: 2,
            lloyd_convergence: 0.0,
            island_shape: IslandShapeKind::default(),
            watershed_max_iterations: WATERSHED_MAX_ITERATIONS,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0 or above [`MAX_POINT_COUNT`]
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        if count == 0 || count > MAX_POINT_COUNT {
            return Err(MapError::InvalidConfig(format!(
                "point count must be in 1..={MAX_POINT_COUNT} (got {count})"
            )));
        }
        self.point_count = count;
        Ok(self)
    }

    /// Set the map rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless both sides are finite and positive
    pub fn size(mut self, width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(MapError::InvalidConfig(format!(
                "map size must be finite and positive (got {width} x {height})"
            )));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the fraction of water corners that makes a polygon a lake
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless threshold is in `(0, 1]`
    pub fn lake_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(MapError::InvalidConfig(format!(
                "lake threshold must be in (0, 1] (got {threshold})"
            )));
        }
        self.lake_threshold = threshold;
        Ok(self)
    }

    /// Set the number of Lloyd relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > [`MAX_LLOYD_ITERATIONS`]
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(MapError::InvalidConfig(format!(
                "Lloyd iterations must be <= {MAX_LLOYD_ITERATIONS} (got {iterations})"
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the displacement under which relaxation stops early
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or NaN
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !(threshold >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {threshold})"
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    pub fn island_shape(mut self, shape: IslandShapeKind) -> Self {
        self.island_shape = shape;
        self
    }

    /// Set the cap on watershed passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations is 0
    pub fn watershed_max_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations == 0 {
            return Err(MapError::InvalidConfig(
                "watershed iterations must be >= 1".to_string(),
            ));
        }
        self.watershed_max_iterations = iterations;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    pub fn build(self) -> Result<MapConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        Ok(self.into_config(seed))
    }

    fn into_config(self, seed: u64) -> MapConfig {
        MapConfig {
            seed,
            point_count: self.point_count,
            width: self.width,
            height: self.height,
            lake_threshold: self.lake_threshold,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
            island_shape: self.island_shape,
            watershed_max_iterations: self.watershed_max_iterations,
        }
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MapConfigBuilder::new().build().unwrap();
        assert_eq!(config.point_count, 500);
        assert_eq!((config.width, config.height), (50.0, 50.0));
        assert_eq!(config.lake_threshold, 0.3);
        assert_eq!(config.lloyd_iterations, 2);
        assert_eq!(config.island_shape, IslandShapeKind::Perlin);
        assert_eq!(config.watershed_max_iterations, 100);
    }

    #[test]
    fn test_builder_custom() {
        let config = MapConfigBuilder::new()
            .seed(42)
            .point_count(1_000)
            .unwrap()
            .size(120.0, 80.0)
            .unwrap()
            .lloyd_iterations(3)
            .unwrap()
            .lloyd_convergence(0.05)
            .unwrap()
            .island_shape(IslandShapeKind::Square)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.point_count, 1_000);
        assert_eq!(config.width, 120.0);
        assert_eq!(config.height, 80.0);
        assert_eq!(config.lloyd_iterations, 3);
        assert_eq!(config.lloyd_convergence, 0.05);
        assert_eq!(config.island_shape, IslandShapeKind::Square);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(MapConfigBuilder::new().point_count(0).is_err());
        assert!(MapConfigBuilder::new().point_count(MAX_POINT_COUNT + 1).is_err());
        assert!(MapConfigBuilder::new().size(0.0, 10.0).is_err());
        assert!(MapConfigBuilder::new().size(10.0, f64::INFINITY).is_err());
        assert!(MapConfigBuilder::new().lake_threshold(0.0).is_err());
        assert!(MapConfigBuilder::new().lake_threshold(1.5).is_err());
        assert!(MapConfigBuilder::new().lake_threshold(f64::NAN).is_err());
        assert!(MapConfigBuilder::new().lloyd_iterations(21).is_err());
        assert!(MapConfigBuilder::new().lloyd_convergence(-1.0).is_err());
        assert!(MapConfigBuilder::new().watershed_max_iterations(0).is_err());
    }

    #[test]
    fn test_builder_accepts_bounds() {
        assert!(MapConfigBuilder::new().lake_threshold(1.0).is_ok());
        assert!(MapConfigBuilder::new().lloyd_iterations(0).is_ok());
        assert!(MapConfigBuilder::new().point_count(1).is_ok());
    }

    #[test]
    fn test_error_message() {
        let err = MapConfigBuilder::new().lloyd_iterations(25).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: Lloyd iterations must be <= 20 (got 25)"
        );
    }

    #[test]
    fn test_seed_is_kept() {
        let a = MapConfigBuilder::new().seed(7).build().unwrap();
        let b = MapConfigBuilder::new().seed(7).build().unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = MapConfigBuilder::new()
            .seed(12345)
            .island_shape(IslandShapeKind::Radial)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
