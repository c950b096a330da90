//! IslandMap main structure

use std::collections::{HashMap, HashSet};

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::generation::generate_sites;
use crate::geometry::Bounds;
use crate::graph::{build_graph, Center, CenterIdx, Corner, Edge, Graph};
use crate::terrain::{simulate, Biome, IslandShape, TerrainReport, WATERSHED_MAX_ITERATIONS};
use crate::voronoi::Voronoi;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A fully simulated island
///
/// Holds the polygon graph with every terrain attribute filled in. The map is
/// read-only once built; regenerate it from its configuration to change it.
///
/// # Examples
///
/// ```
/// use voronoi_island::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .point_count(200)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let map = IslandMap::generate(config).unwrap();
/// println!("Generated {} polygons", map.center_count());
///
/// let center = map.get_center(0).unwrap();
/// println!("Polygon 0 is {:?}", center.biome);
/// ```
#[derive(Clone)]
pub struct IslandMap {
    /// Configuration used to generate this map, if it came from one
    config: Option<MapConfig>,

    graph: Graph,

    report: TerrainReport,

    /// Nearest-center lookup (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl IslandMap {
    /// Generate a map from configuration
    ///
    /// One random stream seeded from `config.seed` feeds site placement, the
    /// island shape and river sources, in that order.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_island::*;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(12345)
    ///     .point_count(300)
    ///     .unwrap()
    ///     .island_shape(IslandShapeKind::Radial)
    ///     .build()
    ///     .unwrap();
    ///
    /// let map = IslandMap::generate(config).unwrap();
    /// assert_eq!(map.center_count(), 300);
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let points = generate_sites(&config, &mut rng)?;
        let shape = config.island_shape.build(&mut rng);
        let bounds = Bounds::new(config.width, config.height)?;

        let mut map = Self::build(
            &points,
            None,
            bounds,
            config.lake_threshold,
            config.watershed_max_iterations,
            shape.as_ref(),
            &mut rng,
        )?;
        map.config = Some(config);

        info!(
            target: "voronoi_island::map",
            seed = config.seed,
            shape = ?config.island_shape,
            centers = map.graph.centers.len(),
            corners = map.graph.corners.len(),
            edges = map.graph.edges.len(),
            land = map.graph.centers.iter().filter(|c| c.is_land()).count(),
            rivers = map.graph.edges.iter().filter(|e| e.river > 0).count(),
            "map.generated"
        );
        Ok(map)
    }

    /// Build a map over caller-supplied sites
    ///
    /// `colors` is an optional payload per point, copied onto the centers.
    /// `rng` is only drawn from for river sources.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `lake_threshold` is outside `(0, 1]`
    /// - `DegenerateBounds` for a non-positive rectangle
    /// - any site error: empty input, duplicate or out-of-bounds points, or a
    ///   color list of the wrong length
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_island::*;
    /// use glam::DVec2;
    /// use rand::SeedableRng;
    ///
    /// let points = [DVec2::new(2.0, 2.0), DVec2::new(8.0, 3.0), DVec2::new(5.0, 8.0)];
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    /// let map = IslandMap::from_points(&points, None, 10.0, 10.0, 0.3, &SquareIsland, &mut rng)
    ///     .unwrap();
    /// assert_eq!(map.center_count(), 3);
    /// ```
    pub fn from_points<R: Rng + ?Sized>(
        points: &[DVec2],
        colors: Option<&[u32]>,
        width: f64,
        height: f64,
        lake_threshold: f64,
        shape: &dyn IslandShape,
        rng: &mut R,
    ) -> Result<Self> {
        let bounds = Bounds::new(width, height)?;
        Self::build(
            points,
            colors,
            bounds,
            lake_threshold,
            WATERSHED_MAX_ITERATIONS,
            shape,
            rng,
        )
    }

    fn build<R: Rng + ?Sized>(
        points: &[DVec2],
        colors: Option<&[u32]>,
        bounds: Bounds,
        lake_threshold: f64,
        watershed_max_iterations: usize,
        shape: &dyn IslandShape,
        rng: &mut R,
    ) -> Result<Self> {
        if !(lake_threshold > 0.0 && lake_threshold <= 1.0) {
            return Err(MapError::InvalidConfig(format!(
                "lake threshold must be in (0, 1] (got {lake_threshold})"
            )));
        }

        // Sweep scaffolding is dropped once the graph exists.
        let mut graph = {
            let voronoi = Voronoi::new(points, colors, bounds)?;
            build_graph(&voronoi)
        };
        let report = simulate(&mut graph, shape, lake_threshold, watershed_max_iterations, rng);

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<DVec2> = graph.centers.iter().map(|c| c.point).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config: None,
            graph,
            report,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Configuration this map was generated from
    ///
    /// `None` for maps built with [`IslandMap::from_points`].
    #[inline]
    pub fn config(&self) -> Option<&MapConfig> {
        self.config.as_ref()
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.graph.bounds
    }

    #[inline]
    pub fn centers(&self) -> &[Center] {
        &self.graph.centers
    }

    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.graph.corners
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    #[inline]
    pub fn center_count(&self) -> usize {
        self.graph.centers.len()
    }

    /// Counters collected while simulating the terrain
    #[inline]
    pub fn terrain_report(&self) -> &TerrainReport {
        &self.report
    }

    /// Get a center by index
    ///
    /// # Errors
    ///
    /// Returns `CenterNotFound` if the index is out of range.
    pub fn get_center(&self, index: CenterIdx) -> Result<&Center> {
        self.graph
            .centers
            .get(index)
            .ok_or(MapError::CenterNotFound(index))
    }

    /// Neighbor indices of a center, empty for an invalid index
    pub fn get_neighbors(&self, index: CenterIdx) -> &[CenterIdx] {
        self.graph
            .centers
            .get(index)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the center whose polygon contains `p`
    ///
    /// Scans every polygon with an odd-even test. Points exactly on a shared
    /// outline may land in either polygon.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_island::*;
    /// # use glam::DVec2;
    /// # let config = MapConfigBuilder::new().seed(3).point_count(100).unwrap().build().unwrap();
    /// let map = IslandMap::generate(config).unwrap();
    /// let center = map.find_center_at(DVec2::new(25.0, 25.0));
    /// assert!(center.is_some());
    /// ```
    pub fn find_center_at(&self, p: DVec2) -> Option<CenterIdx> {
        (0..self.graph.centers.len()).find(|&i| self.graph.point_inside(i, p))
    }

    /// Find the center nearest to `p` (requires spatial-index feature)
    ///
    /// Inside the map this is the polygon containing `p`, in O(log n).
    #[cfg(feature = "spatial-index")]
    pub fn find_nearest_center(&self, p: DVec2) -> CenterIdx {
        self.spatial_index.find_nearest(p)
    }

    /// Centers within `hops` neighbor steps of `center`, including itself
    ///
    /// Returned in breadth-first order: `center`, then each ring outward in
    /// adjacency order. Empty if `center` is invalid.
    pub fn find_centers_within_hops(&self, center: CenterIdx, hops: usize) -> Vec<CenterIdx> {
        if center >= self.graph.centers.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        visited.insert(center);
        let mut found = vec![center];
        let mut frontier = 0;

        for _ in 0..hops {
            let ring_end = found.len();
            for i in frontier..ring_end {
                for &neighbor in self.get_neighbors(found[i]) {
                    if visited.insert(neighbor) {
                        found.push(neighbor);
                    }
                }
            }
            frontier = ring_end;
        }

        found
    }

    /// Number of polygons per biome
    pub fn biome_counts(&self) -> HashMap<Biome, usize> {
        let mut counts = HashMap::new();
        for center in &self.graph.centers {
            *counts.entry(center.biome).or_insert(0) += 1;
        }
        counts
    }
}
