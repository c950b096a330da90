//! Terrain simulation
//!
//! Turns a bare polygon graph into an island: elevation, water bodies,
//! drainage, rivers, moisture and finally a biome per polygon. The stages run
//! in a fixed order and each reads only what earlier stages wrote.

mod biome;
mod drainage;
mod elevation;
mod island;
mod moisture;
mod perlin;
mod water;

pub use biome::{classify, Biome};
pub use drainage::{RIVER_MAX_ELEVATION, RIVER_MIN_ELEVATION, WATERSHED_MAX_ITERATIONS};
pub use elevation::{ELEVATION_STEP, LAND_STEP, REDISTRIBUTION_SCALE};
pub use island::{
    IslandShape, IslandShapeKind, PerlinIsland, RadialIsland, SquareIsland, ISLAND_FACTOR,
};
pub use moisture::{MOISTURE_DECAY, RIVER_MOISTURE_CAP, RIVER_MOISTURE_PER_VOLUME};
pub use perlin::{perlin_2d, sample_perlin_2d, PerlinConfig};

use rand::Rng;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Headline numbers from one terrain run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainReport {
    pub ocean_centers: usize,
    pub lake_centers: usize,
    pub coast_centers: usize,
    /// Watershed passes actually run
    pub watershed_passes: usize,
    /// False if the pass cap was hit while watersheds were still moving
    pub watershed_converged: bool,
    pub river_trials: usize,
    /// Trials that started inside the river elevation band
    pub rivers_carved: usize,
}

/// Run every terrain stage over `graph`, in order
///
/// `rng` is only drawn from for river sources.
pub(crate) fn simulate<R: Rng + ?Sized>(
    graph: &mut Graph,
    shape: &dyn IslandShape,
    lake_threshold: f64,
    watershed_max_iterations: usize,
    rng: &mut R,
) -> TerrainReport {
    let unreached = elevation::assign_corner_elevations(graph, shape);
    let water_corners = graph.corners.iter().filter(|q| q.water).count();
    debug!(
        target: "voronoi_island::terrain",
        corners = graph.corners.len(),
        water_corners,
        unreached,
        "terrain.elevation.seeded"
    );

    let counts = water::assign_ocean_coast_and_land(graph, lake_threshold);
    debug!(
        target: "voronoi_island::terrain",
        ocean = counts.ocean,
        lakes = counts.lake,
        coast = counts.coast,
        "terrain.water.classified"
    );

    elevation::redistribute_elevations(graph);
    elevation::assign_polygon_elevations(graph);

    drainage::assign_downslopes(graph);
    let (watershed_passes, watershed_converged) =
        drainage::assign_watersheds(graph, watershed_max_iterations);
    debug!(
        target: "voronoi_island::terrain",
        passes = watershed_passes,
        converged = watershed_converged,
        "terrain.watersheds.assigned"
    );

    let (river_trials, rivers_carved) = drainage::create_rivers(graph, rng);
    debug!(
        target: "voronoi_island::terrain",
        trials = river_trials,
        carved = rivers_carved,
        river_edges = graph.edges.iter().filter(|e| e.river > 0).count(),
        "terrain.rivers.carved"
    );

    let sources = moisture::assign_corner_moisture(graph);
    moisture::redistribute_moisture(graph);
    moisture::assign_polygon_moisture(graph);
    debug!(
        target: "voronoi_island::terrain",
        sources,
        "terrain.moisture.assigned"
    );

    biome::assign_biomes(graph);

    TerrainReport {
        ocean_centers: counts.ocean,
        lake_centers: counts.lake,
        coast_centers: counts.coast,
        watershed_passes,
        watershed_converged,
        river_trials,
        rivers_carved,
    }
}
