//! Polygonal island map generation
//!
//! Builds a Voronoi diagram of random sites with Fortune's sweep, turns it
//! into a polygon/corner/edge graph, and simulates terrain over it: elevation,
//! ocean, lakes, rivers, moisture and biomes. The output is engine-agnostic.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_island::*;
//!
//! // Generate an island
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .point_count(2_000).unwrap()
//!     .island_shape(IslandShapeKind::Radial)
//!     .build().unwrap();
//!
//! let map = IslandMap::generate(config).unwrap();
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&map, &BiomeColorMapper);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-polygon lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and the graph

// Modules
pub mod config;
pub mod error;
pub mod generation;
pub mod geometry;
pub mod graph;
pub mod map;
pub mod mesh;
pub mod terrain;
pub mod voronoi;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{IslandShapeKind, MapConfig, MapConfigBuilder};
pub use error::{MapError, Result};
pub use generation::LloydOptions;
pub use geometry::{Bounds, LineSegment};
pub use graph::{Center, CenterIdx, Corner, CornerIdx, Edge, EdgeIdx, Graph};
pub use map::IslandMap;
pub use mesh::{
    generate_mesh, generate_mesh_with_visibility, river_segments, BiomeColorMapper, ColorMapper,
    CustomColorMapper, MeshData, RiverSegment, TerrainColor,
};
pub use terrain::{
    Biome, IslandShape, PerlinConfig, PerlinIsland, RadialIsland, SquareIsland, TerrainReport,
};
pub use voronoi::{KruskalKind, Voronoi};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
