//! Example: Generate an island map
//!
//! Demonstrates the full pipeline and prints a summary of the result.
//! Set `RUST_LOG=voronoi_island=debug` to see each stage.

use voronoi_island::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Island Map Generation Example");
    println!("=============================\n");

    let config = MapConfigBuilder::new()
        .seed(42)
        .point_count(1_000)
        .unwrap()
        .size(100.0, 100.0)
        .unwrap()
        .island_shape(IslandShapeKind::Radial)
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Points: {}", config.point_count);
    println!("  Size: {} x {}", config.width, config.height);
    println!("  Lloyd Iterations: {}", config.lloyd_iterations);
    println!("  Island Shape: {:?}", config.island_shape);
    println!();

    println!("Generating map...");
    let map = IslandMap::generate(config).expect("Failed to generate map");
    let report = map.terrain_report();
    println!(
        "Generated {} polygons, {} corners, {} edges\n",
        map.center_count(),
        map.corners().len(),
        map.edges().len()
    );

    println!("Terrain:");
    println!("  Ocean polygons: {}", report.ocean_centers);
    println!("  Lake polygons: {}", report.lake_centers);
    println!("  Coast polygons: {}", report.coast_centers);
    println!(
        "  Watersheds: {} passes, converged={}",
        report.watershed_passes, report.watershed_converged
    );
    println!(
        "  Rivers: {} of {} trials carved, {} river edges",
        report.rivers_carved,
        report.river_trials,
        river_segments(&map).len()
    );
    println!();

    let mut counts: Vec<(Biome, usize)> = map.biome_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    println!("Biomes:");
    for (biome, count) in counts {
        println!("  {:<26} {:>5}  #{:06x}", format!("{biome:?}"), count, biome.color());
    }

    let mesh = generate_mesh(&map, &BiomeColorMapper);
    println!(
        "\nMesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let query_point = DVec2::new(50.0, 50.0);
    if let Some(index) = map.find_center_at(query_point) {
        let center = &map.centers()[index];
        println!(
            "Polygon under ({}, {}): #{} {:?}, elevation {:.2}, moisture {:.2}",
            query_point.x, query_point.y, index, center.biome, center.elevation, center.moisture
        );
    }
}
