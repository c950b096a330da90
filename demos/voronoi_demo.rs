//! Example: Raw Voronoi diagram
//!
//! Builds a diagram from a handful of points and prints its edges, regions
//! Delaunay dual, hull and minimum spanning tree, without any terrain.

use voronoi_island::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let points = [
        DVec2::new(2.0, 2.0),
        DVec2::new(8.0, 1.5),
        DVec2::new(5.0, 5.0),
        DVec2::new(1.5, 8.0),
        DVec2::new(8.5, 8.5),
    ];
    let bounds = Bounds::new(10.0, 10.0).unwrap();
    let voronoi = Voronoi::new(&points, None, bounds).expect("Failed to build diagram");

    println!("Voronoi Diagram Example");
    println!("=======================\n");
    println!(
        "{} sites, {} edges ({} visible), {} vertices, {} stale events skipped\n",
        voronoi.sites().len(),
        voronoi.edges().len(),
        voronoi.visible_edges().count(),
        voronoi.vertex_count(),
        voronoi.stale_events_skipped()
    );

    println!("Voronoi edges:");
    for segment in voronoi.voronoi_diagram() {
        println!(
            "  ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            segment.p0.x, segment.p0.y, segment.p1.x, segment.p1.y
        );
    }

    println!("\nRegions:");
    for site in voronoi.sites() {
        let ring: Vec<String> = voronoi
            .region(site.index)
            .iter()
            .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
            .collect();
        println!(
            "  Site {} at ({}, {}), neighbors {:?}: {}",
            site.index,
            site.coord.x,
            site.coord.y,
            voronoi.neighbor_sites(site.index),
            ring.join(" ")
        );
    }

    println!("\nDelaunay edges:");
    for segment in voronoi.delaunay_lines() {
        println!(
            "  ({}, {}) -- ({}, {})",
            segment.p0.x, segment.p0.y, segment.p1.x, segment.p1.y
        );
    }

    let hull: Vec<String> = voronoi
        .hull_points_in_order()
        .iter()
        .map(|p| format!("({}, {})", p.x, p.y))
        .collect();
    println!("\nHull: {}", hull.join(" -> "));

    let tree = voronoi.spanning_tree(KruskalKind::Minimum);
    let length: f64 = tree.iter().map(|s| s.length()).sum();
    println!("\nMinimum spanning tree ({} edges, length {:.2}):", tree.len(), length);
    for segment in &tree {
        println!(
            "  ({}, {}) -- ({}, {})",
            segment.p0.x, segment.p0.y, segment.p1.x, segment.p1.y
        );
    }
}
