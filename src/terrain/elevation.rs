//! Elevation seeding, redistribution and polygon averaging

use std::collections::VecDeque;

use crate::graph::Graph;
use crate::terrain::island::IslandShape;

/// Elevation gained per corner hop away from the border
pub const ELEVATION_STEP: f64 = 0.01;
/// Extra elevation for a hop between two land corners
pub const LAND_STEP: f64 = 1.0;
/// Stretch of the redistribution curve; above 1 flattens the lowlands
pub const REDISTRIBUTION_SCALE: f64 = 1.1;

/// Mark corner water from the island shape and flood elevation in from the border
///
/// Border corners are 0. Every other corner gets the cheapest path cost from
/// the border, where each hop costs [`ELEVATION_STEP`] plus [`LAND_STEP`] when
/// both ends are land. Returns the number of corners the flood never reached.
pub(crate) fn assign_corner_elevations(graph: &mut Graph, shape: &dyn IslandShape) -> usize {
    let bounds = graph.bounds;
    let mut queue = VecDeque::new();

    for q in &mut graph.corners {
        q.water = !shape.is_land(bounds.normalize(q.point));
        if q.border {
            q.elevation = 0.0;
            queue.push_back(q.index);
        } else {
            q.elevation = f64::INFINITY;
        }
    }

    while let Some(q) = queue.pop_front() {
        let (elevation, water) = (graph.corners[q].elevation, graph.corners[q].water);
        for i in 0..graph.corners[q].adjacent.len() {
            let s = graph.corners[q].adjacent[i];
            let mut candidate = elevation + ELEVATION_STEP;
            if !water && !graph.corners[s].water {
                candidate += LAND_STEP;
            }
            if candidate < graph.corners[s].elevation {
                graph.corners[s].elevation = candidate;
                queue.push_back(s);
            }
        }
    }

    graph
        .corners
        .iter()
        .filter(|q| q.elevation.is_infinite())
        .count()
}

/// Remap land corner elevations onto `y = 1 - (1 - x)²`
///
/// Corners are ranked by their raw elevation, so only the ordering from the
/// flood survives. Ocean and coast corners drop to 0.
pub(crate) fn redistribute_elevations(graph: &mut Graph) {
    let mut locations = graph.land_corners();
    locations.sort_by(|&a, &b| {
        graph.corners[a]
            .elevation
            .total_cmp(&graph.corners[b].elevation)
    });

    let scale_sqrt = REDISTRIBUTION_SCALE.sqrt();
    for (i, &q) in locations.iter().enumerate() {
        let y = rank(i, locations.len());
        let x = scale_sqrt - (REDISTRIBUTION_SCALE * (1.0 - y)).sqrt();
        graph.corners[q].elevation = x.min(1.0);
    }

    for q in &mut graph.corners {
        if q.ocean || q.coast {
            q.elevation = 0.0;
        }
    }
}

/// Each polygon takes the mean elevation of its corners
pub(crate) fn assign_polygon_elevations(graph: &mut Graph) {
    let corners = &graph.corners;
    for p in &mut graph.centers {
        p.elevation = if p.corners.is_empty() {
            0.0
        } else {
            p.corners.iter().map(|&q| corners[q].elevation).sum::<f64>() / p.corners.len() as f64
        };
    }
}

/// Position of the `i`-th of `n` sorted items on `[0, 1]`
#[inline]
pub(crate) fn rank(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}
