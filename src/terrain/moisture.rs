//! Moisture diffusion from fresh water

use std::collections::VecDeque;

use crate::graph::Graph;
use crate::terrain::elevation::rank;

/// Fraction of moisture carried across one corner hop
pub const MOISTURE_DECAY: f64 = 0.9;
/// Moisture a river adds per unit of volume
pub const RIVER_MOISTURE_PER_VOLUME: f64 = 0.2;
/// Upper bound on a river corner's seeded moisture
pub const RIVER_MOISTURE_CAP: f64 = 3.0;

/// Seed fresh water and spread it outward, decaying per hop
///
/// Lakes seed 1.0; river corners seed by volume and may exceed 1. Ocean and
/// coast corners are set to 1.0 afterwards without spreading. Returns the
/// number of fresh water sources.
pub(crate) fn assign_corner_moisture(graph: &mut Graph) -> usize {
    let corners = &mut graph.corners;
    let mut queue = VecDeque::new();

    for q in corners.iter_mut() {
        if (q.water || q.river > 0) && !q.ocean {
            q.moisture = if q.river > 0 {
                (RIVER_MOISTURE_PER_VOLUME * q.river as f64).min(RIVER_MOISTURE_CAP)
            } else {
                1.0
            };
            queue.push_back(q.index);
        } else {
            q.moisture = 0.0;
        }
    }
    let sources = queue.len();

    while let Some(q) = queue.pop_front() {
        let spread = corners[q].moisture * MOISTURE_DECAY;
        for i in 0..corners[q].adjacent.len() {
            let r = corners[q].adjacent[i];
            if spread > corners[r].moisture {
                corners[r].moisture = spread;
                queue.push_back(r);
            }
        }
    }

    for q in corners.iter_mut() {
        if q.ocean || q.coast {
            q.moisture = 1.0;
        }
    }

    sources
}

/// Spread land corner moisture uniformly over `[0, 1]` by rank
pub(crate) fn redistribute_moisture(graph: &mut Graph) {
    let mut locations = graph.land_corners();
    locations.sort_by(|&a, &b| graph.corners[a].moisture.total_cmp(&graph.corners[b].moisture));
    for (i, &q) in locations.iter().enumerate() {
        graph.corners[q].moisture = rank(i, locations.len());
    }
}

/// Each polygon takes the mean of its corners' moisture, capped at 1
///
/// The cap is written back to the corners.
pub(crate) fn assign_polygon_moisture(graph: &mut Graph) {
    let corners = &mut graph.corners;
    for p in &mut graph.centers {
        let mut sum = 0.0;
        for &q in &p.corners {
            let corner = &mut corners[q];
            corner.moisture = corner.moisture.min(1.0);
            sum += corner.moisture;
        }
        p.moisture = if p.corners.is_empty() {
            0.0
        } else {
            sum / p.corners.len() as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::test_support::{chain_graph, random_graph};

    #[test]
    fn test_single_source_decays_along_chain() {
        let mut graph = chain_graph(5);
        graph.corners[0].water = true;
        let sources = assign_corner_moisture(&mut graph);

        assert_eq!(sources, 1);
        assert_eq!(graph.corners[0].moisture, 1.0);
        assert_eq!(graph.corners[1].moisture, 0.9);
        assert_eq!(graph.corners[2].moisture, 0.9 * 0.9);
        assert_eq!(graph.corners[4].moisture, 0.9 * 0.9 * 0.9 * 0.9);
    }

    #[test]
    fn test_diffusion_stops_at_wetter_neighbor() {
        let mut graph = chain_graph(5);
        graph.corners[0].water = true;
        graph.corners[4].river = 10;
        assign_corner_moisture(&mut graph);

        // The river seeds 2.0 and its wave overruns the lake's.
        assert_eq!(graph.corners[4].moisture, 2.0);
        assert_eq!(graph.corners[3].moisture, 2.0 * 0.9);
        assert_eq!(graph.corners[1].moisture, 2.0 * 0.9 * 0.9 * 0.9);
        assert_eq!(graph.corners[0].moisture, 2.0 * 0.9 * 0.9 * 0.9 * 0.9);
    }

    #[test]
    fn test_river_seed_is_capped() {
        let mut graph = chain_graph(2);
        graph.corners[0].river = 40;
        assign_corner_moisture(&mut graph);
        assert_eq!(graph.corners[0].moisture, RIVER_MOISTURE_CAP);
    }

    #[test]
    fn test_salt_water_does_not_spread() {
        let mut graph = chain_graph(3);
        graph.corners[0].water = true;
        graph.corners[0].ocean = true;
        graph.corners[2].coast = true;
        let sources = assign_corner_moisture(&mut graph);

        assert_eq!(sources, 0);
        assert_eq!(graph.corners[0].moisture, 1.0);
        assert_eq!(graph.corners[1].moisture, 0.0);
        assert_eq!(graph.corners[2].moisture, 1.0);
    }

    #[test]
    fn test_redistribution_is_linear() {
        let mut graph = chain_graph(5);
        for (q, m) in graph.corners.iter_mut().zip([0.7, 0.1, 0.9, 0.3, 0.5]) {
            q.moisture = m;
        }
        redistribute_moisture(&mut graph);
        let moisture: Vec<f64> = graph.corners.iter().map(|q| q.moisture).collect();
        assert_eq!(moisture, vec![0.75, 0.0, 1.0, 0.25, 0.5]);
    }

    #[test]
    fn test_polygon_moisture_caps_corners() {
        let mut graph = random_graph(40, 3);
        for q in &mut graph.corners {
            q.moisture = 2.5;
        }
        assign_polygon_moisture(&mut graph);
        assert!(graph.centers.iter().all(|p| p.moisture == 1.0));
        assert!(graph.corners.iter().all(|q| q.moisture == 1.0));
    }
}
