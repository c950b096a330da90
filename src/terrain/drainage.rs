//! Downslopes, watersheds and rivers

use rand::Rng;
use tracing::warn;

use crate::graph::Graph;

/// Default cap on watershed propagation passes
pub const WATERSHED_MAX_ITERATIONS: usize = 100;
/// Lowest elevation a river may start at
pub const RIVER_MIN_ELEVATION: f64 = 0.3;
/// Highest elevation a river may start at
pub const RIVER_MAX_ELEVATION: f64 = 0.9;

/// Point every corner at its lowest neighbor, or at itself if none is lower
pub(crate) fn assign_downslopes(graph: &mut Graph) {
    for i in 0..graph.corners.len() {
        let q = &graph.corners[i];
        let mut r = i;
        for &s in &q.adjacent {
            if graph.corners[s].elevation < graph.corners[r].elevation {
                r = s;
            }
        }
        graph.corners[i].downslope = r;
    }
}

/// Propagate each corner's watershed along its downslope chain
///
/// Runs until a pass changes nothing or `max_iterations` passes have been
/// made. Returns `(passes, converged)`; an unconverged result keeps whatever
/// the last pass produced.
pub(crate) fn assign_watersheds(graph: &mut Graph, max_iterations: usize) -> (usize, bool) {
    let corners = &mut graph.corners;
    for q in corners.iter_mut() {
        q.watershed = q.index;
        q.watershed_size = 0;
        if !q.ocean && !q.coast {
            q.watershed = q.downslope;
        }
    }

    let mut passes = 0;
    let mut converged = false;
    while passes < max_iterations {
        passes += 1;
        let mut changed = false;
        for i in 0..corners.len() {
            let q = &corners[i];
            if q.ocean || q.coast || corners[q.watershed].coast {
                continue;
            }
            let r = corners[q.downslope].watershed;
            if !corners[r].ocean && r != q.watershed {
                corners[i].watershed = r;
                changed = true;
            }
        }
        if !changed {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            target: "voronoi_island::terrain",
            passes,
            "terrain.watersheds.unconverged"
        );
    }

    for i in 0..corners.len() {
        let w = corners[i].watershed;
        corners[w].watershed_size += 1;
    }

    (passes, converged)
}

/// Carve rivers from random highland corners down to the coast
///
/// Makes `(width + height) / 4` attempts. Returns `(trials, carved)`.
pub(crate) fn create_rivers<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) -> (usize, usize) {
    let trials = ((graph.bounds.width() + graph.bounds.height()) / 4.0) as usize;
    if graph.corners.is_empty() {
        return (trials, 0);
    }

    let mut carved = 0;
    for _ in 0..trials {
        let mut q = rng.gen_range(0..graph.corners.len());
        let start = &graph.corners[q];
        if start.ocean
            || start.elevation < RIVER_MIN_ELEVATION
            || start.elevation > RIVER_MAX_ELEVATION
        {
            continue;
        }
        carved += 1;

        // Downslope strictly descends, so the walk ends.
        while !graph.corners[q].coast {
            let next = graph.corners[q].downslope;
            if next == q {
                break;
            }
            if let Some(e) = graph.edge_between_corners(q, next) {
                graph.edges[e].river += 1;
            }
            graph.corners[q].river += 1;
            graph.corners[next].river += 1;
            q = next;
        }
    }

    (trials, carved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::island::SquareIsland;
    use crate::terrain::test_support::{chain_graph, random_graph, shaped_graph};
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_downslope_is_lowest_neighbor() {
        let graph = shaped_graph(300, 4, &SquareIsland);
        for q in &graph.corners {
            let d = &graph.corners[q.downslope];
            assert!(d.elevation <= q.elevation);
            for &s in &q.adjacent {
                assert!(d.elevation <= graph.corners[s].elevation);
            }
            if q.downslope != q.index {
                assert!(q.adjacent.contains(&q.downslope));
            }
        }
    }

    #[test]
    fn test_downslope_chains_terminate() {
        let disc = |q: DVec2| q.length() < 0.7;
        let graph = shaped_graph(400, 13, &disc);
        for start in graph.corners.iter().filter(|q| !q.ocean) {
            let mut q = start.index;
            let mut steps = 0;
            while !graph.corners[q].coast && !graph.corners[q].ocean {
                let next = graph.corners[q].downslope;
                if next == q {
                    break;
                }
                q = next;
                steps += 1;
                assert!(steps <= graph.corners.len());
            }
        }
    }

    #[test]
    fn test_ties_keep_self() {
        let mut graph = chain_graph(3);
        for q in &mut graph.corners {
            q.elevation = 0.5;
        }
        assign_downslopes(&mut graph);
        assert!(graph.corners.iter().all(|q| q.downslope == q.index));
    }

    #[test]
    fn test_watersheds_reach_coast() {
        let mut graph = shaped_graph(400, 13, &SquareIsland);
        let (passes, converged) = assign_watersheds(&mut graph, WATERSHED_MAX_ITERATIONS);
        assert!(converged);
        assert!(passes >= 1);

        let total: u32 = graph.corners.iter().map(|q| q.watershed_size).sum();
        assert_eq!(total as usize, graph.corners.len());
        for q in graph.corners.iter().filter(|q| !q.ocean) {
            let w = &graph.corners[q.watershed];
            assert!(w.coast || w.downslope == w.index, "corner {}", q.index);
        }
    }

    #[test]
    fn test_watershed_cap() {
        // Downhill runs toward the end of the chain, so each pass only
        // moves the head's watershed one hop further along.
        let mut graph = chain_graph(12);
        for q in &mut graph.corners {
            q.elevation = (11 - q.index) as f64;
        }
        graph.corners[11].coast = true;
        assign_downslopes(&mut graph);

        let (passes, converged) = assign_watersheds(&mut graph, 2);
        assert_eq!(passes, 2);
        assert!(!converged);
        assert_eq!(graph.corners[0].watershed, 3);

        let (_, converged) = assign_watersheds(&mut graph, 100);
        assert!(converged);
        assert!(graph.corners.iter().all(|q| q.watershed == 11));
        assert_eq!(graph.corners[11].watershed_size, 12);
    }

    #[test]
    fn test_rivers_flow_downhill() {
        let disc = |q: DVec2| q.length() < 0.8;
        let mut graph = shaped_graph(500, 8, &disc);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let (trials, carved) = create_rivers(&mut graph, &mut rng);
        assert_eq!(trials, 25);
        assert!(carved <= trials);

        for e in graph.edges.iter().filter(|e| e.river > 0) {
            let (a, b) = (&graph.corners[e.v0], &graph.corners[e.v1]);
            assert!(a.river > 0 && b.river > 0);
            assert!(a.downslope == b.index || b.downslope == a.index);
        }
        let volume: u32 = graph.edges.iter().map(|e| e.river).sum();
        let steps: u32 = graph.corners.iter().map(|q| q.river).sum();
        // Each step adds one to its edge and one to each end.
        assert_eq!(steps, 2 * volume);
    }

    #[test]
    fn test_river_walk_on_chain() {
        let mut graph = chain_graph(4);
        for q in &mut graph.corners {
            q.elevation = 0.1 * q.index as f64 + 0.3;
        }
        graph.corners[0].coast = true;
        assign_downslopes(&mut graph);

        // Every corner is in the river band, so every trial carves.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (trials, carved) = create_rivers(&mut graph, &mut rng);
        assert_eq!(trials, carved);
        assert!(graph.edges[0].river > 0);
        assert_eq!(graph.corners[0].river, graph.edges[0].river);
    }

    #[test]
    fn test_random_graph_has_no_rivers_before_carving() {
        let graph = random_graph(50, 2);
        assert!(graph.corners.iter().all(|q| q.river == 0));
        assert!(graph.edges.iter().all(|e| e.river == 0));
    }
}
