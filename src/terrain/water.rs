//! Ocean, lake and coast classification

use std::collections::VecDeque;

use crate::graph::Graph;

/// Polygon counts after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct WaterCounts {
    pub ocean: usize,
    pub lake: usize,
    pub coast: usize,
}

/// Classify polygons then derive the corner flags from them
///
/// A polygon touching the map border is ocean. Any other polygon is water
/// when at least `lake_threshold` of its corners are water. Ocean then floods
/// outward from the border through water polygons; water left unflooded is
/// a lake.
pub(crate) fn assign_ocean_coast_and_land(graph: &mut Graph, lake_threshold: f64) -> WaterCounts {
    let Graph {
        centers, corners, ..
    } = graph;
    let mut queue = VecDeque::new();

    for p in centers.iter_mut() {
        let mut num_water = 0usize;
        for &q in &p.corners {
            let corner = &mut corners[q];
            if corner.border {
                p.border = true;
                p.ocean = true;
                corner.water = true;
            }
            if corner.water {
                num_water += 1;
            }
        }
        p.water = p.ocean || num_water as f64 >= p.corners.len() as f64 * lake_threshold;
        if p.ocean {
            queue.push_back(p.index);
        }
    }

    while let Some(p) = queue.pop_front() {
        for i in 0..centers[p].neighbors.len() {
            let r = centers[p].neighbors[i];
            if centers[r].water && !centers[r].ocean {
                centers[r].ocean = true;
                queue.push_back(r);
            }
        }
    }

    for i in 0..centers.len() {
        let (ocean, land) = tally(centers[i].neighbors.iter().map(|&r| &centers[r]));
        centers[i].coast = ocean > 0 && land > 0;
    }

    for q in corners.iter_mut() {
        let (ocean, land) = tally(q.touches.iter().map(|&p| &centers[p]));
        q.ocean = ocean == q.touches.len();
        q.coast = ocean > 0 && land > 0;
        q.water = q.border || (land != q.touches.len() && !q.coast);
    }

    WaterCounts {
        ocean: centers.iter().filter(|p| p.ocean).count(),
        lake: centers.iter().filter(|p| p.water && !p.ocean).count(),
        coast: centers.iter().filter(|p| p.coast && !p.ocean).count(),
    }
}

/// Count (ocean, land) among the given polygons
fn tally<'a>(centers: impl Iterator<Item = &'a crate::graph::Center>) -> (usize, usize) {
    centers.fold((0, 0), |(ocean, land), c| {
        (ocean + usize::from(c.ocean), land + usize::from(!c.water))
    })
}
