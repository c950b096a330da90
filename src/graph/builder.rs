//! Dual graph construction from a clipped Voronoi diagram

use std::collections::HashMap;

use glam::DVec2;
use tracing::debug;

use crate::geometry::angle_around;
use crate::graph::{Center, Corner, CornerIdx, Edge, Graph};
use crate::voronoi::Voronoi;

/// Squared distance under which two vertex coordinates are one corner
pub const CORNER_MERGE_EPSILON: f64 = 1e-6;

/// Corners bucketed by `floor(x)`; a lookup scans the bucket and its two
/// neighbors, which covers every point within merge distance.
#[derive(Debug, Default)]
struct CornerMap {
    buckets: HashMap<i64, Vec<CornerIdx>>,
    merged: usize,
}

impl CornerMap {
    fn resolve(
        &mut self,
        corners: &mut Vec<Corner>,
        is_border: impl Fn(DVec2) -> bool,
        p: DVec2,
    ) -> CornerIdx {
        let key = p.x.floor() as i64;
        for k in key - 1..=key + 1 {
            if let Some(found) = self.buckets.get(&k).and_then(|bucket| {
                bucket
                    .iter()
                    .copied()
                    .find(|&q| corners[q].point.distance_squared(p) < CORNER_MERGE_EPSILON)
            }) {
                self.merged += 1;
                return found;
            }
        }

        let index = corners.len();
        corners.push(Corner::new(index, p, is_border(p)));
        self.buckets.entry(key).or_default().push(index);
        index
    }
}

#[inline]
fn push_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Build the center/corner/edge graph
///
/// Only visible edges contribute. An edge whose two ends collapse onto one
/// corner carries no adjacency and is dropped. Each bounding-box corner is
/// attached to the center of the site nearest to it.
pub(crate) fn build_graph(voronoi: &Voronoi) -> Graph {
    let bounds = *voronoi.bounds();
    let on_border = |p: DVec2| bounds.is_on_border(p);

    let mut centers: Vec<Center> = voronoi
        .sites()
        .iter()
        .map(|s| Center::new(s.index, s.coord, s.color))
        .collect();
    let mut corners: Vec<Corner> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut map = CornerMap::default();
    let mut collapsed = 0usize;

    for vedge in voronoi.edges() {
        let Some(segment) = vedge.clipped else {
            continue;
        };
        let v0 = map.resolve(&mut corners, on_border, segment.p0);
        let v1 = map.resolve(&mut corners, on_border, segment.p1);
        if v0 == v1 {
            collapsed += 1;
            continue;
        }
        let [d0, d1] = vedge.sites;

        let index = edges.len();
        edges.push(Edge {
            index,
            d0,
            d1,
            v0,
            v1,
            midpoint: segment.midpoint(),
            river: 0,
        });

        for (center, other) in [(d0, d1), (d1, d0)] {
            let c = &mut centers[center];
            c.borders.push(index);
            push_unique(&mut c.neighbors, other);
            push_unique(&mut c.corners, v0);
            push_unique(&mut c.corners, v1);
        }
        for (corner, other) in [(v0, v1), (v1, v0)] {
            let q = &mut corners[corner];
            q.protrudes.push(index);
            push_unique(&mut q.adjacent, other);
            push_unique(&mut q.touches, d0);
            push_unique(&mut q.touches, d1);
        }
    }

    for center in 0..centers.len() {
        for p in voronoi.owned_box_corners(center) {
            let q = map.resolve(&mut corners, on_border, p);
            push_unique(&mut centers[center].corners, q);
            push_unique(&mut corners[q].touches, center);
        }
    }

    for center in &mut centers {
        let origin = center.point;
        center.corners.sort_by(|&a, &b| {
            angle_around(origin, corners[a].point).total_cmp(&angle_around(origin, corners[b].point))
        });
    }

    debug!(
        target: "voronoi_island::graph",
        centers = centers.len(),
        corners = corners.len(),
        edges = edges.len(),
        merged_vertices = map.merged,
        collapsed_edges = collapsed,
        "graph.built"
    );

    Graph {
        centers,
        corners,
        edges,
        bounds,
    }
}
