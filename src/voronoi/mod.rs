//! Voronoi diagram construction
//!
//! [`Voronoi::new`] registers the sites, runs Fortune's sweep and clips every
//! bisector to the bounding rectangle. Half-edges and events are discarded once
//! the sweep finishes; only sites, edges and a few counters survive.

pub mod edge;
mod fortune;
mod halfedge;
mod kruskal;
mod queue;
pub mod site;

use glam::DVec2;
use tracing::debug;

use crate::error::{MapError, Result};
use crate::geometry::{sort_clockwise, Bounds, LineSegment};

pub use edge::{VertexIdx, VoronoiEdge};
pub use kruskal::KruskalKind;
pub use site::{Site, SiteIdx, SiteList};

/// Points closer than this (squared) are the same region vertex
const REGION_MERGE_EPSILON: f64 = 1e-12;

/// A clipped Voronoi diagram over a set of sites
#[derive(Debug, Clone)]
pub struct Voronoi {
    sites: SiteList,
    bounds: Bounds,
    edges: Vec<VoronoiEdge>,
    /// Edge indices touching each site, visible or not
    site_edges: Vec<Vec<usize>>,
    /// Nearest site to each bounding-box corner, in `Bounds::corners` order
    corner_owners: [SiteIdx; 4],
    vertex_count: usize,
    stale_events_skipped: usize,
}

impl Voronoi {
    /// Build the diagram for `points` inside `bounds`
    ///
    /// `colors`, when given, must have one entry per point; it is carried on
    /// the sites untouched.
    ///
    /// # Errors
    ///
    /// Rejects empty, non-finite, duplicate or out-of-bounds sites and a color
    /// list of the wrong length.
    pub fn new(points: &[DVec2], colors: Option<&[u32]>, bounds: Bounds) -> Result<Self> {
        let sites = SiteList::new(points, colors)?;
        if let Some(site) = sites.as_slice().iter().find(|s| !bounds.contains(s.coord)) {
            return Err(MapError::SiteOutOfBounds {
                index: site.index,
                x: site.coord.x,
                y: site.coord.y,
            });
        }

        let output = fortune::sweep(&sites);
        let edges: Vec<VoronoiEdge> = output
            .edges
            .iter()
            .map(|b| VoronoiEdge::from_bisector(b, &bounds))
            .collect();

        let mut site_edges = vec![Vec::new(); sites.len()];
        for (i, edge) in edges.iter().enumerate() {
            site_edges[edge.sites[0]].push(i);
            site_edges[edge.sites[1]].push(i);
        }

        let corner_owners = bounds.corners().map(|corner| {
            sites
                .as_slice()
                .iter()
                .min_by(|a, b| {
                    a.coord
                        .distance_squared(corner)
                        .total_cmp(&b.coord.distance_squared(corner))
                })
                .map_or(0, |s| s.index)
        });

        let voronoi = Self {
            sites,
            bounds,
            edges,
            site_edges,
            corner_owners,
            vertex_count: output.vertex_count,
            stale_events_skipped: output.stale_events_skipped,
        };

        debug!(
            target: "voronoi_island::voronoi",
            sites = voronoi.sites.len(),
            edges = voronoi.edges.len(),
            visible = voronoi.visible_edges().count(),
            vertices = voronoi.vertex_count,
            stale_events = voronoi.stale_events_skipped,
            "voronoi.built"
        );

        Ok(voronoi)
    }

    /// Sites in input order
    #[inline]
    pub fn sites(&self) -> &[Site] {
        self.sites.as_slice()
    }

    #[inline]
    pub fn site_list(&self) -> &SiteList {
        &self.sites
    }

    /// Every bisector produced by the sweep, including ones clipped away
    #[inline]
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    pub fn visible_edges(&self) -> impl Iterator<Item = &VoronoiEdge> + '_ {
        self.edges.iter().filter(|e| e.is_visible())
    }

    /// Edges bordering `site`, visible or not
    pub fn site_edges(&self, site: SiteIdx) -> impl Iterator<Item = &VoronoiEdge> + '_ {
        self.site_edges
            .get(site)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Number of vertices settled during the sweep
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn stale_events_skipped(&self) -> usize {
        self.stale_events_skipped
    }

    /// Bounding-box corners whose nearest site is `site`
    pub fn owned_box_corners(&self, site: SiteIdx) -> impl Iterator<Item = DVec2> + '_ {
        self.bounds
            .corners()
            .into_iter()
            .zip(self.corner_owners)
            .filter(move |&(_, owner)| owner == site)
            .map(|(corner, _)| corner)
    }

    /// Clipped polygon of `site`, ordered by angle around the site
    ///
    /// Empty if `site` is out of range.
    pub fn region(&self, site: SiteIdx) -> Vec<DVec2> {
        if site >= self.sites.len() {
            return Vec::new();
        }
        let center = self.sites.get(site).coord;

        let mut ring: Vec<DVec2> = Vec::new();
        let ends = self
            .site_edges(site)
            .filter_map(|e| e.clipped)
            .flat_map(|s| [s.p0, s.p1]);
        for p in ends.chain(self.owned_box_corners(site)) {
            if !ring
                .iter()
                .any(|q| q.distance_squared(p) < REGION_MERGE_EPSILON)
            {
                ring.push(p);
            }
        }
        sort_clockwise(center, &mut ring);
        ring
    }

    /// Sites sharing a Delaunay edge with `site`
    ///
    /// Edges clipped away by the bounds still count.
    pub fn neighbor_sites(&self, site: SiteIdx) -> Vec<SiteIdx> {
        let mut out = Vec::new();
        for edge in self.site_edges(site) {
            let other = if edge.sites[0] == site {
                edge.sites[1]
            } else {
                edge.sites[0]
            };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// Visible Voronoi segments
    pub fn voronoi_diagram(&self) -> Vec<LineSegment> {
        self.edges.iter().filter_map(|e| e.clipped).collect()
    }

    /// Delaunay triangulation: one site-to-site segment per bisector
    pub fn delaunay_lines(&self) -> Vec<LineSegment> {
        self.edges.iter().map(|e| self.delaunay_line(e)).collect()
    }

    /// Delaunay segments on the convex hull of the sites
    ///
    /// A hull edge's bisector runs off to infinity on at least one side.
    pub fn hull(&self) -> Vec<LineSegment> {
        self.hull_edges().map(|e| self.delaunay_line(e)).collect()
    }

    /// Hull sites walked edge to edge
    ///
    /// Collinear sites have no closed hull; the walk then runs from one end
    /// of the line to the other and returns every site.
    pub fn hull_points_in_order(&self) -> Vec<DVec2> {
        let hull: Vec<&VoronoiEdge> = self.hull_edges().collect();
        let Some(first) = hull.first() else {
            return Vec::new();
        };

        let mut incident = vec![Vec::new(); self.sites.len()];
        for (i, edge) in hull.iter().enumerate() {
            incident[edge.sites[0]].push(i);
            incident[edge.sites[1]].push(i);
        }

        let start = incident
            .iter()
            .position(|edges| edges.len() == 1)
            .unwrap_or(first.sites[0]);
        let mut used = vec![false; hull.len()];
        let mut order = vec![start];
        let mut at = start;
        while let Some(&i) = incident[at].iter().find(|&&i| !used[i]) {
            used[i] = true;
            let edge = hull[i];
            at = if edge.sites[0] == at {
                edge.sites[1]
            } else {
                edge.sites[0]
            };
            if at == start {
                break;
            }
            order.push(at);
        }

        order.into_iter().map(|s| self.sites.get(s).coord).collect()
    }

    /// Minimum or maximum spanning tree of the Delaunay triangulation
    pub fn spanning_tree(&self, kind: KruskalKind) -> Vec<LineSegment> {
        let links = self
            .edges
            .iter()
            .map(|e| (e.sites, self.delaunay_line(e)))
            .collect();
        kruskal::spanning_tree(self.sites.len(), links, kind)
    }

    fn hull_edges(&self) -> impl Iterator<Item = &VoronoiEdge> + '_ {
        self.edges.iter().filter(|e| !e.is_bounded())
    }

    #[inline]
    fn delaunay_line(&self, edge: &VoronoiEdge) -> LineSegment {
        LineSegment::new(
            self.sites.get(edge.sites[0]).coord,
            self.sites.get(edge.sites[1]).coord,
        )
    }

    /// Index of the site registered at exactly `p`
    pub fn site_index_at(&self, p: DVec2) -> Option<SiteIdx> {
        self.sites.index_at(p)
    }
}
