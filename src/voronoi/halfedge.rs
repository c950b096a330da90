//! Sweep-line breakpoint list
//!
//! Active half-edges live in an arena and are linked left to right between two
//! sentinel ends. A coarse x-hash of recently visited half-edges seeds the
//! neighbor search; from there a linear walk finds the exact breakpoint.

use glam::DVec2;

use crate::geometry::{compare_y_then_x, Side};
use crate::voronoi::edge::Bisector;
use crate::voronoi::site::SiteList;

pub(crate) type HalfEdgeId = usize;
pub(crate) type EdgeId = usize;

/// Determinant below which two bisectors are treated as parallel
const PARALLEL_EPSILON: f64 = 1.0e-10;

#[derive(Debug, Clone)]
pub(crate) struct HalfEdge {
    /// Owning bisector; `None` for the two sentinels
    pub edge: Option<EdgeId>,
    pub side: Side,
    pub left: Option<HalfEdgeId>,
    pub right: Option<HalfEdgeId>,
    /// Predicted vertex where this half-edge meets its right neighbor
    pub vertex: Option<DVec2>,
    pub deleted: bool,
}

impl HalfEdge {
    fn new(edge: Option<EdgeId>, side: Side) -> Self {
        Self {
            edge,
            side,
            left: None,
            right: None,
            vertex: None,
            deleted: false,
        }
    }
}

pub(crate) struct EdgeList {
    nodes: Vec<HalfEdge>,
    buckets: Vec<Option<HalfEdgeId>>,
    left_end: HalfEdgeId,
    right_end: HalfEdgeId,
    xmin: f64,
    delta_x: f64,
}

impl EdgeList {
    /// `xmin`/`delta_x` span the sites' x range; the bucket count grows with
    /// the square root of the site count.
    pub fn new(xmin: f64, delta_x: f64, site_count: usize) -> Self {
        let bucket_count = ((4.0 * (site_count as f64).sqrt()).ceil() as usize).max(2);
        let mut nodes = vec![HalfEdge::new(None, Side::Left), HalfEdge::new(None, Side::Left)];
        let (left_end, right_end) = (0, 1);
        nodes[left_end].right = Some(right_end);
        nodes[right_end].left = Some(left_end);

        let mut buckets = vec![None; bucket_count];
        buckets[0] = Some(left_end);
        buckets[bucket_count - 1] = Some(right_end);

        Self {
            nodes,
            buckets,
            left_end,
            right_end,
            xmin,
            delta_x: if delta_x > 0.0 { delta_x } else { 1.0 },
        }
    }

    #[cfg(test)]
    pub fn left_end(&self) -> HalfEdgeId {
        self.left_end
    }

    #[cfg(test)]
    pub fn right_end(&self) -> HalfEdgeId {
        self.right_end
    }

    #[inline]
    pub fn get(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.nodes[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.nodes[id]
    }

    /// Allocate a detached half-edge for `edge`
    pub fn create(&mut self, edge: EdgeId, side: Side) -> HalfEdgeId {
        self.nodes.push(HalfEdge::new(Some(edge), side));
        self.nodes.len() - 1
    }

    #[inline]
    pub fn right_of(&self, id: HalfEdgeId) -> HalfEdgeId {
        self.nodes[id].right.unwrap_or(self.right_end)
    }

    #[inline]
    pub fn left_of(&self, id: HalfEdgeId) -> HalfEdgeId {
        self.nodes[id].left.unwrap_or(self.left_end)
    }

    /// Link `new` immediately right of `at`
    pub fn insert(&mut self, at: HalfEdgeId, new: HalfEdgeId) {
        let right = self.right_of(at);
        self.nodes[new].left = Some(at);
        self.nodes[new].right = Some(right);
        self.nodes[right].left = Some(new);
        self.nodes[at].right = Some(new);
    }

    /// Unlink a half-edge; buckets pointing at it are cleared lazily
    pub fn remove(&mut self, id: HalfEdgeId) {
        let (left, right) = (self.left_of(id), self.right_of(id));
        self.nodes[left].right = Some(right);
        self.nodes[right].left = Some(left);
        let node = &mut self.nodes[id];
        node.left = None;
        node.right = None;
        node.deleted = true;
    }

    fn bucket(&mut self, b: isize) -> Option<HalfEdgeId> {
        if b < 0 || b as usize >= self.buckets.len() {
            return None;
        }
        let b = b as usize;
        match self.buckets[b] {
            Some(id) if self.nodes[id].deleted => {
                self.buckets[b] = None;
                None
            }
            hit => hit,
        }
    }

    /// The half-edge immediately left of `p` on the sweep line
    pub fn left_neighbor(&mut self, p: DVec2, edges: &[Bisector], sites: &SiteList) -> HalfEdgeId {
        let count = self.buckets.len();
        let raw = ((p.x - self.xmin) / self.delta_x * count as f64) as isize;
        let b = raw.clamp(0, count as isize - 1);

        let mut he = self.bucket(b);
        let mut offset = 1;
        while he.is_none() {
            he = match self.bucket(b - offset) {
                Some(hit) => Some(hit),
                None => self.bucket(b + offset),
            };
            offset += 1;
            if offset > count as isize {
                break;
            }
        }
        let mut he = he.unwrap_or(self.left_end);

        if he == self.left_end || (he != self.right_end && self.is_left_of(he, p, edges, sites)) {
            loop {
                he = self.right_of(he);
                if he == self.right_end || !self.is_left_of(he, p, edges, sites) {
                    break;
                }
            }
            he = self.left_of(he);
        } else {
            loop {
                he = self.left_of(he);
                if he == self.left_end || self.is_left_of(he, p, edges, sites) {
                    break;
                }
            }
        }

        if b > 0 && (b as usize) < count - 1 {
            self.buckets[b as usize] = Some(he);
        }
        he
    }

    /// True if the breakpoint traced by `id` lies left of `p`
    pub fn is_left_of(&self, id: HalfEdgeId, p: DVec2, edges: &[Bisector], sites: &SiteList) -> bool {
        let node = &self.nodes[id];
        let Some(edge) = node.edge.map(|e| &edges[e]) else {
            return false;
        };
        let top = sites.get(edge.site(Side::Right)).coord;
        let right_of_site = p.x > top.x;
        if right_of_site && node.side == Side::Left {
            return true;
        }
        if !right_of_site && node.side == Side::Right {
            return false;
        }

        let above = if edge.a == 1.0 {
            let dyp = p.y - top.y;
            let dxp = p.x - top.x;
            let (mut above, fast) =
                if (!right_of_site && edge.b < 0.0) || (right_of_site && edge.b >= 0.0) {
                    let above = dyp >= edge.b * dxp;
                    (above, above)
                } else {
                    let above = (p.x + p.y * edge.b > edge.c) != (edge.b < 0.0);
                    (above, !above)
                };
            if !fast {
                let dxs = top.x - sites.get(edge.site(Side::Left)).coord.x;
                above = edge.b * (dxp * dxp - dyp * dyp)
                    < dxs * dyp * (1.0 + 2.0 * dxp / dxs + edge.b * edge.b);
                if edge.b < 0.0 {
                    above = !above;
                }
            }
            above
        } else {
            let yl = edge.c - edge.a * p.x;
            let t1 = p.y - yl;
            let t2 = p.x - top.x;
            let t3 = yl - top.y;
            t1 * t1 > t2 * t2 + t3 * t3
        };

        match node.side {
            Side::Left => above,
            Side::Right => !above,
        }
    }

    /// Where two neighboring breakpoints converge, if ahead of the sweep
    pub fn intersect(
        &self,
        h0: HalfEdgeId,
        h1: HalfEdgeId,
        edges: &[Bisector],
        sites: &SiteList,
    ) -> Option<DVec2> {
        let e0 = &edges[self.nodes[h0].edge?];
        let e1 = &edges[self.nodes[h1].edge?];
        let (r0, r1) = (e0.site(Side::Right), e1.site(Side::Right));
        if r0 == r1 {
            return None;
        }

        let det = e0.a * e1.b - e0.b * e1.a;
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let x = (e0.c * e1.b - e1.c * e0.b) / det;
        let y = (e1.c * e0.a - e0.c * e1.a) / det;

        let (r0c, r1c) = (sites.get(r0).coord, sites.get(r1).coord);
        let (he, top) = if compare_y_then_x(r0c, r1c).is_lt() {
            (h0, r0c)
        } else {
            (h1, r1c)
        };
        let right_of_site = x >= top.x;
        let side = self.nodes[he].side;
        if (right_of_site && side == Side::Left) || (!right_of_site && side == Side::Right) {
            return None;
        }
        Some(DVec2::new(x, y))
    }

    /// Active half-edges from left to right, sentinels excluded
    #[cfg(test)]
    fn active(&self) -> Vec<HalfEdgeId> {
        let mut out = Vec::new();
        let mut he = self.right_of(self.left_end);
        while he != self.right_end {
            out.push(he);
            he = self.right_of(he);
        }
        out
    }
}
