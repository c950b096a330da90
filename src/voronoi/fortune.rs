//! Fortune's sweep
//!
//! Sites are consumed bottom-up in (y, x) order and merged with circle events
//! from the queue. Each circle event settles one vertex and starts the
//! bisector between the two outer sites of the collapsing triple.

use glam::DVec2;

use crate::geometry::{compare_y_then_x, Side};
use crate::voronoi::edge::{Bisector, Vertex};
use crate::voronoi::halfedge::{EdgeList, HalfEdgeId};
use crate::voronoi::queue::EventQueue;
use crate::voronoi::site::{SiteIdx, SiteList};

pub(crate) struct SweepOutput {
    /// Every bisector created, in creation order
    pub edges: Vec<Bisector>,
    /// Vertices settled by circle events
    pub vertex_count: usize,
    pub stale_events_skipped: usize,
}

struct Sweep<'a> {
    sites: &'a SiteList,
    edges: Vec<Bisector>,
    list: EdgeList,
    queue: EventQueue,
    bottom_most: SiteIdx,
    vertex_count: usize,
}

impl Sweep<'_> {
    fn left_region(&self, he: HalfEdgeId) -> SiteIdx {
        let node = self.list.get(he);
        node.edge
            .map_or(self.bottom_most, |e| self.edges[e].site(node.side))
    }

    fn right_region(&self, he: HalfEdgeId) -> SiteIdx {
        let node = self.list.get(he);
        node.edge
            .map_or(self.bottom_most, |e| self.edges[e].site(node.side.other()))
    }

    fn new_edge(&mut self, s0: SiteIdx, s1: SiteIdx) -> usize {
        self.edges
            .push(Bisector::between(self.sites.get(s0), self.sites.get(s1)));
        self.edges.len() - 1
    }

    /// Register a circle event on `he` for the vertex `p`, measured from `site`
    fn schedule(&mut self, he: HalfEdgeId, p: DVec2, site: SiteIdx) {
        let ystar = p.y + self.sites.get(site).coord.distance(p);
        self.list.get_mut(he).vertex = Some(p);
        self.queue.insert(he, p.x, ystar);
    }

    fn site_event(&mut self, site: SiteIdx) {
        let coord = self.sites.get(site).coord;
        let lbnd = self.list.left_neighbor(coord, &self.edges, self.sites);
        let rbnd = self.list.right_of(lbnd);
        let bottom = self.right_region(lbnd);

        let edge = self.new_edge(bottom, site);
        let left = self.list.create(edge, Side::Left);
        self.list.insert(lbnd, left);
        if let Some(p) = self.list.intersect(lbnd, left, &self.edges, self.sites) {
            self.queue.remove(lbnd);
            self.schedule(lbnd, p, site);
        }

        let right = self.list.create(edge, Side::Right);
        self.list.insert(left, right);
        if let Some(p) = self.list.intersect(right, rbnd, &self.edges, self.sites) {
            self.schedule(right, p, site);
        }
    }

    fn circle_event(&mut self, lbnd: HalfEdgeId) {
        let Some(coord) = self.list.get(lbnd).vertex else {
            return;
        };
        let llbnd = self.list.left_of(lbnd);
        let rbnd = self.list.right_of(lbnd);
        let rrbnd = self.list.right_of(rbnd);
        let mut bottom = self.left_region(lbnd);
        let mut top = self.right_region(rbnd);

        let vertex = Vertex {
            index: self.vertex_count,
            coord,
        };
        self.vertex_count += 1;
        for he in [lbnd, rbnd] {
            let node = self.list.get(he);
            if let Some(e) = node.edge {
                self.edges[e].set_vertex(node.side, vertex);
            }
        }
        self.list.remove(lbnd);
        self.queue.remove(rbnd);
        self.list.remove(rbnd);

        let mut side = Side::Left;
        if self.sites.get(bottom).coord.y > self.sites.get(top).coord.y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }
        let edge = self.new_edge(bottom, top);
        let bisector = self.list.create(edge, side);
        self.list.insert(llbnd, bisector);
        self.edges[edge].set_vertex(side.other(), vertex);

        if let Some(p) = self.list.intersect(llbnd, bisector, &self.edges, self.sites) {
            self.queue.remove(llbnd);
            self.schedule(llbnd, p, bottom);
        }
        if let Some(p) = self.list.intersect(bisector, rrbnd, &self.edges, self.sites) {
            self.schedule(bisector, p, bottom);
        }
    }
}

/// Run the sweep over every registered site
pub(crate) fn sweep(sites: &SiteList) -> SweepOutput {
    let (lo, hi) = sites.data_bounds();
    let mut pending = sites.sorted().map(|s| s.index).peekable();
    let Some(bottom_most) = pending.next() else {
        return SweepOutput {
            edges: Vec::new(),
            vertex_count: 0,
            stale_events_skipped: 0,
        };
    };

    let mut sweep = Sweep {
        sites,
        edges: Vec::with_capacity(3 * sites.len()),
        list: EdgeList::new(lo.x, hi.x - lo.x, sites.len()),
        queue: EventQueue::new(),
        bottom_most,
        vertex_count: 0,
    };

    loop {
        let next_event = sweep.queue.min();
        let next_site = pending.peek().copied();
        match (next_site, next_event) {
            (Some(site), event)
                if event.map_or(true, |e: DVec2| {
                    compare_y_then_x(sweep.sites.get(site).coord, e).is_lt()
                }) =>
            {
                pending.next();
                sweep.site_event(site);
            }
            (_, Some(_)) => {
                if let Some(lbnd) = sweep.queue.extract_min() {
                    sweep.circle_event(lbnd);
                }
            }
            _ => break,
        }
    }

    SweepOutput {
        stale_events_skipped: sweep.queue.stale_skipped(),
        vertex_count: sweep.vertex_count,
        edges: sweep.edges,
    }
}
