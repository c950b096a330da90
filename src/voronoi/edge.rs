//! Bisector edges and rectangle clipping

use glam::DVec2;

use crate::geometry::{Bounds, LineSegment, Side};
use crate::voronoi::site::{Site, SiteIdx};

/// Sequence number of a vertex, assigned when its circle event fires
pub type VertexIdx = usize;

/// A settled Voronoi vertex (circumcenter of three sites)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Vertex {
    pub index: VertexIdx,
    pub coord: DVec2,
}

/// Perpendicular bisector of two sites, stored as the line `a·x + b·y = c`
///
/// One of `a`, `b` is normalized to exactly `1.0`; the sweep's left-of test
/// and the clipper branch on which one.
#[derive(Debug, Clone)]
pub(crate) struct Bisector {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub sites: [SiteIdx; 2],
    pub vertices: [Option<Vertex>; 2],
}

impl Bisector {
    pub fn between(s0: &Site, s1: &Site) -> Self {
        let d = s1.coord - s0.coord;
        let mut c = s0.coord.dot(d) + d.length_squared() * 0.5;
        let (a, b);
        if d.x.abs() > d.y.abs() {
            a = 1.0;
            b = d.y / d.x;
            c /= d.x;
        } else {
            b = 1.0;
            a = d.x / d.y;
            c /= d.y;
        }
        Self {
            a,
            b,
            c,
            sites: [s0.index, s1.index],
            vertices: [None, None],
        }
    }

    #[inline]
    pub fn site(&self, side: Side) -> SiteIdx {
        self.sites[side.index()]
    }

    #[inline]
    pub fn set_vertex(&mut self, side: Side, vertex: Vertex) {
        self.vertices[side.index()] = Some(vertex);
    }

    /// Clip the edge against `bounds`
    ///
    /// Returns the visible ends as `[left, right]`, or `None` when no part of
    /// the edge falls inside the rectangle.
    pub fn clip(&self, bounds: &Bounds) -> Option<[DVec2; 2]> {
        let (xmin, ymin) = (bounds.min.x, bounds.min.y);
        let (xmax, ymax) = (bounds.max.x, bounds.max.y);
        let (a, b, c) = (self.a, self.b, self.c);
        let left = self.vertices[0].map(|v| v.coord);
        let right = self.vertices[1].map(|v| v.coord);

        // Walk along the line in increasing y (or x); v0 is the end that comes first.
        let reversed = a == 1.0 && b >= 0.0;
        let (v0, v1) = if reversed { (right, left) } else { (left, right) };

        let (mut x0, mut y0, mut x1, mut y1);
        if a == 1.0 {
            y0 = match v0 {
                Some(v) if v.y > ymin => v.y,
                _ => ymin,
            };
            if y0 > ymax {
                return None;
            }
            x0 = c - b * y0;

            y1 = match v1 {
                Some(v) if v.y < ymax => v.y,
                _ => ymax,
            };
            if y1 < ymin {
                return None;
            }
            x1 = c - b * y1;

            if (x0 > xmax && x1 > xmax) || (x0 < xmin && x1 < xmin) {
                return None;
            }
            if x0 > xmax {
                x0 = xmax;
                y0 = (c - x0) / b;
            } else if x0 < xmin {
                x0 = xmin;
                y0 = (c - x0) / b;
            }
            if x1 > xmax {
                x1 = xmax;
                y1 = (c - x1) / b;
            } else if x1 < xmin {
                x1 = xmin;
                y1 = (c - x1) / b;
            }
        } else {
            x0 = match v0 {
                Some(v) if v.x > xmin => v.x,
                _ => xmin,
            };
            if x0 > xmax {
                return None;
            }
            y0 = c - a * x0;

            x1 = match v1 {
                Some(v) if v.x < xmax => v.x,
                _ => xmax,
            };
            if x1 < xmin {
                return None;
            }
            y1 = c - a * x1;

            if (y0 > ymax && y1 > ymax) || (y0 < ymin && y1 < ymin) {
                return None;
            }
            if y0 > ymax {
                y0 = ymax;
                x0 = (c - y0) / a;
            } else if y0 < ymin {
                y0 = ymin;
                x0 = (c - y0) / a;
            }
            if y1 > ymax {
                y1 = ymax;
                x1 = (c - y1) / a;
            } else if y1 < ymin {
                y1 = ymin;
                x1 = (c - y1) / a;
            }
        }

        let first = DVec2::new(x0, y0);
        let second = DVec2::new(x1, y1);
        Some(if reversed {
            [second, first]
        } else {
            [first, second]
        })
    }
}

/// A finished Voronoi edge, the dual of one Delaunay edge
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiEdge {
    /// Generating sites `[left, right]`
    pub sites: [SiteIdx; 2],
    /// Voronoi vertices `[left, right]`; `None` marks an end at infinity
    pub vertices: [Option<DVec2>; 2],
    /// Visible portion inside the bounds, `p0` at the left end
    pub clipped: Option<LineSegment>,
}

impl VoronoiEdge {
    pub(crate) fn from_bisector(bisector: &Bisector, bounds: &Bounds) -> Self {
        Self {
            sites: bisector.sites,
            vertices: [
                bisector.vertices[0].map(|v| v.coord),
                bisector.vertices[1].map(|v| v.coord),
            ],
            clipped: bisector
                .clip(bounds)
                .map(|[p0, p1]| LineSegment::new(p0, p1)),
        }
    }

    /// An edge is visible once clipping left a segment inside the bounds
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.clipped.is_some()
    }

    #[inline]
    pub fn site(&self, side: Side) -> SiteIdx {
        self.sites[side.index()]
    }

    #[inline]
    pub fn vertex(&self, side: Side) -> Option<DVec2> {
        self.vertices[side.index()]
    }

    /// True if the edge separates `site` from its neighbor
    #[inline]
    pub fn touches_site(&self, site: SiteIdx) -> bool {
        self.sites[0] == site || self.sites[1] == site
    }

    /// Both ends are real vertices
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.vertices[0].is_some() && self.vertices[1].is_some()
    }
}
