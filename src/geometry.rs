//! Planar geometry primitives
//!
//! Points are `glam::DVec2`. Everything here is pure; the sweep and the
//! graph builder call into these helpers but no state lives in this module.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Axis-aligned bounding rectangle `[min.x, max.x] × [min.y, max.y]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Rectangle anchored at the origin
    ///
    /// # Errors
    ///
    /// Returns `DegenerateBounds` if either side is non-positive or not finite.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::from_rect(0.0, 0.0, width, height)
    }

    /// Rectangle with an explicit origin
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !x.is_finite() || !y.is_finite() {
            return Err(MapError::DegenerateBounds { width, height });
        }
        Ok(Self {
            min: DVec2::new(x, y),
            max: DVec2::new(x + width, y + height),
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if the point lies exactly on one of the four sides
    #[inline]
    pub fn is_on_border(&self, p: DVec2) -> bool {
        p.x == self.min.x || p.x == self.max.x || p.y == self.min.y || p.y == self.max.y
    }

    /// The four rectangle corners: (min,min), (max,min), (max,max), (min,max)
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// Map a point into `[-1, 1]²`, the frame island shapes are defined in
    pub fn normalize(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            2.0 * (p.x - self.min.x) / self.width() - 1.0,
            2.0 * (p.y - self.min.y) / self.height() - 1.0,
        )
    }
}

/// Which end of a bisector edge, or which side of it, a half-edge refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A finite segment between two points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: DVec2,
    pub p1: DVec2,
}

impl LineSegment {
    pub fn new(p0: DVec2, p1: DVec2) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        self.p0.lerp(self.p1, 0.5)
    }
}

/// Orders points by (y, then x), the sweep order
#[inline]
pub fn compare_y_then_x(a: DVec2, b: DVec2) -> std::cmp::Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

/// Circumcenter of the triangle `a, b, c`, or `None` for collinear input
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.perp_dot(ac);
    if d.abs() < 1e-12 {
        return None;
    }
    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    Some(a + DVec2::new(ux, uy))
}

/// Odd-even rule point-in-polygon test over an ordered vertex ring
///
/// Points exactly on the boundary may land on either side.
pub fn polygon_contains(ring: &[DVec2], p: DVec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if ((pi.y < p.y && pj.y >= p.y) || (pj.y < p.y && pi.y >= p.y))
            && (pi.x <= p.x || pj.x <= p.x)
            && pi.x + (p.y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x) < p.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Sort points by angle around `center`
///
/// With y pointing down (screen space) ascending `atan2` walks clockwise.
pub fn sort_clockwise(center: DVec2, points: &mut [DVec2]) {
    points.sort_by(|a, b| angle_around(center, *a).total_cmp(&angle_around(center, *b)));
}

#[inline]
pub(crate) fn angle_around(center: DVec2, p: DVec2) -> f64 {
    let d = p - center;
    d.y.atan2(d.x)
}

/// Arithmetic mean of a point set, `None` when empty
pub fn mean_point(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec2 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}
