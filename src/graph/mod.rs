//! Polygon / corner / edge graph
//!
//! The dual of a clipped Voronoi diagram stored as three dense arenas. Every
//! relationship is an index into one of them, so the graph holds no
//! references and can be cloned, compared and serialized directly.

mod builder;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{polygon_contains, Bounds};
use crate::terrain::Biome;

pub(crate) use builder::build_graph;
pub use builder::CORNER_MERGE_EPSILON;

pub type CenterIdx = usize;
pub type CornerIdx = usize;
pub type EdgeIdx = usize;

/// A terrain polygon, one per input site
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Center {
    pub index: CenterIdx,
    pub point: DVec2,
    /// Opaque payload copied from the site
    pub color: u32,

    /// Lake or ocean
    pub water: bool,
    pub ocean: bool,
    /// Has both ocean and land neighbors
    pub coast: bool,
    /// Touches the map border
    pub border: bool,
    pub biome: Biome,
    pub elevation: f64,
    pub moisture: f64,

    pub neighbors: Vec<CenterIdx>,
    pub borders: Vec<EdgeIdx>,
    /// Polygon outline, clockwise in y-down coordinates
    pub corners: Vec<CornerIdx>,
}

impl Center {
    pub(crate) fn new(index: CenterIdx, point: DVec2, color: u32) -> Self {
        Self {
            index,
            point,
            color,
            water: false,
            ocean: false,
            coast: false,
            border: false,
            biome: Biome::default(),
            elevation: 0.0,
            moisture: 0.0,
            neighbors: Vec::new(),
            borders: Vec::new(),
            corners: Vec::new(),
        }
    }

    #[inline]
    pub fn is_land(&self) -> bool {
        !self.water
    }
}

/// A polygon vertex shared by the centers meeting there
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    pub index: CornerIdx,
    pub point: DVec2,

    pub ocean: bool,
    pub water: bool,
    pub coast: bool,
    /// Lies exactly on the map rectangle
    pub border: bool,
    pub elevation: f64,
    pub moisture: f64,

    pub touches: Vec<CenterIdx>,
    pub protrudes: Vec<EdgeIdx>,
    pub adjacent: Vec<CornerIdx>,

    /// River volume through this corner, 0 if none
    pub river: u32,
    /// Lowest adjacent corner, or this corner at a local minimum
    pub downslope: CornerIdx,
    /// Coastal corner this corner drains to, or itself
    pub watershed: CornerIdx,
    pub watershed_size: u32,
}

impl Corner {
    pub(crate) fn new(index: CornerIdx, point: DVec2, border: bool) -> Self {
        Self {
            index,
            point,
            ocean: false,
            water: false,
            coast: false,
            border,
            elevation: 0.0,
            moisture: 0.0,
            touches: Vec::new(),
            protrudes: Vec::new(),
            adjacent: Vec::new(),
            river: 0,
            downslope: index,
            watershed: index,
            watershed_size: 0,
        }
    }
}

/// One Voronoi edge together with its dual Delaunay edge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub index: EdgeIdx,
    /// Delaunay endpoints: the two polygons this edge separates
    pub d0: CenterIdx,
    pub d1: CenterIdx,
    /// Voronoi endpoints
    pub v0: CornerIdx,
    pub v1: CornerIdx,
    pub midpoint: DVec2,
    /// River volume along this edge, 0 if none
    pub river: u32,
}

impl Edge {
    /// The endpoint across from `corner`, if `corner` is one of them
    pub fn other_corner(&self, corner: CornerIdx) -> Option<CornerIdx> {
        match corner {
            c if c == self.v0 => Some(self.v1),
            c if c == self.v1 => Some(self.v0),
            _ => None,
        }
    }

    /// The polygon across from `center`, if `center` is one of them
    pub fn other_center(&self, center: CenterIdx) -> Option<CenterIdx> {
        match center {
            c if c == self.d0 => Some(self.d1),
            c if c == self.d1 => Some(self.d0),
            _ => None,
        }
    }
}

/// Centers, corners and edges with full cross-adjacency
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub centers: Vec<Center>,
    pub corners: Vec<Corner>,
    pub edges: Vec<Edge>,
    pub bounds: Bounds,
}

impl Graph {
    /// Outline of a center as points, in its stored corner order
    pub fn polygon(&self, center: CenterIdx) -> Vec<DVec2> {
        self.centers.get(center).map_or_else(Vec::new, |c| {
            c.corners.iter().map(|&q| self.corners[q].point).collect()
        })
    }

    /// Odd-even test of `p` against a center's polygon
    ///
    /// Points exactly on the outline may report either answer.
    pub fn point_inside(&self, center: CenterIdx, p: DVec2) -> bool {
        polygon_contains(&self.polygon(center), p)
    }

    /// Edge joining two adjacent corners
    pub fn edge_between_corners(&self, a: CornerIdx, b: CornerIdx) -> Option<EdgeIdx> {
        self.corners.get(a)?.protrudes.iter().copied().find(|&e| {
            let edge = &self.edges[e];
            (edge.v0 == a && edge.v1 == b) || (edge.v0 == b && edge.v1 == a)
        })
    }

    /// Edge separating two neighboring centers
    pub fn edge_between_centers(&self, a: CenterIdx, b: CenterIdx) -> Option<EdgeIdx> {
        self.centers
            .get(a)?
            .borders
            .iter()
            .copied()
            .find(|&e| self.edges[e].other_center(a) == Some(b))
    }

    /// Corners that are neither ocean nor coast
    pub fn land_corners(&self) -> Vec<CornerIdx> {
        self.corners
            .iter()
            .filter(|q| !q.ocean && !q.coast)
            .map(|q| q.index)
            .collect()
    }
}
