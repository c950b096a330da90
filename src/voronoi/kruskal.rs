//! Kruskal spanning trees over Delaunay links

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::LineSegment;
use crate::voronoi::site::SiteIdx;

/// Which spanning tree to extract
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KruskalKind {
    /// Shortest total length
    #[default]
    Minimum,
    /// Longest total length
    Maximum,
}

/// Union-find over site indices, union by size with path halving
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; false if already joined
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Spanning forest of `links`, each a site pair and the segment joining them
///
/// Links are taken shortest first (longest first for `Maximum`); equal
/// lengths keep their input order.
pub(crate) fn spanning_tree(
    site_count: usize,
    mut links: Vec<([SiteIdx; 2], LineSegment)>,
    kind: KruskalKind,
) -> Vec<LineSegment> {
    match kind {
        KruskalKind::Minimum => links.sort_by(|a, b| a.1.length().total_cmp(&b.1.length())),
        KruskalKind::Maximum => links.sort_by(|a, b| b.1.length().total_cmp(&a.1.length())),
    }

    let mut sets = DisjointSet::new(site_count);
    let mut tree = Vec::with_capacity(site_count.saturating_sub(1));
    for ([s0, s1], segment) in links {
        if sets.union(s0, s1) {
            tree.push(segment);
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn link(s0: usize, s1: usize, pts: &[DVec2]) -> ([SiteIdx; 2], LineSegment) {
        ([s0, s1], LineSegment::new(pts[s0], pts[s1]))
    }

    fn total(tree: &[LineSegment]) -> f64 {
        tree.iter().map(|s| s.length()).sum()
    }

    #[test]
    fn test_square_with_diagonals() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 3.0),
            DVec2::new(0.0, 3.0),
        ];
        let links = || {
            vec![
                link(0, 1, &pts),
                link(1, 2, &pts),
                link(2, 3, &pts),
                link(3, 0, &pts),
                link(0, 2, &pts),
                link(1, 3, &pts),
            ]
        };

        // Two sides of 3 and one of 4.
        let min = spanning_tree(4, links(), KruskalKind::Minimum);
        assert_eq!(min.len(), 3);
        assert!((total(&min) - 10.0).abs() < 1e-12);

        // Both diagonals of 5, then a side of 4.
        let max = spanning_tree(4, links(), KruskalKind::Maximum);
        assert_eq!(max.len(), 3);
        assert!((total(&max) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_disconnected_gives_forest() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(6.0, 5.0),
        ];
        let tree = spanning_tree(4, vec![link(0, 1, &pts), link(2, 3, &pts)], KruskalKind::Minimum);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(spanning_tree(1, Vec::new(), KruskalKind::Maximum).is_empty());
        assert!(spanning_tree(0, Vec::new(), KruskalKind::Minimum).is_empty());
    }

    #[test]
    fn test_union_find() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 4));
        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(2), sets.find(0));
    }
}
