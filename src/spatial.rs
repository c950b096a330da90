//! Spatial indexing for fast position-to-center lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree over polygon centers
///
/// The nearest center to a point is the site whose Voronoi region holds it,
/// so this answers "which polygon is under the cursor" in O(log n).
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from center positions
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_island::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let centers = vec![
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(9.0, 1.0),
    ///     DVec2::new(5.0, 8.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(DVec2::new(8.0, 2.0)), 1);
    /// # }
    /// ```
    pub fn new(centers: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = centers.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the center nearest to `position`
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        result.item
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let centers = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(10.0, 10.0),
        ];

        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(DVec2::new(1.0, 2.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(9.5, 0.5)), 1);
        assert_eq!(index.find_nearest(DVec2::new(0.5, 7.0)), 2);
        assert_eq!(index.find_nearest(DVec2::new(6.0, 6.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let centers = vec![DVec2::new(3.5, 1.25), DVec2::new(20.0, 40.0)];
        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(centers[0]), 0);
        assert_eq!(index.find_nearest(centers[1]), 1);
    }

    #[test]
    fn test_matches_linear_scan() {
        let centers: Vec<DVec2> = (0..200)
            .map(|i| {
                let t = i as f64;
                DVec2::new((t * 7.31) % 50.0, (t * 3.17) % 50.0)
            })
            .collect();
        let index = SpatialIndex::new(&centers);

        for j in 0..50 {
            let q = DVec2::new((j as f64 * 1.9) % 50.0, (j as f64 * 4.3) % 50.0);
            let expected = centers
                .iter()
                .map(|c| c.distance_squared(q))
                .fold(f64::INFINITY, f64::min);
            let found = index.find_nearest(q);
            assert!((centers[found].distance_squared(q) - expected).abs() < 1e-9);
        }
    }
}
