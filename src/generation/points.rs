//! Random site placement

use std::collections::HashSet;

use glam::DVec2;
use rand::Rng;

/// Uniform random points in `[0, width) × [0, height)`
///
/// Every point is distinct; a draw landing exactly on an earlier point is
/// thrown away and redrawn.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use voronoi_island::generation::generate_random_points;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let points = generate_random_points(100, 50.0, 50.0, &mut rng);
/// assert_eq!(points.len(), 100);
/// ```
pub fn generate_random_points<R: Rng + ?Sized>(
    count: usize,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Vec<DVec2> {
    let mut seen = HashSet::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let p = DVec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        if seen.insert((p.x.to_bits(), p.y.to_bits())) {
            points.push(p);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_points_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let points = generate_random_points(1_000, 30.0, 20.0, &mut rng);
        assert_eq!(points.len(), 1_000);
        for p in &points {
            assert!((0.0..30.0).contains(&p.x));
            assert!((0.0..20.0).contains(&p.y));
        }
    }

    #[test]
    fn test_points_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(12345);
        let mut b = ChaCha8Rng::seed_from_u64(12345);
        assert_eq!(
            generate_random_points(64, 10.0, 10.0, &mut a),
            generate_random_points(64, 10.0, 10.0, &mut b)
        );
    }

    #[test]
    fn test_points_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = generate_random_points(500, 5.0, 5.0, &mut rng);
        let unique: HashSet<_> = points.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect();
        assert_eq!(unique.len(), points.len());
    }

    #[test]
    fn test_zero_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(generate_random_points(0, 1.0, 1.0, &mut rng).is_empty());
    }
}
