//! Lloyd's Relaxation for uniform point distribution
//!
//! Each pass builds a Voronoi diagram of the current points and moves every
//! point to the mean of its clipped region's vertices. Repeating this evens
//! out clumps and gives the polygons a rounder, more regular look.

use std::time::Instant;

use glam::DVec2;
use tracing::debug;

use crate::error::Result;
use crate::geometry::{mean_point, Bounds};
use crate::voronoi::Voronoi;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of passes to run
    pub max_iterations: usize,
    /// Stop once no point moves farther than this, in world units
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 2,
            convergence_threshold: 0.0,
        }
    }
}

/// One relaxation pass
///
/// Returns the moved points, in input order, and the largest distance any of
/// them moved. A point whose region came out empty stays where it is.
///
/// # Errors
///
/// Any error from building the diagram: empty input, duplicate points or
/// points outside `bounds`.
pub fn relax_points(points: &[DVec2], bounds: Bounds) -> Result<(Vec<DVec2>, f64)> {
    let voronoi = Voronoi::new(points, None, bounds)?;
    let mut max_displacement: f64 = 0.0;

    let relaxed = points
        .iter()
        .enumerate()
        .map(|(i, &old)| {
            let new = mean_point(&voronoi.region(i)).unwrap_or(old);
            max_displacement = max_displacement.max(old.distance(new));
            new
        })
        .collect();

    Ok((relaxed, max_displacement))
}

/// Apply Lloyd's Relaxation for a fixed number of passes
pub fn lloyd_relaxation(points: Vec<DVec2>, bounds: Bounds, iterations: usize) -> Result<Vec<DVec2>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, bounds, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// Runs up to `options.max_iterations` passes, stopping early once the
/// largest displacement in a pass falls under the convergence threshold.
pub fn lloyd_relaxation_with_options(
    mut points: Vec<DVec2>,
    bounds: Bounds,
    options: LloydOptions,
) -> Result<Vec<DVec2>> {
    let total_start = Instant::now();
    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();
        let (relaxed, max_displacement) = relax_points(&points, bounds)?;
        points = relaxed;
        iterations_run = iteration + 1;

        debug!(
            target: "voronoi_island::lloyd",
            iteration = iterations_run,
            max_displacement,
            elapsed = ?iter_start.elapsed(),
            "lloyd.iteration"
        );

        if options.convergence_threshold > 0.0 && max_displacement < options.convergence_threshold {
            converged = true;
            break;
        }
    }

    debug!(
        target: "voronoi_island::lloyd",
        points = points.len(),
        iterations = iterations_run,
        max_iterations = options.max_iterations,
        converged,
        elapsed = ?total_start.elapsed(),
        "lloyd.finished"
    );

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_random_points;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> Bounds {
        Bounds::new(50.0, 50.0).unwrap()
    }

    fn points(n: usize, seed: u64) -> Vec<DVec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_random_points(n, 50.0, 50.0, &mut rng)
    }

    /// Smallest distance between any two points
    fn min_spacing(points: &[DVec2]) -> f64 {
        let mut best = f64::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                best = best.min(a.distance(*b));
            }
        }
        best
    }

    #[test]
    fn test_single_point_moves_to_box_center() {
        let (relaxed, moved) = relax_points(&[DVec2::new(10.0, 40.0)], bounds()).unwrap();
        assert!(relaxed[0].distance(DVec2::splat(25.0)) < 1e-9);
        assert!((moved - DVec2::new(10.0, 40.0).distance(DVec2::splat(25.0))).abs() < 1e-9);
    }

    #[test]
    fn test_lloyd_relaxation() {
        let original = points(200, 42);
        let relaxed = lloyd_relaxation(original.clone(), bounds(), 3).unwrap();

        assert_eq!(relaxed.len(), 200);
        for p in &relaxed {
            assert!(bounds().contains(*p));
        }
        // Clumps spread out.
        assert!(min_spacing(&relaxed) > min_spacing(&original));
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let relaxed1 = lloyd_relaxation(points(80, 12345), bounds(), 2).unwrap();
        let relaxed2 = lloyd_relaxation(points(80, 12345), bounds(), 2).unwrap();
        assert_eq!(relaxed1, relaxed2);
    }

    #[test]
    fn test_lloyd_relaxation_with_options() {
        let options = LloydOptions {
            max_iterations: 20,
            convergence_threshold: 1.0,
        };
        let relaxed = lloyd_relaxation_with_options(points(100, 42), bounds(), options).unwrap();
        assert_eq!(relaxed.len(), 100);
        assert!(relaxed.iter().all(|p| bounds().contains(*p)));
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 2);
        assert_eq!(options.convergence_threshold, 0.0);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let original = points(30, 9);
        let relaxed = lloyd_relaxation(original.clone(), bounds(), 0).unwrap();
        assert_eq!(relaxed, original);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(relax_points(&[], bounds()).is_err());
        let twice = [DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0)];
        assert!(relax_points(&twice, bounds()).is_err());
    }
}
