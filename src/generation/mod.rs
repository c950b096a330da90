//! Site generation
//!
//! Places the map's sites: uniform random points, evened out by Lloyd's
//! relaxation.

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, relax_points, LloydOptions};
pub use points::generate_random_points;

use glam::DVec2;
use rand::Rng;

use crate::config::MapConfig;
use crate::error::Result;
use crate::geometry::Bounds;

/// Generate relaxed sites from configuration
///
/// Draws `config.point_count` points from `rng`, then runs the configured
/// relaxation passes over them.
pub fn generate_sites<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> Result<Vec<DVec2>> {
    let bounds = Bounds::new(config.width, config.height)?;

    // Step 1: Uniform random points
    let points = generate_random_points(config.point_count, config.width, config.height, rng);

    // Step 2: Lloyd's relaxation with convergence detection
    if config.lloyd_iterations == 0 {
        return Ok(points);
    }
    let options = LloydOptions {
        max_iterations: config.lloyd_iterations,
        convergence_threshold: config.lloyd_convergence,
    };
    lloyd_relaxation_with_options(points, bounds, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfigBuilder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_sites() {
        let config = MapConfigBuilder::new()
            .seed(1)
            .point_count(150)
            .unwrap()
            .size(40.0, 30.0)
            .unwrap()
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let sites = generate_sites(&config, &mut rng).unwrap();

        assert_eq!(sites.len(), 150);
        let bounds = Bounds::new(40.0, 30.0).unwrap();
        assert!(sites.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_no_relaxation_returns_raw_points() {
        let config = MapConfigBuilder::new()
            .point_count(20)
            .unwrap()
            .lloyd_iterations(0)
            .unwrap()
            .build()
            .unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            generate_sites(&config, &mut a).unwrap(),
            generate_random_points(20, 50.0, 50.0, &mut b)
        );
    }
}
