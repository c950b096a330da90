//! Island shape predicates
//!
//! A shape answers "is this point land?" for a point in normalized map
//! coordinates, where both axes run from -1 to 1 and the origin is the map
//! center. Shapes draw their random parameters once, at construction, from
//! the map's generator.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::perlin::{sample_perlin_2d, PerlinConfig};

/// Land/water predicate over normalized coordinates
pub trait IslandShape {
    fn is_land(&self, q: DVec2) -> bool;
}

impl<F> IslandShape for F
where
    F: Fn(DVec2) -> bool,
{
    fn is_land(&self, q: DVec2) -> bool {
        self(q)
    }
}

/// Built-in shapes selectable from configuration
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IslandShapeKind {
    /// Overlapping sine waves around the center, with one bay
    Radial,
    /// Fractal noise thresholded by distance from the center
    #[default]
    Perlin,
    /// Land everywhere
    Square,
}

impl IslandShapeKind {
    /// Instantiate the shape, drawing its parameters from `rng`
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Box<dyn IslandShape> {
        match self {
            IslandShapeKind::Radial => Box::new(RadialIsland::new(rng)),
            IslandShapeKind::Perlin => Box::new(PerlinIsland::new(rng)),
            IslandShapeKind::Square => Box::new(SquareIsland),
        }
    }
}

/// Gap between the main island and its outer ring; 1.0 closes it
pub const ISLAND_FACTOR: f64 = 1.07;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialIsland {
    pub bumps: u32,
    pub start_angle: f64,
    pub dip_angle: f64,
    pub dip_width: f64,
}

impl RadialIsland {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bumps = rng.gen_range(1..6);
        let start_angle = rng.gen::<f64>() * TAU;
        let dip_angle = rng.gen::<f64>() * TAU;
        let dip_width = 0.2 + 0.5 * rng.gen::<f64>();
        Self {
            bumps,
            start_angle,
            dip_angle,
            dip_width,
        }
    }
}

impl IslandShape for RadialIsland {
    fn is_land(&self, q: DVec2) -> bool {
        let angle = q.y.atan2(q.x);
        let length = 0.5 * (q.x.abs().max(q.y.abs()) + q.length());
        let bumps = self.bumps as f64;

        let in_dip = [0.0, TAU, -TAU]
            .iter()
            .any(|shift| (angle - self.dip_angle + shift).abs() < self.dip_width);
        let (r1, r2) = if in_dip {
            (0.2, 0.2)
        } else {
            (
                0.5 + 0.40 * (self.start_angle + bumps * angle + ((bumps + 3.0) * angle).cos()).sin(),
                0.7 - 0.20 * (self.start_angle + bumps * angle - ((bumps + 2.0) * angle).sin()).sin(),
            )
        };

        length < r1 || (length > r1 * ISLAND_FACTOR && length < r2)
    }
}

/// Noise island: land where the noise beats a threshold rising toward the edges
///
/// A point `q` is land when its sample exceeds `0.3 + 0.3·|q|²`. The threshold
/// grows with squared radius, so noise alone never reaches the map corners
/// (`|q|² = 2` needs a sample above 0.9). A flat `sample > 0.3` cut is not used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinIsland {
    pub seed: u32,
    pub offset: DVec2,
    pub noise: PerlinConfig,
}

impl PerlinIsland {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            seed: rng.gen(),
            offset: DVec2::new(rng.gen_range(0.0..256.0), rng.gen_range(0.0..256.0)),
            noise: PerlinConfig::default(),
        }
    }
}

impl IslandShape for PerlinIsland {
    fn is_land(&self, q: DVec2) -> bool {
        let c = sample_perlin_2d(q + self.offset, self.seed, &self.noise);
        c > 0.3 + 0.3 * q.length_squared()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareIsland;

impl IslandShape for SquareIsland {
    fn is_land(&self, _q: DVec2) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn land_fraction(shape: &dyn IslandShape) -> f64 {
        let steps = 40;
        let mut land = 0;
        for i in 0..steps {
            for j in 0..steps {
                let q = DVec2::new(
                    -1.0 + 2.0 * i as f64 / (steps - 1) as f64,
                    -1.0 + 2.0 * j as f64 / (steps - 1) as f64,
                );
                if shape.is_land(q) {
                    land += 1;
                }
            }
        }
        land as f64 / (steps * steps) as f64
    }

    #[test]
    fn test_square_is_all_land() {
        assert_eq!(land_fraction(&SquareIsland), 1.0);
    }

    #[test]
    fn test_closure_shape() {
        let disc = |q: DVec2| q.length() < 0.5;
        assert!(disc.is_land(DVec2::ZERO));
        assert!(!disc.is_land(DVec2::new(0.9, 0.0)));
    }

    #[test]
    fn test_radial_parameters() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let island = RadialIsland::new(&mut rng);
            assert!((1..6).contains(&island.bumps));
            assert!((0.2..=0.7).contains(&island.dip_width));
            assert!((0.0..TAU).contains(&island.start_angle));
        }
    }

    #[test]
    fn test_radial_is_mixed() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let island = RadialIsland::new(&mut rng);
        let fraction = land_fraction(&island);
        assert!(fraction > 0.0 && fraction < 1.0, "{fraction}");
        // The map corners sit outside the outer ring.
        assert!(!island.is_land(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_perlin_threshold_rises_with_radius() {
        // No octaves samples a flat 0.5, so land is exactly |q|² < 2/3.
        let island = PerlinIsland {
            seed: 1,
            offset: DVec2::ZERO,
            noise: PerlinConfig {
                octaves: 0,
                ..Default::default()
            },
        };
        assert!(island.is_land(DVec2::ZERO));
        assert!(island.is_land(DVec2::new(0.8, 0.0)));
        assert!(!island.is_land(DVec2::new(0.6, 0.6)));
        assert!(!island.is_land(DVec2::new(1.0, 0.0)));
        assert!(!island.is_land(DVec2::new(-1.0, -1.0)));
    }

    #[test]
    fn test_perlin_is_mixed_and_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let first = PerlinIsland::new(&mut a);
        let second = PerlinIsland::new(&mut b);
        assert_eq!(first, second);

        let fraction = land_fraction(&first);
        assert!(fraction > 0.0 && fraction < 1.0, "{fraction}");
        // Noise never reaches the threshold at the far corners.
        assert!(!first.is_land(DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_kind_builds_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let square = IslandShapeKind::Square.build(&mut rng);
        assert!(square.is_land(DVec2::new(0.99, -0.99)));
        assert_eq!(IslandShapeKind::default(), IslandShapeKind::Perlin);
    }
}
