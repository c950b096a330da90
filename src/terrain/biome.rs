//! Biome classification

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::{Center, Graph};

/// Biome of a terrain polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Biome {
    #[default]
    Ocean,
    Marsh,
    Ice,
    Lake,
    Beach,
    Snow,
    Tundra,
    Bare,
    Scorched,
    Taiga,
    Shrubland,
    TemperateDesert,
    TemperateRainForest,
    TemperateDeciduousForest,
    Grassland,
    TropicalRainForest,
    TropicalSeasonalForest,
    SubtropicalDesert,
}

impl Biome {
    pub const ALL: [Biome; 18] = [
        Biome::Ocean,
        Biome::Marsh,
        Biome::Ice,
        Biome::Lake,
        Biome::Beach,
        Biome::Snow,
        Biome::Tundra,
        Biome::Bare,
        Biome::Scorched,
        Biome::Taiga,
        Biome::Shrubland,
        Biome::TemperateDesert,
        Biome::TemperateRainForest,
        Biome::TemperateDeciduousForest,
        Biome::Grassland,
        Biome::TropicalRainForest,
        Biome::TropicalSeasonalForest,
        Biome::SubtropicalDesert,
    ];

    /// Display color as `0xRRGGBB`
    pub fn color(self) -> u32 {
        match self {
            Biome::Ocean => 0x44447a,
            Biome::Marsh => 0x2f6666,
            Biome::Ice => 0x99ffff,
            Biome::Lake => 0x336699,
            Biome::Beach => 0xa09077,
            Biome::Snow => 0xffffff,
            Biome::Tundra => 0xbbbbaa,
            Biome::Bare => 0x888888,
            Biome::Scorched => 0x555555,
            Biome::Taiga => 0x99aa77,
            Biome::Shrubland => 0x889977,
            Biome::TemperateDesert => 0xc9d29b,
            Biome::TemperateRainForest => 0x448855,
            Biome::TemperateDeciduousForest => 0x679459,
            Biome::Grassland => 0x88aa55,
            Biome::TropicalRainForest => 0x337755,
            Biome::TropicalSeasonalForest => 0x559944,
            Biome::SubtropicalDesert => 0xd2b98b,
        }
    }

    /// Check if this biome is open water
    pub fn is_water(self) -> bool {
        matches!(self, Biome::Ocean | Biome::Lake | Biome::Marsh | Biome::Ice)
    }
}

/// Decision table over a polygon's flags, elevation and moisture
pub fn classify(center: &Center) -> Biome {
    let (e, m) = (center.elevation, center.moisture);
    if center.ocean {
        Biome::Ocean
    } else if center.water {
        if e < 0.1 {
            Biome::Marsh
        } else if e > 0.8 {
            Biome::Ice
        } else {
            Biome::Lake
        }
    } else if center.coast {
        Biome::Beach
    } else if e > 0.8 {
        match m {
            m if m > 0.50 => Biome::Snow,
            m if m > 0.33 => Biome::Tundra,
            m if m > 0.16 => Biome::Bare,
            _ => Biome::Scorched,
        }
    } else if e > 0.6 {
        match m {
            m if m > 0.66 => Biome::Taiga,
            m if m > 0.33 => Biome::Shrubland,
            _ => Biome::TemperateDesert,
        }
    } else if e > 0.3 {
        match m {
            m if m > 0.83 => Biome::TemperateRainForest,
            m if m > 0.50 => Biome::TemperateDeciduousForest,
            m if m > 0.16 => Biome::Grassland,
            _ => Biome::TemperateDesert,
        }
    } else {
        match m {
            m if m > 0.66 => Biome::TropicalRainForest,
            m if m > 0.33 => Biome::TropicalSeasonalForest,
            m if m > 0.16 => Biome::Grassland,
            _ => Biome::SubtropicalDesert,
        }
    }
}

pub(crate) fn assign_biomes(graph: &mut Graph) {
    for center in &mut graph.centers {
        center.biome = classify(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn land(elevation: f64, moisture: f64) -> Center {
        let mut center = Center::new(0, DVec2::ZERO, 0);
        center.elevation = elevation;
        center.moisture = moisture;
        center
    }

    #[test]
    fn test_flags_take_priority() {
        let mut c = land(0.95, 0.95);
        c.coast = true;
        assert_eq!(classify(&c), Biome::Beach);
        c.water = true;
        assert_eq!(classify(&c), Biome::Ice);
        c.ocean = true;
        assert_eq!(classify(&c), Biome::Ocean);
    }

    #[test]
    fn test_lakes() {
        let mut c = land(0.05, 0.0);
        c.water = true;
        assert_eq!(classify(&c), Biome::Marsh);
        c.elevation = 0.5;
        assert_eq!(classify(&c), Biome::Lake);
        c.elevation = 0.85;
        assert_eq!(classify(&c), Biome::Ice);
    }

    #[test]
    fn test_elevation_bands() {
        let cases = [
            (0.9, 0.6, Biome::Snow),
            (0.9, 0.4, Biome::Tundra),
            (0.9, 0.2, Biome::Bare),
            (0.9, 0.1, Biome::Scorched),
            (0.7, 0.7, Biome::Taiga),
            (0.7, 0.5, Biome::Shrubland),
            (0.7, 0.2, Biome::TemperateDesert),
            (0.4, 0.9, Biome::TemperateRainForest),
            (0.4, 0.6, Biome::TemperateDeciduousForest),
            (0.4, 0.3, Biome::Grassland),
            (0.4, 0.1, Biome::TemperateDesert),
            (0.1, 0.7, Biome::TropicalRainForest),
            (0.1, 0.5, Biome::TropicalSeasonalForest),
            (0.1, 0.2, Biome::Grassland),
            (0.1, 0.0, Biome::SubtropicalDesert),
        ];
        for (e, m, expected) in cases {
            assert_eq!(classify(&land(e, m)), expected, "e={e} m={m}");
        }
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        // Exactly on a threshold falls into the lower band.
        assert_eq!(classify(&land(0.8, 0.66)), Biome::Shrubland);
        assert_eq!(classify(&land(0.3, 0.16)), Biome::SubtropicalDesert);
    }

    #[test]
    fn test_colors_are_distinct() {
        let mut colors: Vec<u32> = Biome::ALL.iter().map(|b| b.color()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), Biome::ALL.len());
        assert_eq!(Biome::Snow.color(), 0xffffff);
    }
}
