//! Color mapping for biomes

use std::collections::HashMap;

use crate::terrain::Biome;

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Trait for mapping terrain types to colors
pub trait ColorMapper<T> {
    /// Map a terrain type to an RGBA color
    fn map_color(&self, terrain: &T) -> TerrainColor;
}

/// Opaque RGBA from a `0xRRGGBB` value
pub fn hex_to_rgba(hex: u32) -> TerrainColor {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// The standard biome palette, see [`Biome::color`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BiomeColorMapper;

impl ColorMapper<Biome> for BiomeColorMapper {
    fn map_color(&self, terrain: &Biome) -> TerrainColor {
        hex_to_rgba(terrain.color())
    }
}

/// The standard palette with some biomes recolored
#[derive(Debug, Clone, Default)]
pub struct CustomColorMapper {
    pub overrides: HashMap<Biome, TerrainColor>,
}

impl CustomColorMapper {
    pub fn with_color(mut self, biome: Biome, color: TerrainColor) -> Self {
        self.overrides.insert(biome, color);
        self
    }
}

impl ColorMapper<Biome> for CustomColorMapper {
    fn map_color(&self, terrain: &Biome) -> TerrainColor {
        self.overrides
            .get(terrain)
            .copied()
            .unwrap_or_else(|| BiomeColorMapper.map_color(terrain))
    }
}
