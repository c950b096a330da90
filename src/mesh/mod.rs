//! Mesh generation for IslandMap
//!
//! Generates engine-agnostic mesh data from the map's polygons and rivers.

mod colors;

pub use colors::{hex_to_rgba, BiomeColorMapper, ColorMapper, CustomColorMapper, TerrainColor};

use glam::{DVec2, Vec3};

use crate::map::IslandMap;
use crate::terrain::Biome;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Positions are `[x, y, elevation]` in map units.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    /// One flat normal per polygon, repeated on each of its vertices
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A river edge for line drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverSegment {
    pub from: DVec2,
    pub to: DVec2,
    pub volume: u32,
}

/// Generate mesh from map with color mapping
///
/// Each polygon is a triangle fan from its center to its ordered corners.
/// All vertices of a polygon share its biome color.
pub fn generate_mesh<C>(map: &IslandMap, color_mapper: &C) -> MeshData
where
    C: ColorMapper<Biome>,
{
    generate_mesh_with_visibility(map, color_mapper, None, [0.0, 0.0, 0.0, 1.0])
}

/// Generate mesh with fog of war support
///
/// # Arguments
/// * `map` - The map to generate mesh for
/// * `color_mapper` - Maps biomes to colors
/// * `visible_centers` - Optional slice of visible center indices. If None, all are visible.
/// * `hidden_color` - Color for hidden polygons (typically black)
pub fn generate_mesh_with_visibility<C>(
    map: &IslandMap,
    color_mapper: &C,
    visible_centers: Option<&[usize]>,
    hidden_color: TerrainColor,
) -> MeshData
where
    C: ColorMapper<Biome>,
{
    let mut mesh = MeshData::default();

    let visible_set: Option<std::collections::HashSet<usize>> =
        visible_centers.map(|centers| centers.iter().copied().collect());

    for center in map.centers() {
        // Skip degenerate polygons
        if center.corners.len() < 3 {
            continue;
        }

        let is_visible = visible_set
            .as_ref()
            .map(|set| set.contains(&center.index))
            .unwrap_or(true);

        let color = if is_visible {
            color_mapper.map_color(&center.biome)
        } else {
            hidden_color
        };

        let hub = lift(center.point, center.elevation);
        let ring: Vec<Vec3> = center
            .corners
            .iter()
            .map(|&q| {
                let corner = &map.corners()[q];
                lift(corner.point, corner.elevation)
            })
            .collect();

        triangulate_polygon(hub, &ring, color, &mut mesh);
    }

    mesh
}

/// Endpoints and volume of every edge a river runs along
pub fn river_segments(map: &IslandMap) -> Vec<RiverSegment> {
    map.edges()
        .iter()
        .filter(|e| e.river > 0)
        .map(|e| RiverSegment {
            from: map.corners()[e.v0].point,
            to: map.corners()[e.v1].point,
            volume: e.river,
        })
        .collect()
}

#[inline]
fn lift(p: DVec2, elevation: f64) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, elevation as f32)
}

/// Newell's normal of a closed ring; +z for a counterclockwise ring
fn polygon_normal(ring: &[Vec3]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.try_normalize().unwrap_or(Vec3::Z)
}

/// Triangulate a single polygon as a triangle fan
fn triangulate_polygon(hub: Vec3, ring: &[Vec3], color: TerrainColor, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;
    let normal = polygon_normal(ring).to_array();

    mesh.positions.push(hub.to_array());
    mesh.normals.push(normal);
    mesh.colors.push(color);

    for vertex in ring {
        mesh.positions.push(vertex.to_array());
        mesh.normals.push(normal);
        mesh.colors.push(color);
    }

    let num_vertices = ring.len();
    for i in 0..num_vertices {
        let next_i = (i + 1) % num_vertices;
        mesh.indices.push(base_idx); // Center
        mesh.indices.push(base_idx + 1 + i as u32); // Current vertex
        mesh.indices.push(base_idx + 1 + next_i as u32); // Next vertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IslandShapeKind, MapConfigBuilder};

    fn map() -> IslandMap {
        let config = MapConfigBuilder::new()
            .seed(42)
            .point_count(300)
            .unwrap()
            .island_shape(IslandShapeKind::Radial)
            .build()
            .unwrap();
        IslandMap::generate(config).unwrap()
    }

    #[test]
    fn test_generate_mesh() {
        let map = map();
        let mesh = generate_mesh(&map, &BiomeColorMapper);

        assert!(!mesh.is_empty());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.indices.len() % 3, 0);

        // One hub plus the ring per polygon, one triangle per ring vertex.
        let ring_total: usize = map.centers().iter().map(|c| c.corners.len()).sum();
        assert_eq!(mesh.vertex_count(), map.center_count() + ring_total);
        assert_eq!(mesh.triangle_count(), ring_total);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_normals_face_up() {
        let mesh = generate_mesh(&map(), &BiomeColorMapper);
        for n in &mesh.normals {
            assert!(n[2] > 0.0, "{n:?}");
        }
    }

    #[test]
    fn test_mesh_with_fog_of_war() {
        let map = map();
        let visible: Vec<usize> = (0..100).collect();
        let hidden = [0.0, 0.0, 0.0, 1.0];
        let mesh = generate_mesh_with_visibility(&map, &BiomeColorMapper, Some(&visible), hidden);

        // The first vertex belongs to center 0, which is visible.
        let expected = BiomeColorMapper.map_color(&map.centers()[0].biome);
        assert_eq!(mesh.colors[0], expected);
        assert!(mesh.colors.iter().any(|&c| c == hidden));
    }

    #[test]
    fn test_mesh_consistency() {
        let map = map();
        let mesh1 = generate_mesh(&map, &BiomeColorMapper);
        let mesh2 = generate_mesh(&map, &BiomeColorMapper);

        assert_eq!(mesh1.positions, mesh2.positions);
        assert_eq!(mesh1.indices, mesh2.indices);
    }

    #[test]
    fn test_river_segments() {
        let map = map();
        let segments = river_segments(&map);
        let river_edges = map.edges().iter().filter(|e| e.river > 0).count();
        assert_eq!(segments.len(), river_edges);
        for s in &segments {
            assert!(s.volume > 0);
            assert!(s.from != s.to);
        }
    }
}
