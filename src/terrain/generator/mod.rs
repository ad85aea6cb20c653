//! Deterministic baseline generation.
//!
//! Two peers loading the same chunk coordinate with the same seed must
//! produce bit-identical baselines, so everything here is a pure function of
//! seed and world position.

mod heightmap;
mod mudmap;

pub use heightmap::HeightmapGenerator;
pub use mudmap::MudmapGenerator;

use crate::config::TerrainConfig;
use crate::terrain::coords::ChunkCoords;

/// Seeded generator for every baseline field a chunk needs.
pub struct TerrainGenerator {
    heights: HeightmapGenerator,
    mud: MudmapGenerator,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            heights: HeightmapGenerator::new(seed),
            // Offset seed so the mud field decorrelates from elevation.
            mud: MudmapGenerator::new(seed.wrapping_add(1)),
        }
    }

    /// Baseline elevation at a world-space point.
    pub fn baseline_height(&self, x: f32, z: f32) -> f32 {
        self.heights.sample(x as f64, z as f64)
    }

    /// Baseline wetness in `[0, 1]` at a world-space point.
    pub fn baseline_mud(&self, x: f32, z: f32) -> f32 {
        self.mud.sample(x as f64, z as f64)
    }

    /// Baseline hardness at a world-space point. Wetter ground is softer.
    pub fn baseline_hardness(&self, x: f32, z: f32, config: &TerrainConfig) -> f32 {
        let mud = self.baseline_mud(x, z);
        (config.target_hardness * (1.0 - 0.4 * mud))
            .clamp(config.min_hardness, config.max_hardness)
    }

    /// Generate the `(base, hardness, mud)` arrays for a whole chunk.
    pub fn generate(
        &self,
        coord: ChunkCoords,
        config: &TerrainConfig,
    ) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let step = config.cell_step();
        let origin = coord.world_origin(config.chunk_size);
        let cells = config.cells();

        let mut base = Vec::with_capacity(cells);
        let mut hardness = Vec::with_capacity(cells);
        let mut mud = Vec::with_capacity(cells);

        for z in 0..config.resolution {
            for x in 0..config.resolution {
                let wx = origin.x + x as f32 * step;
                let wz = origin.z + z as f32 * step;
                base.push(self.baseline_height(wx, wz));
                hardness.push(self.baseline_hardness(wx, wz, config));
                mud.push(self.baseline_mud(wx, wz));
            }
        }

        (base, hardness, mud)
    }
}

#[cfg(test)]
mod tests;
