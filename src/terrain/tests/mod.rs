
use crate::config::TerrainConfig;
use crate::terrain::chunk::{Chunk, ChunkStore};
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::TerrainGenerator;

/// Small chunks (16x16 cells, one world unit per cell) keep tests fast.
pub(crate) fn test_config() -> TerrainConfig {
    TerrainConfig {
        resolution: 16,
        ..TerrainConfig::default()
    }
}

pub(crate) fn loaded_store(
    config: &TerrainConfig,
    coords: &[ChunkCoords],
) -> (ChunkStore, TerrainGenerator) {
    let generator = TerrainGenerator::new(config.seed);
    let mut store = ChunkStore::new(config.max_resident_chunks);
    for &coord in coords {
        let (base, hardness, mud) = generator.generate(coord, config);
        store
            .allocate_with(coord, || Chunk::new(coord, config, base, hardness, mud, 0.0))
            .unwrap();
    }
    (store, generator)
}
