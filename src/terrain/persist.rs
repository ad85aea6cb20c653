//! Save/load of resident chunk state.
//!
//! A save is a count-prefixed sequence of chunk records carrying the three
//! mutable arrays. The baseline is *not* persisted: it is a deterministic
//! function of seed and position, so load regenerates it and clamps the
//! persisted heights back into the deformation window in case the bytes were
//! tampered with or the config changed.

use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::terrain::chunk::{Chunk, ChunkStore};
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::TerrainGenerator;

#[derive(Serialize, Deserialize)]
struct ChunkRecord {
    coord: (i32, i32),
    height: Vec<f32>,
    hardness: Vec<f32>,
    mud: Vec<f32>,
}

/// Serialize every resident chunk.
pub fn save(store: &ChunkStore) -> Result<Vec<u8>, TerrainError> {
    let records: Vec<ChunkRecord> = store
        .iter()
        .map(|(coord, chunk)| ChunkRecord {
            coord: (coord.x, coord.z),
            height: chunk.height().to_vec(),
            hardness: chunk.hardness().to_vec(),
            mud: chunk.mud().to_vec(),
        })
        .collect();
    Ok(bincode::serialize(&records)?)
}

/// Restore chunks from a save produced by [`save`]. Returns the number of
/// chunks loaded. Pending sync records are transient and are not part of a
/// save.
pub fn load(
    store: &mut ChunkStore,
    generator: &TerrainGenerator,
    config: &TerrainConfig,
    bytes: &[u8],
    now: f64,
) -> Result<usize, TerrainError> {
    let records: Vec<ChunkRecord> = bincode::deserialize(bytes)?;
    let expected = config.cells();
    let mut loaded = 0;

    for record in records {
        let coord = ChunkCoords {
            x: record.coord.0,
            z: record.coord.1,
        };
        for len in [record.height.len(), record.hardness.len(), record.mud.len()] {
            if len != expected {
                return Err(TerrainError::CorruptRecord {
                    coord,
                    len,
                    expected,
                });
            }
        }

        let (base, _, _) = generator.generate(coord, config);
        let mut height = record.height;
        let mut hardness = record.hardness;
        let mut mud = record.mud;
        for i in 0..expected {
            let low = base[i] - config.max_deformation;
            let high = base[i] + config.max_deformation;
            height[i] = height[i].clamp(low, high);
            hardness[i] = hardness[i].clamp(config.min_hardness, config.max_hardness);
            mud[i] = mud[i].clamp(0.0, 1.0);
        }

        // The coordinate may have streamed in again since the save was
        // taken; the saved arrays replace whatever the resident chunk holds.
        match store.get_mut(&coord) {
            Some(chunk) => {
                chunk.height = height;
                chunk.hardness = hardness;
                chunk.mud = mud;
                chunk.last_touched = now;
            }
            None => {
                let mut chunk = Chunk::new(coord, config, base, hardness, mud, now);
                chunk.height = height;
                store.allocate_with(coord, move || chunk)?;
            }
        }
        loaded += 1;
    }

    Ok(loaded)
}
