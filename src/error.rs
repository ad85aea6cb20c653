use thiserror::Error;

use crate::terrain::coords::ChunkCoords;

/// Failures surfaced by the terrain core.
///
/// Policy discards (stale or duplicate sync events, malformed contact input)
/// are deliberately *not* errors; they are counted in
/// [`crate::stats::TerrainStats`] and logged at debug level so the simulation
/// keeps running under bad input.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// The chunk store is at capacity. The streamer retries the coordinate
    /// on the next tick.
    #[error("chunk store at capacity ({capacity} chunks) while loading {coord:?}")]
    StoreFull { coord: ChunkCoords, capacity: usize },

    /// A persisted chunk record does not match the configured resolution.
    #[error("persisted record for {coord:?} has {len} cells, expected {expected}")]
    CorruptRecord {
        coord: ChunkCoords,
        len: usize,
        expected: usize,
    },

    /// The persisted byte stream could not be decoded.
    #[error("failed to decode persisted terrain: {0}")]
    Persist(#[from] bincode::Error),
}
