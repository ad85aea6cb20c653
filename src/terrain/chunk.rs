//! Chunk arrays and the coordinate-keyed store that owns them.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::terrain::coords::ChunkCoords;

/// One square region of terrain with dense per-cell arrays.
///
/// A chunk is never observable half-built: it is constructed fully generated
/// and handed to the store in one step, and its arrays are freed when the
/// store releases it. `base` keeps the generated baseline elevation so
/// clamping and recovery don't have to re-evaluate the noise field.
pub struct Chunk {
    pub coord: ChunkCoords,
    pub world_origin: Point3<f32>,
    pub loaded: bool,
    pub last_touched: f64,
    resolution: usize,
    pub(crate) base: Vec<f32>,
    pub(crate) height: Vec<f32>,
    pub(crate) hardness: Vec<f32>,
    pub(crate) mud: Vec<f32>,
}

impl Chunk {
    /// Build a fully initialized chunk. Current height starts at the baseline.
    pub fn new(
        coord: ChunkCoords,
        config: &TerrainConfig,
        base: Vec<f32>,
        hardness: Vec<f32>,
        mud: Vec<f32>,
        now: f64,
    ) -> Self {
        debug_assert_eq!(base.len(), config.cells());
        debug_assert_eq!(hardness.len(), config.cells());
        debug_assert_eq!(mud.len(), config.cells());
        let height = base.clone();
        Self {
            coord,
            world_origin: coord.world_origin(config.chunk_size),
            loaded: true,
            last_touched: now,
            resolution: config.resolution,
            base,
            height,
            hardness,
            mud,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Row-major index of cell `(x, z)`, clamped to the grid in release
    /// builds. An out-of-range argument is a caller bug.
    pub fn cell_index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.resolution && z < self.resolution);
        let x = x.min(self.resolution - 1);
        let z = z.min(self.resolution - 1);
        z * self.resolution + x
    }

    pub fn base(&self) -> &[f32] {
        &self.base
    }

    pub fn height(&self) -> &[f32] {
        &self.height
    }

    pub fn hardness(&self) -> &[f32] {
        &self.hardness
    }

    pub fn mud(&self) -> &[f32] {
        &self.mud
    }
}

/// Sole owner of chunk memory, keyed by coordinate.
///
/// The store enforces the residency cap but makes no eviction decisions of
/// its own; only the grid streamer loads and releases chunks. References
/// handed out are short-lived borrows, invalidated by the next streaming
/// pass.
pub struct ChunkStore {
    chunks: HashMap<ChunkCoords, Chunk>,
    capacity: usize,
}

impl ChunkStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            chunks: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert the chunk built by `build`, or return the existing one.
    ///
    /// Idempotent on already-resident coordinates (the builder is not run).
    /// Fails with [`TerrainError::StoreFull`] at capacity so the caller can
    /// retry later instead of growing without bound.
    pub fn allocate_with<F>(
        &mut self,
        coord: ChunkCoords,
        build: F,
    ) -> Result<&mut Chunk, TerrainError>
    where
        F: FnOnce() -> Chunk,
    {
        if !self.chunks.contains_key(&coord) && self.chunks.len() >= self.capacity {
            return Err(TerrainError::StoreFull {
                coord,
                capacity: self.capacity,
            });
        }
        Ok(self.chunks.entry(coord).or_insert_with(build))
    }

    /// Free a chunk's arrays. No-op on absent coordinates.
    pub fn release(&mut self, coord: &ChunkCoords) -> bool {
        match self.chunks.remove(coord) {
            Some(mut chunk) => {
                chunk.loaded = false;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, coord: &ChunkCoords) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn get_mut(&mut self, coord: &ChunkCoords) -> Option<&mut Chunk> {
        self.chunks.get_mut(coord)
    }

    pub fn contains(&self, coord: &ChunkCoords) -> bool {
        self.chunks.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn coords(&self) -> impl Iterator<Item = &ChunkCoords> {
        self.chunks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoords, &Chunk)> {
        self.chunks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ChunkCoords, &mut Chunk)> {
        self.chunks.iter_mut()
    }
}
