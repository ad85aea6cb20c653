//! Observer-driven chunk residency.
//!
//! Chunks within `load_distance` of the observer's chunk are made resident;
//! chunks beyond `unload_distance` are released. The gap between the two
//! radii is hysteresis: an observer dithering on a boundary never thrashes a
//! chunk in and out. Loading is synchronous within the tick — generation is
//! cheap and deterministic — so no coordinate is ever observable in a
//! half-loaded state.

use log::{debug, warn};
use nalgebra::Point3;

use crate::config::TerrainConfig;
use crate::stats::TerrainStats;
use crate::terrain::chunk::{Chunk, ChunkStore};
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::TerrainGenerator;

pub struct GridStreamer {
    generator: TerrainGenerator,
    /// Observer position at the last candidate recomputation.
    last_observer: Option<Point3<f32>>,
    /// Coordinates that failed to load because the store was full.
    pending: Vec<ChunkCoords>,
}

impl GridStreamer {
    pub fn new(config: &TerrainConfig) -> Self {
        Self {
            generator: TerrainGenerator::new(config.seed),
            last_observer: None,
            pending: Vec::new(),
        }
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Number of loads waiting on store capacity.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// One streaming pass. Must complete before the deform phase of the same
    /// tick, since deformation needs its target chunks resident.
    pub fn update(
        &mut self,
        store: &mut ChunkStore,
        config: &TerrainConfig,
        stats: &mut TerrainStats,
        observer: Point3<f32>,
        now: f64,
    ) {
        let center = ChunkCoords::from_world(&observer, config.chunk_size);

        // Capacity-deferred loads are retried every tick, even when the
        // observer has not moved far enough to recompute the candidate set.
        if !self.pending.is_empty() {
            let retries = std::mem::take(&mut self.pending);
            for coord in retries {
                if center.chebyshev(&coord) > config.load_distance {
                    debug!("dropping deferred load for {coord:?}: observer moved away");
                    continue;
                }
                if store.contains(&coord) {
                    continue;
                }
                self.load_chunk(store, config, stats, coord, now);
            }
        }

        // Full rescans only happen after the observer has moved at least
        // half a chunk; the resident set stays valid in between.
        let moved = match self.last_observer {
            None => true,
            Some(last) => nalgebra::distance(&last, &observer) >= config.chunk_size * 0.5,
        };
        if !moved {
            return;
        }
        self.last_observer = Some(observer);

        for x in (center.x - config.load_distance)..=(center.x + config.load_distance) {
            for z in (center.z - config.load_distance)..=(center.z + config.load_distance) {
                let coord = ChunkCoords { x, z };
                // A coordinate re-deferred by the retry drain above must not
                // be queued a second time in the same pass.
                if !store.contains(&coord) && !self.pending.contains(&coord) {
                    self.load_chunk(store, config, stats, coord, now);
                }
            }
        }

        let stale: Vec<ChunkCoords> = store
            .coords()
            .filter(|coord| center.chebyshev(coord) > config.unload_distance)
            .copied()
            .collect();
        for coord in stale {
            if store.release(&coord) {
                stats.chunks_unloaded += 1;
                debug!("unloaded chunk {coord:?}");
            }
        }
    }

    fn load_chunk(
        &mut self,
        store: &mut ChunkStore,
        config: &TerrainConfig,
        stats: &mut TerrainStats,
        coord: ChunkCoords,
        now: f64,
    ) {
        let generator = &self.generator;
        let result = store.allocate_with(coord, || {
            let (base, hardness, mud) = generator.generate(coord, config);
            Chunk::new(coord, config, base, hardness, mud, now)
        });
        match result {
            Ok(_) => {
                stats.chunks_loaded += 1;
                debug!("loaded chunk {coord:?}");
            }
            Err(err) => {
                // Never dropped: the coordinate goes back on the queue and
                // the saturation counter makes the stall visible.
                warn!("chunk load deferred: {err}");
                self.pending.push(coord);
                stats.load_retries += 1;
            }
        }
    }
}
