//! The simulation facade: one fixed-order pipeline per tick.

use nalgebra::Point3;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::stats::TerrainStats;
use crate::sync::admission::Admission;
use crate::sync::coordinator::SyncCoordinator;
use crate::sync::event::DeformationEvent;
use crate::terrain::chunk::ChunkStore;
use crate::terrain::coords::ChunkCoords;
use crate::terrain::deform::{self, ApplyOutcome, ContactSample, MudContact};
use crate::terrain::persist;
use crate::terrain::recovery;
use crate::terrain::streamer::GridStreamer;

/// Owns the whole terrain core and drives its phases in order:
/// stream, deform, recover, and — between ticks, on its own cadence — sync.
///
/// All time and input comes in as explicit parameters; the sim holds no
/// ambient clocks or global state. References into the store returned by
/// sampling are copies of cell data, so callers can't retain stale borrows
/// across a streaming pass.
pub struct TerrainSim {
    config: TerrainConfig,
    store: ChunkStore,
    streamer: GridStreamer,
    coordinator: SyncCoordinator,
    stats: TerrainStats,
    now: f64,
    /// Identifier this peer stamps on outgoing events.
    source: u32,
}

impl TerrainSim {
    pub fn new(config: TerrainConfig, source: u32) -> Self {
        let store = ChunkStore::new(config.max_resident_chunks);
        let streamer = GridStreamer::new(&config);
        let coordinator = SyncCoordinator::new(config.sync.clone());
        Self {
            config,
            store,
            streamer,
            coordinator,
            stats: TerrainStats::default(),
            now: 0.0,
            source,
        }
    }

    /// Advance one simulation tick.
    ///
    /// Residency is updated first so the contacts that follow always find
    /// their chunks loaded; recovery runs last so a contact's effect is
    /// visible for at least one tick before any relaxation.
    pub fn tick(&mut self, observer: Point3<f32>, contacts: &[ContactSample], dt: f32) {
        self.now += dt as f64;

        self.streamer
            .update(&mut self.store, &self.config, &mut self.stats, observer, self.now);

        for sample in contacts {
            let event = sample.into_event(&self.config, self.now, self.source);
            let outcome =
                deform::apply(&mut self.store, &self.config, &mut self.stats, &event, self.now);
            if outcome == ApplyOutcome::Applied {
                self.coordinator.record(event, &mut self.stats);
            }
        }

        recovery::relax(&mut self.store, &self.config, dt);
    }

    /// Apply one externally built event locally (explosions, scripted
    /// terrain edits). Authoritative events are queued for sync like
    /// contacts are.
    pub fn apply_local(&mut self, event: DeformationEvent) -> ApplyOutcome {
        let outcome =
            deform::apply(&mut self.store, &self.config, &mut self.stats, &event, self.now);
        if outcome == ApplyOutcome::Applied && event.authoritative {
            self.coordinator.record(event, &mut self.stats);
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Sync surface (call between ticks)
    // ------------------------------------------------------------------

    /// Whether the sync cadence has elapsed since the last harvest.
    pub fn sync_due(&self) -> bool {
        self.coordinator.due(self.now)
    }

    /// Drain pending events for the transport to send.
    pub fn harvest(&mut self) -> Vec<DeformationEvent> {
        self.coordinator.harvest(self.now, &mut self.stats)
    }

    /// Reconcile one event received from a peer.
    pub fn receive(&mut self, event: DeformationEvent) -> Admission {
        self.coordinator
            .receive(&mut self.store, &self.config, &mut self.stats, event, self.now)
    }

    /// Transport confirmation for a previously harvested event.
    pub fn acknowledge(&mut self, event: &DeformationEvent) -> bool {
        self.coordinator.acknowledge(event, &mut self.stats)
    }

    // ------------------------------------------------------------------
    // Queries (for physics, rendering, and tests)
    // ------------------------------------------------------------------

    pub fn sample_height(&self, position: &Point3<f32>) -> f32 {
        deform::sample_height(&self.store, &self.config, self.streamer.generator(), position)
    }

    pub fn sample_hardness(&self, position: &Point3<f32>) -> f32 {
        deform::sample_hardness(&self.store, &self.config, self.streamer.generator(), position)
    }

    pub fn sample_mud(&self, position: &Point3<f32>) -> f32 {
        deform::sample_mud(&self.store, &self.config, self.streamer.generator(), position)
    }

    pub fn query_contact(&self, position: &Point3<f32>) -> MudContact {
        deform::query_contact(&self.store, &self.config, self.streamer.generator(), position)
    }

    /// Coordinates of every resident chunk, for mesh updates.
    pub fn active_chunks(&self) -> Vec<ChunkCoords> {
        self.store.coords().copied().collect()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn save(&self) -> Result<Vec<u8>, TerrainError> {
        persist::save(&self.store)
    }

    pub fn load(&mut self, bytes: &[u8]) -> Result<usize, TerrainError> {
        persist::load(
            &mut self.store,
            self.streamer.generator(),
            &self.config,
            bytes,
            self.now,
        )
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn stats(&self) -> &TerrainStats {
        &self.stats
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }
}
