//! Tuning knobs for the terrain core.
//!
//! Everything that used to be an engine-side constant (chunk size, streaming
//! radii, recovery rates) lives here so the whole pipeline can be driven with
//! explicit parameters instead of ambient globals.

/// Configuration for streaming, deformation, and recovery.
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// World-space edge length of one chunk.
    pub chunk_size: f32,
    /// Cells per chunk edge; arrays are `resolution * resolution` long.
    pub resolution: usize,
    /// Chebyshev radius (in chunks) around the observer that must be loaded.
    pub load_distance: i32,
    /// Chebyshev radius beyond which loaded chunks are released. Must be
    /// greater than `load_distance` so the boundary has hysteresis.
    pub unload_distance: i32,
    /// Hard cap on simultaneously resident chunks.
    pub max_resident_chunks: usize,
    /// Seed for the deterministic baseline generator. Peers must agree on it.
    pub seed: u32,

    /// How far a cell may deviate from its baseline elevation, either way.
    pub max_deformation: f32,
    /// Hardness floor; fully churned mud never gets softer than this.
    pub min_hardness: f32,
    /// Hardness ceiling.
    pub max_hardness: f32,
    /// Hardness that recovery relaxes toward.
    pub target_hardness: f32,
    /// How much each unit of height change softens the cell.
    pub hardness_softening: f32,
    /// How strongly hardness resists incoming deformation (0 = none, 1 = a
    /// fully hard cell barely yields).
    pub hardness_resistance: f32,
    /// Mud accumulated per unit of height change.
    pub mud_gain: f32,
    /// Converts a contact's normal load into an indentation depth.
    pub force_to_depth: f32,
    /// Deepest sink depth reported by contact queries.
    pub max_sink_depth: f32,
    /// Fraction of the remaining deviation recovered per second.
    /// `recovery_rate * dt` is clamped to 1 so the relaxation never overshoots.
    pub recovery_rate: f32,

    pub sync: SyncPolicy,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16.0,
            resolution: 64,
            load_distance: 3,
            unload_distance: 5,
            max_resident_chunks: 256,
            seed: 42,
            max_deformation: 2.0,
            min_hardness: 0.05,
            max_hardness: 1.0,
            target_hardness: 0.8,
            hardness_softening: 0.5,
            hardness_resistance: 0.6,
            mud_gain: 0.25,
            force_to_depth: 0.001,
            max_sink_depth: 2.0,
            recovery_rate: 0.625,
            sync: SyncPolicy::default(),
        }
    }
}

impl TerrainConfig {
    /// World-space spacing between adjacent cells.
    pub fn cell_step(&self) -> f32 {
        self.chunk_size / self.resolution as f32
    }

    /// Number of cells per chunk array.
    pub fn cells(&self) -> usize {
        self.resolution * self.resolution
    }
}

/// Admission and cadence rules for peer synchronization.
#[derive(Clone, Debug)]
pub struct SyncPolicy {
    /// Seconds of simulation time between harvest passes.
    pub interval: f64,
    /// Events older than this are discarded as stale instead of applied.
    pub max_delay: f64,
    /// Minimum seconds between applications of equivalent events.
    pub min_reapply: f64,
    /// Two events closer than this are the same deformation.
    pub position_tolerance: f32,
    pub radius_tolerance: f32,
    pub time_tolerance: f64,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            interval: 0.1,
            max_delay: 1.0,
            min_reapply: 0.1,
            position_tolerance: 0.1,
            radius_tolerance: 0.1,
            time_tolerance: 0.1,
        }
    }
}
