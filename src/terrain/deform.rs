//! Deformation application and terrain sampling.
//!
//! Phases are free functions over the store: `apply` mutates cell arrays for
//! every chunk an event overlaps, and the `sample_*` functions read back
//! height, hardness, and mud with bilinear interpolation. An event spanning
//! a chunk boundary is applied to each overlapped chunk independently (the
//! falloff is recomputed per chunk), which keeps chunks free of shared
//! mutable state and safe to process in parallel.

use log::debug;
use nalgebra::Point3;

use crate::config::TerrainConfig;
use crate::stats::TerrainStats;
use crate::sync::event::{DeformationEvent, DeformationKind};
use crate::terrain::chunk::{Chunk, ChunkStore};
use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::TerrainGenerator;

/// Per-tick input from a wheel or object pressing into the terrain.
#[derive(Clone, Copy, Debug)]
pub struct ContactSample {
    pub position: Point3<f32>,
    pub radius: f32,
    pub normal_load: f32,
}

impl ContactSample {
    /// Convert to a locally authoritative indentation event. The normal load
    /// scales to an indentation depth via `config.force_to_depth`.
    pub fn into_event(
        self,
        config: &TerrainConfig,
        timestamp: f64,
        source: u32,
    ) -> DeformationEvent {
        DeformationEvent {
            position: self.position,
            radius: self.radius,
            magnitude: self.normal_load * config.force_to_depth,
            kind: DeformationKind::Indentation,
            timestamp,
            source,
            authoritative: true,
        }
    }
}

/// What the terrain reports back to wheel physics at a contact point.
#[derive(Clone, Copy, Debug)]
pub struct MudContact {
    pub sink_depth: f32,
    pub traction: f32,
    pub viscosity: f32,
    pub density: f32,
}

/// Result of trying to apply one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// At least one loaded chunk was mutated.
    Applied,
    /// NaN position or non-positive radius/magnitude; counted no-op.
    Malformed,
    /// Loaded chunks overlapped but no cell moved, e.g. every touched cell
    /// was already pinned at the deformation clamp.
    NoEffect,
    /// The event overlapped no loaded chunk; counted and dropped.
    NoChunks,
}

/// Apply one deformation event to every loaded chunk it overlaps.
pub fn apply(
    store: &mut ChunkStore,
    config: &TerrainConfig,
    stats: &mut TerrainStats,
    event: &DeformationEvent,
    now: f64,
) -> ApplyOutcome {
    if event.is_malformed() {
        stats.events_malformed += 1;
        debug!("rejected malformed deformation event: {event:?}");
        return ApplyOutcome::Malformed;
    }

    let r = event.radius;
    let min = ChunkCoords::from_xz(event.position.x - r, event.position.z - r, config.chunk_size);
    let max = ChunkCoords::from_xz(event.position.x + r, event.position.z + r, config.chunk_size);

    let mut touched = false;
    let mut overlapped = false;
    for x in min.x..=max.x {
        for z in min.z..=max.z {
            let coord = ChunkCoords { x, z };
            if let Some(chunk) = store.get_mut(&coord) {
                overlapped = true;
                if apply_to_chunk(chunk, config, event, now) {
                    touched = true;
                }
            }
        }
    }

    if touched {
        stats.events_applied += 1;
        ApplyOutcome::Applied
    } else if overlapped {
        stats.events_no_effect += 1;
        debug!("deformation event moved no cells: {event:?}");
        ApplyOutcome::NoEffect
    } else {
        stats.events_outside += 1;
        debug!("deformation event outside loaded chunks: {event:?}");
        ApplyOutcome::NoChunks
    }
}

/// Apply the event to one chunk in chunk-local coordinates. Returns whether
/// any cell changed.
fn apply_to_chunk(
    chunk: &mut Chunk,
    config: &TerrainConfig,
    event: &DeformationEvent,
    now: f64,
) -> bool {
    let step = config.cell_step();
    let res = chunk.resolution();
    let r = event.radius;

    let local_x = event.position.x - chunk.world_origin.x;
    let local_z = event.position.z - chunk.world_origin.z;

    let lo_x = (((local_x - r) / step).floor() as isize).max(0);
    let hi_x = (((local_x + r) / step).ceil() as isize).min(res as isize - 1);
    let lo_z = (((local_z - r) / step).floor() as isize).max(0);
    let hi_z = (((local_z + r) / step).ceil() as isize).min(res as isize - 1);
    if lo_x > hi_x || lo_z > hi_z {
        return false;
    }

    // Smoothing reads neighbor heights while cells are being overwritten, so
    // it works from a snapshot taken before the pass.
    let snapshot = matches!(event.kind, DeformationKind::Smoothing)
        .then(|| chunk.height.clone());

    let hardness_span = (config.max_hardness - config.min_hardness).max(f32::EPSILON);
    let mut touched = false;

    for iz in lo_z..=hi_z {
        for ix in lo_x..=hi_x {
            let dx = ix as f32 * step - local_x;
            let dz = iz as f32 * step - local_z;
            let dist = (dx * dx + dz * dz).sqrt();
            if dist > r {
                continue;
            }
            let falloff = (1.0 - dist / r).clamp(0.0, 1.0);
            let idx = iz as usize * res + ix as usize;

            // Hard ground yields less to direct indentation/elevation.
            let normalized_hardness =
                ((chunk.hardness[idx] - config.min_hardness) / hardness_span).clamp(0.0, 1.0);
            let give =
                (1.0 - config.hardness_resistance * normalized_hardness).clamp(0.1, 1.0);

            let delta = match event.kind {
                DeformationKind::Indentation => -event.magnitude * falloff * give,
                DeformationKind::Elevation => event.magnitude * falloff * give,
                DeformationKind::Smoothing => match snapshot.as_deref() {
                    Some(snap) => {
                        (neighborhood_mean(snap, res, ix as usize, iz as usize) - snap[idx])
                            * event.magnitude.min(1.0)
                            * falloff
                    }
                    None => 0.0,
                },
                DeformationKind::Erosion => {
                    (chunk.base[idx] - chunk.height[idx])
                        * event.magnitude.min(1.0)
                        * falloff
                        * chunk.mud[idx]
                }
            };

            let low = chunk.base[idx] - config.max_deformation;
            let high = chunk.base[idx] + config.max_deformation;
            let new_height = (chunk.height[idx] + delta).clamp(low, high);
            let moved = (new_height - chunk.height[idx]).abs();
            if moved == 0.0 {
                continue;
            }

            chunk.height[idx] = new_height;
            chunk.hardness[idx] = (chunk.hardness[idx] - moved * config.hardness_softening)
                .clamp(config.min_hardness, config.max_hardness);
            chunk.mud[idx] = (chunk.mud[idx] + moved * config.mud_gain).min(1.0);
            touched = true;
        }
    }

    if touched {
        chunk.last_touched = now;
    }
    touched
}

/// Mean of the 3x3 neighborhood, clamped at chunk edges.
fn neighborhood_mean(heights: &[f32], res: usize, ix: usize, iz: usize) -> f32 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for dz in -1isize..=1 {
        for dx in -1isize..=1 {
            let x = ix as isize + dx;
            let z = iz as isize + dz;
            if x < 0 || z < 0 || x >= res as isize || z >= res as isize {
                continue;
            }
            sum += heights[z as usize * res + x as usize];
            count += 1;
        }
    }
    sum / count as f32
}

/// Bilinear interpolation of a cell array at a world-space point.
fn bilinear(values: &[f32], chunk: &Chunk, config: &TerrainConfig, wx: f32, wz: f32) -> f32 {
    let step = config.cell_step();
    let res = chunk.resolution();
    let max_cell = (res - 1) as f32;

    let fx = ((wx - chunk.world_origin.x) / step).clamp(0.0, max_cell);
    let fz = ((wz - chunk.world_origin.z) / step).clamp(0.0, max_cell);

    let x0 = fx.floor() as usize;
    let z0 = fz.floor() as usize;
    let x1 = (x0 + 1).min(res - 1);
    let z1 = (z0 + 1).min(res - 1);
    let tx = fx - x0 as f32;
    let tz = fz - z0 as f32;

    let v00 = values[z0 * res + x0];
    let v10 = values[z0 * res + x1];
    let v01 = values[z1 * res + x0];
    let v11 = values[z1 * res + x1];

    let top = v00 + (v10 - v00) * tx;
    let bottom = v01 + (v11 - v01) * tx;
    top + (bottom - top) * tz
}

/// Current elevation at a world point. Unstreamed regions report the
/// deterministic baseline instead of failing.
pub fn sample_height(
    store: &ChunkStore,
    config: &TerrainConfig,
    generator: &TerrainGenerator,
    position: &Point3<f32>,
) -> f32 {
    let coord = ChunkCoords::from_world(position, config.chunk_size);
    match store.get(&coord) {
        Some(chunk) => bilinear(&chunk.height, chunk, config, position.x, position.z),
        None => generator.baseline_height(position.x, position.z),
    }
}

/// Current hardness at a world point.
pub fn sample_hardness(
    store: &ChunkStore,
    config: &TerrainConfig,
    generator: &TerrainGenerator,
    position: &Point3<f32>,
) -> f32 {
    let coord = ChunkCoords::from_world(position, config.chunk_size);
    match store.get(&coord) {
        Some(chunk) => bilinear(&chunk.hardness, chunk, config, position.x, position.z),
        None => generator.baseline_hardness(position.x, position.z, config),
    }
}

/// Current mud level at a world point.
pub fn sample_mud(
    store: &ChunkStore,
    config: &TerrainConfig,
    generator: &TerrainGenerator,
    position: &Point3<f32>,
) -> f32 {
    let coord = ChunkCoords::from_world(position, config.chunk_size);
    match store.get(&coord) {
        Some(chunk) => bilinear(&chunk.mud, chunk, config, position.x, position.z),
        None => generator.baseline_mud(position.x, position.z),
    }
}

/// Contact query for wheel physics: how deep the wheel sits in the surface
/// and how much grip is left.
pub fn query_contact(
    store: &ChunkStore,
    config: &TerrainConfig,
    generator: &TerrainGenerator,
    position: &Point3<f32>,
) -> MudContact {
    let terrain_height = sample_height(store, config, generator, position);
    let mud = sample_mud(store, config, generator, position);

    let sink_depth = (terrain_height - position.y).clamp(0.0, config.max_sink_depth);
    let sink_ratio = sink_depth / config.max_sink_depth;

    // Deeper sink and wetter ground both cost grip.
    let traction = (0.8 + (0.2 - 0.8) * sink_ratio) * (1.0 - 0.25 * mud);

    MudContact {
        sink_depth,
        traction,
        viscosity: 0.3 + 0.5 * mud,
        density: 1.2,
    }
}
