//! Convenience re-exports for hosts embedding the terrain core.

pub use crate::config::{SyncPolicy, TerrainConfig};
pub use crate::error::TerrainError;
pub use crate::sim::TerrainSim;
pub use crate::stats::TerrainStats;
pub use crate::sync::{Admission, DeformationEvent, DeformationKind, SyncCoordinator};
pub use crate::terrain::deform::{ContactSample, MudContact};
pub use crate::terrain::{Chunk, ChunkCoords, ChunkStore, GridStreamer};
