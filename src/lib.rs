//! Deformable-terrain streaming and synchronization core.
//!
//! Streams a world-spanning height/hardness/mud grid in fixed-size chunks
//! around a moving observer, applies localized radius-falloff deformation
//! from contact events, relaxes the surface back toward its baseline each
//! tick, and reconciles deformation events across simulation peers under an
//! authority and staleness model.
//!
//! The crate has no opinion about rendering or the network transport: it
//! consumes contact samples and an observer position, and produces sampled
//! terrain values plus batches of [`sync::DeformationEvent`]s for whatever
//! transport the host wires up.

pub mod config;
pub mod error;
pub mod prelude;
pub mod sim;
pub mod stats;
pub mod sync;
pub mod terrain;

pub use config::TerrainConfig;
pub use error::TerrainError;
pub use sim::TerrainSim;
pub use stats::TerrainStats;
