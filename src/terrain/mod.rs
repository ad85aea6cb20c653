pub mod chunk;
pub mod coords;
pub mod deform;
pub mod generator;
pub mod persist;
pub mod recovery;
pub mod streamer;

pub use chunk::{Chunk, ChunkStore};
pub use coords::ChunkCoords;
pub use streamer::GridStreamer;

#[cfg(test)]
mod tests;
