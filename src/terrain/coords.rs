use nalgebra::Point3;

/// Chunk indices on the XZ plane of an unbounded grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoords {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoords {
    /// Chunk owning the given world-space point.
    pub fn from_world(pos: &Point3<f32>, chunk_size: f32) -> Self {
        Self::from_xz(pos.x, pos.z, chunk_size)
    }

    pub fn from_xz(x: f32, z: f32, chunk_size: f32) -> Self {
        Self {
            x: (x / chunk_size).floor() as i32,
            z: (z / chunk_size).floor() as i32,
        }
    }

    /// World-space position of this chunk's (0, 0) cell.
    pub fn world_origin(&self, chunk_size: f32) -> Point3<f32> {
        Point3::new(
            self.x as f32 * chunk_size,
            0.0,
            self.z as f32 * chunk_size,
        )
    }

    /// Chebyshev (chessboard) distance in chunks. The streamer's load and
    /// unload ranges are squares, not discs.
    pub fn chebyshev(&self, other: &ChunkCoords) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}
