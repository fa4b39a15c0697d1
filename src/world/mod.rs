pub mod chunk;
pub mod generator;

pub use chunk::{BlockId, Chunk};
pub use generator::{ChunkGenerator, HeightmapGenerator};

use serde::Deserialize;

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
