use super::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_WIDTH, DIRT, GRASS, STONE};

/// Produces the terrain for a chunk column. Implementations must be pure: the same
/// coordinates always give the same chunk, and nothing is cached or shared.
pub trait ChunkGenerator: Send + Sync {
    fn generate(&self, chunk_x: i32, chunk_z: i32) -> Chunk;
}

/// Rolling hills around y=64 from a sine/cosine heightmap. Grass on top, three blocks of
/// dirt under it, stone below.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightmapGenerator;

impl HeightmapGenerator {
    const BASE_HEIGHT: i32 = 64;
    const AMPLITUDE: f64 = 8.0;
    const FREQUENCY: f64 = 0.05;

    /// Surface height (exclusive) of the world column at (`world_x`, `world_z`).
    pub fn height(world_x: i32, world_z: i32) -> usize {
        let noise = (world_x as f64 * Self::FREQUENCY).sin()
            + (world_z as f64 * Self::FREQUENCY).cos();
        let height = Self::BASE_HEIGHT + (Self::AMPLITUDE * noise) as i32;
        height.clamp(0, CHUNK_HEIGHT as i32) as usize
    }
}

impl ChunkGenerator for HeightmapGenerator {
    fn generate(&self, chunk_x: i32, chunk_z: i32) -> Chunk {
        let mut chunk = Chunk::new();
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let world_x = chunk_x * CHUNK_WIDTH as i32 + x as i32;
                let world_z = chunk_z * CHUNK_WIDTH as i32 + z as i32;
                let height = Self::height(world_x, world_z);
                for y in 0..height {
                    let block = if y == height - 1 {
                        GRASS
                    } else if y + 5 > height {
                        DIRT
                    } else {
                        STONE
                    };
                    chunk.set_block(x, y, z, block);
                }
            }
        }
        chunk
    }
}
