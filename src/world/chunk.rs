use super::BlockPosition;

pub type BlockId = u8;

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const GRASS: BlockId = 2;
pub const DIRT: BlockId = 3;

/// Width of a chunk along X and Z
pub const CHUNK_WIDTH: usize = 16;
pub const CHUNK_HEIGHT: usize = 256;
/// Height of one section; a chunk is a stack of `SECTION_COUNT` of them
pub const SECTION_HEIGHT: usize = 16;
pub const SECTION_COUNT: usize = CHUNK_HEIGHT / SECTION_HEIGHT;
pub const SECTION_VOLUME: usize = SECTION_HEIGHT * CHUNK_WIDTH * CHUNK_WIDTH;

/// A 16x16x256 column of block ids, indexed `[y][x][z]`. Everything starts as air.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    blocks: Vec<[[BlockId; CHUNK_WIDTH]; CHUNK_WIDTH]>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            blocks: vec![[[AIR; CHUNK_WIDTH]; CHUNK_WIDTH]; CHUNK_HEIGHT],
        }
    }

    /// Block at local coordinates. Panics when out of range, like slice indexing.
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[y][x][z]
    }

    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        self.blocks[y][x][z] = block;
    }

    /// Local coordinates of `position` if it lies inside this chunk.
    pub fn local(position: BlockPosition) -> Option<(usize, usize, usize)> {
        let x = usize::try_from(position.x).ok().filter(|x| *x < CHUNK_WIDTH)?;
        let y = usize::try_from(position.y).ok().filter(|y| *y < CHUNK_HEIGHT)?;
        let z = usize::try_from(position.z).ok().filter(|z| *z < CHUNK_WIDTH)?;
        Some((x, y, z))
    }

    /// True when every block of the 16-block-tall slice `section` is air.
    pub fn section_is_empty(&self, section: usize) -> bool {
        self.blocks[section * SECTION_HEIGHT..(section + 1) * SECTION_HEIGHT]
            .iter()
            .flatten()
            .flatten()
            .all(|block| *block == AIR)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let non_empty: Vec<usize> = (0..SECTION_COUNT)
            .filter(|section| !self.section_is_empty(*section))
            .collect();
        f.debug_struct("Chunk")
            .field("non_empty_sections", &non_empty)
            .finish()
    }
}
