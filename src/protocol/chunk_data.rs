use super::packet::*;
use super::revision::{ChunkLayout, Clientbound, PacketKind, ProtocolRevision};
use crate::error::Result;
use crate::world::chunk::{
    Chunk, AIR, CHUNK_WIDTH, SECTION_COUNT, SECTION_HEIGHT, SECTION_VOLUME,
};
use crate::world::BlockId;

/// Nibble-packed light for one section, both nibbles at full brightness.
const FULL_LIGHT: [u8; SECTION_VOLUME / 2] = [0xFF; SECTION_VOLUME / 2];
/// One biome byte per column; everything is plains.
const PLAINS: u8 = 1;
const BIOME_BYTES: usize = CHUNK_WIDTH * CHUNK_WIDTH;

/// Block ids of one 16x16x16 section in wire order: Y outermost, then Z, then X,
/// so the byte for (x, y, z) sits at `y * 256 + z * 16 + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkSection {
    pub blocks: Vec<BlockId>,
}

impl ChunkSection {
    pub fn empty() -> Self {
        Self {
            blocks: vec![AIR; SECTION_VOLUME],
        }
    }

    fn from_chunk(chunk: &Chunk, section: usize) -> Self {
        let mut blocks = Vec::with_capacity(SECTION_VOLUME);
        for y in section * SECTION_HEIGHT..(section + 1) * SECTION_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    blocks.push(chunk.block(x, y, z));
                }
            }
        }
        Self { blocks }
    }

    /// Number of non-air blocks
    pub fn block_count(&self) -> u16 {
        self.blocks.iter().filter(|block| **block != AIR).count() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| *block == AIR)
    }

    /// Multi-section entry: block count, raw ids, block light, sky light.
    fn write_lit(&self, buffer: &mut MinecraftPacketBuffer) {
        buffer.write_u16(self.block_count());
        buffer.write_bytes_raw(&self.blocks);
        buffer.write_bytes_raw(&FULL_LIGHT);
        buffer.write_bytes_raw(&FULL_LIGHT);
    }

    fn read_lit(buffer: &mut MinecraftPacketBuffer) -> Result<Self> {
        let _block_count = buffer.read_u16()?;
        let blocks = buffer.read_bytes_raw(SECTION_VOLUME)?;
        let _block_light = buffer.read_bytes_raw(FULL_LIGHT.len())?;
        let _sky_light = buffer.read_bytes_raw(FULL_LIGHT.len())?;
        Ok(Self { blocks })
    }
}

impl std::fmt::Debug for ChunkSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkSection")
            .field("block_count", &self.block_count())
            .finish()
    }
}

/// Chunk Data. Holds all 16 sections of the column; the revision decides how many of them
/// go on the wire and in what shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDataPacket {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub sections: Vec<ChunkSection>,
}

impl ChunkDataPacket {
    pub fn new(chunk: &Chunk, chunk_x: i32, chunk_z: i32) -> Self {
        Self {
            chunk_x,
            chunk_z,
            sections: (0..SECTION_COUNT)
                .map(|section| ChunkSection::from_chunk(chunk, section))
                .collect(),
        }
    }

    /// Bit `n` is set when section `n` holds at least one non-air block.
    pub fn primary_bit_mask(&self) -> u16 {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| !section.is_empty())
            .fold(0, |mask, (index, _)| mask | (1 << index))
    }

    fn write_multi_section(&self, buffer: &mut MinecraftPacketBuffer) -> Result<()> {
        buffer.write_i32(self.chunk_x)?;
        buffer.write_i32(self.chunk_z)?;
        // Full chunk
        buffer.write_bool(true);
        buffer.write_u16(self.primary_bit_mask());

        for section in self.sections.iter().filter(|section| !section.is_empty()) {
            let mut section_buffer = MinecraftPacketBuffer::new();
            section.write_lit(&mut section_buffer);
            buffer.write_byte_string(&section_buffer.buffer);
        }

        buffer.write_bytes_raw(&[PLAINS; BIOME_BYTES]);
        // No block entities
        buffer.write_varint(0);
        Ok(())
    }

    fn write_single_section(&self, buffer: &mut MinecraftPacketBuffer) {
        buffer.write_varint(self.chunk_x);
        buffer.write_varint(self.chunk_z);
        buffer.write_bool(true);
        // Placeholder mask: only the bottom section follows
        buffer.write_varint(1);
        match self.sections.first() {
            Some(section) => buffer.write_bytes_raw(&section.blocks),
            None => buffer.write_bytes_raw(&ChunkSection::empty().blocks),
        }
    }

    fn read_multi_section(buffer: &mut MinecraftPacketBuffer) -> Result<Self> {
        let chunk_x = buffer.read_i32()?;
        let chunk_z = buffer.read_i32()?;
        let _full_chunk = buffer.read_bool()?;
        let mask = buffer.read_u16()?;

        let mut sections = Vec::with_capacity(SECTION_COUNT);
        for index in 0..SECTION_COUNT {
            if mask & (1 << index) == 0 {
                sections.push(ChunkSection::empty());
                continue;
            }
            let mut section_buffer = MinecraftPacketBuffer::from_bytes(buffer.read_byte_string()?);
            sections.push(ChunkSection::read_lit(&mut section_buffer)?);
        }

        let _biomes = buffer.read_bytes_raw(BIOME_BYTES)?;
        let _block_entities = buffer.read_varint()?;

        Ok(Self {
            chunk_x,
            chunk_z,
            sections,
        })
    }

    fn read_single_section(buffer: &mut MinecraftPacketBuffer) -> Result<Self> {
        let chunk_x = buffer.read_varint()?;
        let chunk_z = buffer.read_varint()?;
        let _full_chunk = buffer.read_bool()?;
        let _mask = buffer.read_varint()?;

        let mut sections = vec![ChunkSection {
            blocks: buffer.read_bytes_raw(SECTION_VOLUME)?,
        }];
        sections.resize(SECTION_COUNT, ChunkSection::empty());

        Ok(Self {
            chunk_x,
            chunk_z,
            sections,
        })
    }
}

impl Packet for ChunkDataPacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::ChunkData);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, revision: ProtocolRevision) -> Result<Self> {
        match revision.chunk_layout() {
            ChunkLayout::MultiSection => Self::read_multi_section(buffer),
            ChunkLayout::SingleSection => Self::read_single_section(buffer),
        }
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, revision: ProtocolRevision) -> Result<()> {
        match revision.chunk_layout() {
            ChunkLayout::MultiSection => self.write_multi_section(buffer)?,
            ChunkLayout::SingleSection => self.write_single_section(buffer),
        }
        Ok(())
    }
}
