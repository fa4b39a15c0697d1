use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision};
use crate::error::Result;

/// Block change acknowledgement for a dug block.
///
/// Only the X and Z coordinates are sent. There is no Y and no new block id, so a vanilla
/// client cannot apply it as a real block change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChangePacket {
    pub x: i32,
    pub z: i32,
}

impl Packet for BlockChangePacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::BlockChange);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(Self {
            x: buffer.read_i32()?,
            z: buffer.read_i32()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_i32(self.x)?;
        buffer.write_i32(self.z)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_change_layout() {
        let raw = RawPacket::encode(&BlockChangePacket { x: 3, z: -1 }, ProtocolRevision::V1_12_2).unwrap();
        assert_eq!(raw.id, 0x0B);
        assert_eq!(&raw.payload[..], &[0, 0, 0, 3, 0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
