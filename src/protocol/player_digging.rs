use super::packet::*;
use super::revision::{PacketKind, ProtocolRevision, Serverbound};
use crate::error::Result;
use crate::world::BlockPosition;

/// Player Digging, reduced to the targeted block as three big-endian ints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDiggingPacket {
    pub position: BlockPosition,
}

impl Packet for PlayerDiggingPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::PlayerDigging);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(Self {
            position: BlockPosition {
                x: buffer.read_i32()?,
                y: buffer.read_i32()?,
                z: buffer.read_i32()?,
            },
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_i32(self.position.x)?;
        buffer.write_i32(self.position.y)?;
        buffer.write_i32(self.position.z)?;
        Ok(())
    }
}
