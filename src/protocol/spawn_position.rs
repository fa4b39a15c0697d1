use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision};
use crate::error::Result;
use crate::world::BlockPosition;

/// Spawn Position: the compass target, as three big-endian ints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPositionPacket {
    pub position: BlockPosition,
}

impl Packet for SpawnPositionPacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::SpawnPosition);

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
