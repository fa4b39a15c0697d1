use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision};
use crate::error::Result;

/// Player Position And Look (clientbound)
/// Places the player. This packet also closes the "Downloading Terrain" screen when joining.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndLook {
    /// Absolute or relative position, depending on Flags
    pub x: f64,
    /// Absolute or relative position, depending on Flags
    pub y: f64,
    /// Absolute or relative position, depending on Flags
    pub z: f64,
    /// Absolute or relative rotation on the X axis, in degrees
    pub yaw: f32,
    /// Absolute or relative rotation on the Y axis, in degrees
    pub pitch: f32,
    /// Bit field for relative/absolute positions and rotations
    pub flags: u8,
    /// Teleport ID for client confirmation
    pub teleport_id: i32,
}

impl Packet for PlayerPositionAndLook {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::PlayerPositionAndLook);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(Self {
            x: buffer.read_f64()?,
            y: buffer.read_f64()?,
            z: buffer.read_f64()?,
            yaw: buffer.read_f32()?,
            pitch: buffer.read_f32()?,
            flags: buffer.read_u8()?,
            teleport_id: buffer.read_varint()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_f64(self.x)?;
        buffer.write_f64(self.y)?;
        buffer.write_f64(self.z)?;

        buffer.write_f32(self.yaw)?;
        buffer.write_f32(self.pitch)?;

        buffer.write_u8(self.flags);
        buffer.write_varint(self.teleport_id);

        Ok(())
    }
}

impl PlayerPositionAndLook {
    pub fn new(x: f64, y: f64, z: f64, yaw: f32, pitch: f32, flags: u8, teleport_id: i32) -> Self {
        Self {
            x,
            y,
            z,
            yaw,
            pitch,
            flags,
            teleport_id,
        }
    }

    /// All fields absolute
    pub const ABSOLUTE: u8 = 0x00;
}
