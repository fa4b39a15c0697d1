//! Serverbound movement packets. They are parsed and then dropped: the server keeps no
//! authoritative position.

use super::packet::*;
use super::revision::{PacketKind, ProtocolRevision, Serverbound};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionPacket {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub on_ground: bool,
}

impl Packet for PlayerPositionPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::PlayerPosition);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(Self {
            x: buffer.read_f64()?,
            y: buffer.read_f64()?,
            z: buffer.read_f64()?,
            on_ground: buffer.read_bool()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_f64(self.x)?;
        buffer.write_f64(self.y)?;
        buffer.write_f64(self.z)?;
        buffer.write_bool(self.on_ground);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionRotationPacket {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Packet for PlayerPositionRotationPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::PlayerPositionAndLook);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(Self {
            x: buffer.read_f64()?,
            y: buffer.read_f64()?,
            z: buffer.read_f64()?,
            yaw: buffer.read_f32()?,
            pitch: buffer.read_f32()?,
            on_ground: buffer.read_bool()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_f64(self.x)?;
        buffer.write_f64(self.y)?;
        buffer.write_f64(self.z)?;
        buffer.write_f32(self.yaw)?;
        buffer.write_f32(self.pitch)?;
        buffer.write_bool(self.on_ground);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_reads_big_endian_doubles() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1.5f64.to_be_bytes());
        payload.extend_from_slice(&65.0f64.to_be_bytes());
        payload.extend_from_slice(&(-3.25f64).to_be_bytes());
        payload.push(1);

        let raw = RawPacket::new(0x0E, payload);
        let packet: PlayerPositionPacket = raw.decode(ProtocolRevision::V1_12_2).unwrap();
        assert_eq!(
            packet,
            PlayerPositionPacket {
                x: 1.5,
                y: 65.0,
                z: -3.25,
                on_ground: true
            }
        );
    }

    #[test]
    fn test_position_rotation_reads_yaw_and_pitch() {
        let mut payload = Vec::new();
        for value in [0.0f64, 70.0, 0.0] {
            payload.extend_from_slice(&value.to_be_bytes());
        }
        payload.extend_from_slice(&90.0f32.to_be_bytes());
        payload.extend_from_slice(&(-45.0f32).to_be_bytes());
        payload.push(0);

        let raw = RawPacket::new(0x0F, payload);
        let packet: PlayerPositionRotationPacket = raw.decode(ProtocolRevision::V1_12_2).unwrap();
        assert_eq!(packet.y, 70.0);
        assert_eq!(packet.yaw, 90.0);
        assert_eq!(packet.pitch, -45.0);
        assert!(!packet.on_ground);
    }
}
