use super::packet::*;
use super::revision::{PacketKind, ProtocolRevision, Serverbound};
use crate::error::Result;

/// Handshake packet
#[derive(Debug, Clone, PartialEq)]
pub struct HandshakePacket {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: i32,
}

impl HandshakePacket {
    /// `next_state` value asking for the server list status.
    pub const NEXT_STATUS: i32 = 1;
    /// `next_state` value asking to log in.
    pub const NEXT_LOGIN: i32 = 2;
}

impl Packet for HandshakePacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::Handshake);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(HandshakePacket {
            protocol_version: buffer.read_varint()?,
            server_address: buffer.read_string()?,
            server_port: buffer.read_u16()?,
            next_state: buffer.read_varint()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_varint(self.protocol_version);
        buffer.write_string(&self.server_address);
        buffer.write_u16(self.server_port);
        buffer.write_varint(self.next_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_layout() {
        let handshake = HandshakePacket {
            protocol_version: 340,
            server_address: "localhost".to_owned(),
            server_port: 25565,
            next_state: HandshakePacket::NEXT_LOGIN,
        };
        let raw = RawPacket::encode(&handshake, ProtocolRevision::V1_12_2).unwrap();

        assert_eq!(raw.id, 0x00);
        let mut expected = vec![0xD4, 0x02, 9];
        expected.extend_from_slice(b"localhost");
        expected.extend_from_slice(&[0x63, 0xDD, 0x02]);
        assert_eq!(&raw.payload[..], &expected[..]);

        let decoded: HandshakePacket = raw.decode(ProtocolRevision::V1_12_2).unwrap();
        assert_eq!(decoded, handshake);
    }
}
