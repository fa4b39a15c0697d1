use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision, Serverbound};
use crate::config::ServerConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Server list status document, built fresh for every status request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version: VersionInfo,
    pub players: PlayersInfo,
    pub description: Chat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersInfo {
    pub max: i32,
    pub online: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub text: String,
}

impl ServerStatus {
    /// Sessions share no state, so the online count is always reported as zero.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            version: VersionInfo {
                name: config.revision.version_name().to_owned(),
                protocol: config.revision.protocol_number(),
            },
            players: PlayersInfo {
                max: config.max_players as i32,
                online: 0,
            },
            description: Chat {
                text: config.motd.clone(),
            },
        }
    }
}

pub struct StatusRequestPacket;

impl Packet for StatusRequestPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::StatusRequest);

    fn read_from_buffer(_: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(StatusRequestPacket)
    }

    fn write_to_buffer(&self, _: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        Ok(())
    }
}

/// Status response: the JSON document as a single length-prefixed string.
pub struct StatusResponsePacket {
    pub response: String,
}

impl StatusResponsePacket {
    pub fn new(status: &ServerStatus) -> Result<Self> {
        Ok(Self {
            response: serde_json::to_string(status)?,
        })
    }

    pub fn status(&self) -> serde_json::Result<ServerStatus> {
        serde_json::from_str(&self.response)
    }
}

impl Packet for StatusResponsePacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::StatusResponse);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        Ok(StatusResponsePacket {
            response: buffer.read_string()?,
        })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_string(&self.response);
        Ok(())
    }
}

/// Server list ping. The payload is opaque and echoed back in the pong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingPacket {
    pub payload: [u8; 8],
}

impl Packet for PingPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::Ping);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        let mut payload = [0u8; 8];
        payload.copy_from_slice(&buffer.read_bytes_raw(8)?);
        Ok(PingPacket { payload })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_bytes_raw(&self.payload);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PongPacket {
    pub payload: [u8; 8],
}

impl From<PingPacket> for PongPacket {
    fn from(ping: PingPacket) -> Self {
        Self {
            payload: ping.payload,
        }
    }
}

impl Packet for PongPacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::Pong);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        let mut payload = [0u8; 8];
        payload.copy_from_slice(&buffer.read_bytes_raw(8)?);
        Ok(PongPacket { payload })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_bytes_raw(&self.payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_document_fields() {
        let status = ServerStatus::from_config(&ServerConfig::default());
        let packet = StatusResponsePacket::new(&status).unwrap();

        let json: serde_json::Value = serde_json::from_str(&packet.response).unwrap();
        assert_eq!(json["version"]["name"], "1.12.2");
        assert_eq!(json["version"]["protocol"], 340);
        assert_eq!(json["players"]["max"], 20);
        assert_eq!(json["players"]["online"], 0);
        assert!(json["description"]["text"]
            .as_str()
            .unwrap()
            .starts_with('\u{a7}'));
    }

    #[test]
    fn test_status_response_is_length_prefixed_string() {
        let packet = StatusResponsePacket {
            response: "{}".to_owned(),
        };
        let raw = RawPacket::encode(&packet, ProtocolRevision::V1_12_2).unwrap();
        assert_eq!(raw.id, 0x00);
        assert_eq!(&raw.payload[..], &[2, b'{', b'}']);
    }

    #[test]
    fn test_pong_echoes_ping() {
        let ping = PingPacket {
            payload: [1, 2, 3, 4, 5, 6, 7, 8],
        };
        let raw = RawPacket::encode(&PongPacket::from(ping), ProtocolRevision::V1_14_4).unwrap();
        assert_eq!(raw.id, 0x01);
        assert_eq!(&raw.payload[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
