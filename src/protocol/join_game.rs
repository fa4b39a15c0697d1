use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision};
use crate::config::ServerConfig;
use crate::error::Result;

/// Join Game. The field set depends on the revision:
/// 1.12.2 sends a difficulty byte, 1.14.4 drops it and adds a view distance.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinGamePacket {
    pub entity_id: i32,
    pub gamemode: u8,
    pub dimension: i32,
    pub difficulty: u8,
    pub max_players: u8,
    pub level_type: String,
    pub view_distance: i32,
    pub reduced_debug_info: bool,
}

impl JoinGamePacket {
    pub fn new(entity_id: i32, config: &ServerConfig) -> Self {
        Self {
            entity_id,
            gamemode: config.gamemode,
            dimension: config.dimension,
            difficulty: config.difficulty,
            max_players: config.max_players,
            level_type: config.level_type.clone(),
            view_distance: config.view_distance,
            reduced_debug_info: config.reduced_debug_info,
        }
    }
}

impl Packet for JoinGamePacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::JoinGame);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, revision: ProtocolRevision) -> Result<Self> {
        let entity_id = buffer.read_i32()?;
        let gamemode = buffer.read_u8()?;
        let dimension = buffer.read_i32()?;
        match revision {
            ProtocolRevision::V1_12_2 => Ok(Self {
                entity_id,
                gamemode,
                dimension,
                difficulty: buffer.read_u8()?,
                max_players: buffer.read_u8()?,
                level_type: buffer.read_string()?,
                view_distance: 0,
                reduced_debug_info: buffer.read_bool()?,
            }),
            ProtocolRevision::V1_14_4 => Ok(Self {
                entity_id,
                gamemode,
                dimension,
                difficulty: 0,
                max_players: buffer.read_u8()?,
                level_type: buffer.read_string()?,
                view_distance: buffer.read_varint()?,
                reduced_debug_info: buffer.read_bool()?,
            }),
        }
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, revision: ProtocolRevision) -> Result<()> {
        buffer.write_i32(self.entity_id)?;
        buffer.write_u8(self.gamemode);
        buffer.write_i32(self.dimension)?;
        match revision {
            ProtocolRevision::V1_12_2 => {
                buffer.write_u8(self.difficulty);
                buffer.write_u8(self.max_players);
                buffer.write_string(&self.level_type);
            }
            ProtocolRevision::V1_14_4 => {
                buffer.write_u8(self.max_players);
                buffer.write_string(&self.level_type);
                buffer.write_varint(self.view_distance);
            }
        }
        buffer.write_bool(self.reduced_debug_info);
        Ok(())
    }
}
