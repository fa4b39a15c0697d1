use super::packet::*;
use super::revision::{Clientbound, PacketKind, ProtocolRevision, Serverbound};
use crate::error::Result;
use md5::{Digest, Md5};
use uuid::Uuid;

/// Offline-mode UUID: MD5 of `"OfflinePlayer:" + username` stamped as version 3, variant 2.
/// Hashes the username bytes exactly as the client sent them.
pub fn offline_uuid(username: &[u8]) -> Uuid {
    let mut hasher = Md5::new();
    hasher.update(b"OfflinePlayer:");
    hasher.update(username);
    let mut hash = [0u8; 16];
    hash.copy_from_slice(&hasher.finalize());
    hash[6] = (hash[6] & 0x0F) | 0x30;
    hash[8] = (hash[8] & 0x3F) | 0x80;
    Uuid::from_bytes(hash)
}

/// Login start. The username is kept as raw bytes so it is echoed and hashed unchanged,
/// even when it is not valid UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginStartPacket {
    pub username: Vec<u8>,
}

impl Packet for LoginStartPacket {
    const KIND: PacketKind = PacketKind::Serverbound(Serverbound::LoginStart);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        let username = buffer.read_byte_string()?;

        Ok(LoginStartPacket { username })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_byte_string(&self.username);
        Ok(())
    }
}

/// Login success. Both supported revisions carry the UUID as a hyphenated string.
#[derive(Debug, PartialEq)]
pub struct LoginSuccessPacket {
    pub uuid: String,
    pub username: Vec<u8>,
}

impl LoginSuccessPacket {
    pub fn new(username: Vec<u8>) -> Self {
        let uuid = offline_uuid(&username).hyphenated().to_string();
        LoginSuccessPacket { uuid, username }
    }
}

impl Packet for LoginSuccessPacket {
    const KIND: PacketKind = PacketKind::Clientbound(Clientbound::LoginSuccess);

    fn read_from_buffer(buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<Self> {
        let uuid = buffer.read_string()?;
        let username = buffer.read_byte_string()?;

        Ok(LoginSuccessPacket { uuid, username })
    }

    fn write_to_buffer(&self, buffer: &mut MinecraftPacketBuffer, _: ProtocolRevision) -> Result<()> {
        buffer.write_string(&self.uuid);
        buffer.write_byte_string(&self.username);
        Ok(())
    }
}
